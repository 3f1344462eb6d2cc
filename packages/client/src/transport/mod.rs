//! Transport seam
//!
//! The facade never talks to the network itself. It resolves a
//! [`RequestDescriptor`] and hands it to a [`Transport`], which answers with a
//! [`RawResponse`] or fails with any error. [`HyperTransport`] is the default
//! implementation; tests and embedders can plug in their own.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use http::HeaderMap;

use crate::config::Payload;
use crate::error::BoxError;

pub mod descriptor;
pub mod error;
pub mod hyper_transport;

pub use descriptor::{RequestDescriptor, combine_urls, is_absolute_url};
pub use error::{Kind, TransportError};
pub use hyper_transport::{HyperTransport, SentRequest};

/// Common interface for anything that can execute a request.
///
/// A failing transport may return any error. Returning a
/// [`TransportError`] lets the failure carry the response and request that
/// belong to it; returning a [`GromitError`](crate::GromitError) passes it
/// through classification unchanged.
pub trait Transport: Send + Sync {
    /// Execute a resolved request.
    fn execute(&self, descriptor: RequestDescriptor)
    -> BoxFuture<'static, Result<RawResponse, BoxError>>;

    /// Transport name for debugging/logging
    fn name(&self) -> &'static str;
}

/// Opaque, transport specific record of the request that was sent.
#[derive(Clone)]
pub struct RequestHandle(Arc<dyn Any + Send + Sync>);

impl RequestHandle {
    pub fn new<T: Any + Send + Sync>(request: T) -> Self {
        Self(Arc::new(request))
    }

    /// The concrete request record, if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestHandle")
    }
}

/// A response as the transport received it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub data: Payload,
    pub headers: HeaderMap,
    pub request: Option<RequestHandle>,
}

impl RawResponse {
    /// A response with an empty body and the canonical reason as status text.
    #[must_use]
    pub fn new(status: u16) -> Self {
        let status_text = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_owned();

        Self {
            status,
            status_text,
            data: Payload::Empty,
            headers: HeaderMap::new(),
            request: None,
        }
    }

    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<Payload>) -> Self {
        self.data = data.into();
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_request(mut self, request: RequestHandle) -> Self {
        self.request = Some(request);
        self
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
