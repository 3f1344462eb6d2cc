use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error as ThisError;

use crate::builder::RequestBuilder;
use crate::transport::{RawResponse, RequestHandle};

/// A classified request failure.
///
/// Every failure that leaves a fetch is normalized into this shape: a status
/// code, a stable machine-readable name, a human-readable message and optional
/// extra data. Values are immutable; every operation that "changes" an error
/// returns a new one.
#[derive(Clone, ThisError)]
#[error("{message}")]
pub struct GromitError {
    pub(super) status_code: u16,
    pub(super) name: String,
    pub(super) message: String,
    pub(super) data: Option<Arc<ErrorData>>,
    pub(super) location: &'static Location<'static>,
}

/// Extra data attached to a [`GromitError`].
#[derive(Debug, Clone)]
pub enum ErrorData {
    /// Caller supplied data.
    Value(Value),
    /// Context captured when a transport failure was classified.
    Transport(TransportContext),
}

/// What the fetch knew when the transport failed.
#[derive(Clone)]
pub struct TransportContext {
    requester: RequestBuilder,
    response: Option<RawResponse>,
    request: Option<RequestHandle>,
}

impl TransportContext {
    pub(crate) fn new(
        requester: RequestBuilder,
        response: Option<RawResponse>,
        request: Option<RequestHandle>,
    ) -> Self {
        Self { requester, response, request }
    }

    /// The builder that issued the failed request.
    #[must_use]
    pub fn requester(&self) -> &RequestBuilder {
        &self.requester
    }

    /// The response that came back, when the failure was an HTTP status.
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }

    /// Transport specific handle for the request that was sent, if any.
    #[must_use]
    pub fn request(&self) -> Option<&RequestHandle> {
        self.request.as_ref()
    }
}

impl fmt::Debug for TransportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportContext")
            .field("requester", &self.requester)
            .field("response", &self.response)
            .field("request", &self.request.is_some())
            .finish()
    }
}

impl GromitError {
    pub(crate) fn from_parts(
        status_code: u16,
        name: impl Into<String>,
        message: impl Into<String>,
        data: Option<Arc<ErrorData>>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            status_code,
            name: name.into(),
            message: message.into(),
            data,
            location,
        }
    }

    /// The HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// A unique name for the error, eg. `USER_DOES_NOT_EXIST`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Misc data about the error.
    #[must_use]
    pub fn data(&self) -> Option<&ErrorData> {
        self.data.as_deref()
    }

    /// The caller supplied data, if the error carries any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self.data()? {
            ErrorData::Value(value) => Some(value),
            ErrorData::Transport(_) => None,
        }
    }

    /// The transport context, if this error was classified from a fetch.
    #[must_use]
    pub fn transport_context(&self) -> Option<&TransportContext> {
        match self.data()? {
            ErrorData::Transport(context) => Some(context),
            ErrorData::Value(_) => None,
        }
    }

    /// Source location where the error was first constructed.
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Always true. Distinguishes a classified error from an arbitrary failure.
    #[must_use]
    pub fn is_gromit_error(&self) -> bool {
        true
    }

    /// The status as an [`http::StatusCode`], when it is a valid one.
    #[must_use]
    pub fn http_status(&self) -> Option<http::StatusCode> {
        http::StatusCode::from_u16(self.status_code).ok()
    }

    /// Returns true for 4xx statuses.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Returns true for 5xx statuses.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

impl fmt::Debug for GromitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("gromit::GromitError");

        f.field("status_code", &self.status_code);
        f.field("name", &self.name);
        f.field("message", &self.message);

        if let Some(ref data) = self.data {
            f.field("data", data);
        }

        f.field("location", &format_args!("{}", self.location));
        f.finish()
    }
}
