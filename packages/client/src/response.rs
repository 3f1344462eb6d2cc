//! Successful response record

use http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::builder::RequestBuilder;
use crate::config::Payload;
use crate::transport::{RawResponse, RequestHandle};

/// A normalized successful response.
///
/// Only ever built from what a transport returned. Immutable;
/// [`with_data`](Self::with_data) returns a new record, which is what
/// `before_response` hooks use to rewrite a body.
#[derive(Debug, Clone)]
pub struct GromitResponse {
    requester: RequestBuilder,
    status_code: u16,
    status_text: String,
    data: Payload,
    headers: HeaderMap,
    request: Option<RequestHandle>,
}

impl GromitResponse {
    /// Wrap a raw transport response, recording which builder made it.
    pub fn from_raw(raw: RawResponse, requester: RequestBuilder) -> Self {
        Self {
            requester,
            status_code: raw.status,
            status_text: raw.status_text,
            data: raw.data,
            headers: raw.headers,
            request: raw.request,
        }
    }

    /// The builder that made the request.
    #[must_use]
    pub fn requester(&self) -> &RequestBuilder {
        &self.requester
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// The decoded body.
    #[must_use]
    pub fn data(&self) -> &Payload {
        &self.data
    }

    /// Take the decoded body, dropping the rest of the record.
    #[must_use]
    pub fn into_data(self) -> Payload {
        self.data
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Transport specific handle for the request that produced this response.
    #[must_use]
    pub fn request(&self) -> Option<&RequestHandle> {
        self.request.as_ref()
    }

    /// A copy of this response with a different body.
    #[must_use]
    pub fn with_data(&self, data: impl Into<Payload>) -> Self {
        Self {
            data: data.into(),
            ..self.clone()
        }
    }

    /// The body as JSON, if it was decoded as JSON.
    #[must_use]
    pub fn json(&self) -> Option<&Value> {
        self.data.as_json()
    }

    /// Deserialize a JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON or does not match `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.data {
            Payload::Json(value) => T::deserialize(value),
            Payload::Text(text) => serde_json::from_str(text),
            Payload::Bytes(bytes) => serde_json::from_slice(bytes),
            Payload::Empty => serde_json::from_str("null"),
        }
    }
}
