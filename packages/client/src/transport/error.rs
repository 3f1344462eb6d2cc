use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::{RawResponse, RequestHandle};
use crate::error::BoxError;

/// A failure reported by a transport before classification.
pub struct TransportError {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    message: String,
    source: Option<BoxError>,
    response: Option<RawResponse>,
    request: Option<RequestHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The request could not be built or sent.
    Request,
    /// Connection could not be established.
    Connect,
    /// The request did not finish in time.
    Timeout,
    /// The server answered with a non-2xx status.
    Status,
    /// Reading the response body failed.
    Body,
    /// The response body was larger than allowed.
    ContentLength,
    /// Too many redirects, or a redirect that could not be followed.
    Redirect,
}

impl TransportError {
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                message: message.into(),
                source: None,
                response: None,
                request: None,
            }),
        }
    }

    #[must_use = "TransportError builder methods return a new error and should be used"]
    pub fn with_source<E: Into<BoxError>>(mut self, source: E) -> Self {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use = "TransportError builder methods return a new error and should be used"]
    pub fn with_response(mut self, response: RawResponse) -> Self {
        self.inner.response = Some(response);
        self
    }

    #[must_use = "TransportError builder methods return a new error and should be used"]
    pub fn with_request(mut self, request: RequestHandle) -> Self {
        self.inner.request = Some(request);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Status of the response that came back, if one did.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.inner.response.as_ref().map(|response| response.status)
    }

    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        self.inner.response.as_ref()
    }

    #[must_use]
    pub fn request(&self) -> Option<&RequestHandle> {
        self.inner.request.as_ref()
    }

    /// Returns true if the request did not finish in time.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if self.inner.kind == Kind::Timeout {
            return true;
        }

        let mut source = self.source();
        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<std::io::Error>()
                && io.kind() == std::io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// Returns true if the server answered with a non-2xx status.
    #[must_use]
    pub fn is_status(&self) -> bool {
        self.inner.kind == Kind::Status
    }

    /// Returns true if the connection could not be established.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        self.inner.kind == Kind::Connect
    }

    /// Returns true if the request could not be built or sent.
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.inner.kind == Kind::Request
    }

    /// Returns true if reading the response body failed.
    #[must_use]
    pub fn is_body(&self) -> bool {
        self.inner.kind == Kind::Body
    }

    /// Returns true if the response body was larger than allowed.
    #[must_use]
    pub fn is_content_length(&self) -> bool {
        self.inner.kind == Kind::ContentLength
    }

    /// Returns true if following redirects failed.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.inner.kind == Kind::Redirect
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("gromit::TransportError");

        f.field("kind", &self.inner.kind);
        f.field("message", &self.inner.message);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref response) = self.inner.response {
            f.field("status", &response.status);
        }

        f.finish()
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

/// Render an error and its source chain on one line.
pub(crate) fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Creates a `TransportError` for a request that could not be sent.
pub fn request<E: Into<BoxError>>(e: E) -> TransportError {
    let source = e.into();
    TransportError::new(Kind::Request, describe_chain(&*source)).with_source(source)
}

/// Creates a `TransportError` for a failed connection attempt.
pub fn connect<E: Into<BoxError>>(e: E) -> TransportError {
    let source = e.into();
    TransportError::new(Kind::Connect, describe_chain(&*source)).with_source(source)
}

/// Creates a `TransportError` for a body that could not be read.
pub fn body<E: Into<BoxError>>(e: E) -> TransportError {
    let source = e.into();
    TransportError::new(Kind::Body, describe_chain(&*source)).with_source(source)
}

/// Creates a `TransportError` for a request that ran past its timeout.
pub fn timeout(after: Duration) -> TransportError {
    TransportError::new(
        Kind::Timeout,
        format!("timeout of {}ms exceeded", after.as_millis()),
    )
}

/// Creates a `TransportError` for a non-2xx response.
pub fn status(response: RawResponse) -> TransportError {
    let message = format!("Request failed with status code {}", response.status);
    let request = response.request.clone();
    let err = TransportError::new(Kind::Status, message).with_response(response);
    match request {
        Some(request) => err.with_request(request),
        None => err,
    }
}

/// Creates a `TransportError` for a body larger than `limit` bytes.
pub fn content_length(limit: u64) -> TransportError {
    TransportError::new(
        Kind::ContentLength,
        format!("maxContentLength size of {limit} exceeded"),
    )
}

/// Creates a `TransportError` for a redirect chain longer than allowed.
pub fn redirects() -> TransportError {
    TransportError::new(Kind::Redirect, "Maximum number of redirects exceeded")
}

/// Creates a `TransportError` for a redirect that could not be followed.
pub fn redirect<E: Into<BoxError>>(e: E) -> TransportError {
    let source = e.into();
    TransportError::new(Kind::Redirect, describe_chain(&*source)).with_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorMessage;

    #[test]
    fn status_error_carries_response() {
        let err = status(RawResponse::new(404));
        assert!(err.is_status());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[test]
    fn timeout_message() {
        let err = timeout(Duration::from_millis(250));
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "timeout of 250ms exceeded");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn io_timeout_in_chain_counts_as_timeout() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        assert!(connect(io).is_timeout());
        assert!(!connect(ErrorMessage::new("refused")).is_timeout());
    }

    #[test]
    fn message_includes_source_chain() {
        let inner = connect(ErrorMessage::new("connection refused"));
        let outer = request(inner);
        assert_eq!(outer.to_string(), "connection refused");
        assert!(outer.source().is_some());
    }
}
