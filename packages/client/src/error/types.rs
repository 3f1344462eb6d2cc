use thiserror::Error as ThisError;

use super::gromit_error::GromitError;

/// Boxed, thread-safe error returned by transports and hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A Result alias where the Err case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the request facade.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A status code outside the registry was used without both a message and a name.
    #[error("unknown status code {code}: a message and a name are required")]
    UnknownStatusCode { code: u16 },

    /// The transport failed and the failure was classified.
    #[error(transparent)]
    Classified(#[from] GromitError),

    /// The `before_response` hook rejected the response. Carried verbatim.
    #[error("{0}")]
    Hook(#[source] BoxError),

    /// A token provider failed before the request was sent. Carried verbatim.
    #[error("{0}")]
    Token(#[source] BoxError),
}

impl Error {
    /// The classified transport failure, if this is one.
    #[must_use]
    pub fn classified(&self) -> Option<&GromitError> {
        match self {
            Error::Classified(err) => Some(err),
            _ => None,
        }
    }

    /// Consume the error, returning the classified failure if this is one.
    pub fn into_classified(self) -> std::result::Result<GromitError, Self> {
        match self {
            Error::Classified(err) => Ok(err),
            other => Err(other),
        }
    }

    /// Returns true if a status code outside the registry was rejected.
    #[must_use]
    pub fn is_unknown_status(&self) -> bool {
        matches!(self, Error::UnknownStatusCode { .. })
    }

    /// Returns true if the `before_response` hook failed.
    #[must_use]
    pub fn is_hook(&self) -> bool {
        matches!(self, Error::Hook(_))
    }

    /// Returns true if a token provider failed.
    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, Error::Token(_))
    }
}

/// A bare failure carrying only a message.
///
/// Used when a serialized error string arrives without its original error
/// object, and as the simplest thing a transport can fail with.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{0}")]
pub struct ErrorMessage(pub String);

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for ErrorMessage {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl From<String> for ErrorMessage {
    fn from(message: String) -> Self {
        Self(message)
    }
}
