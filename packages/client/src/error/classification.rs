use std::error::Error as StdError;
use std::panic::Location;
use std::sync::Arc;

use super::constructors::{as_classified, present};
use super::gromit_error::{ErrorData, GromitError, TransportContext};
use super::types::BoxError;
use crate::builder::RequestBuilder;
use crate::status::{self, FALLBACK_STATUS};
use crate::transport::TransportError;

impl GromitError {
    /// Classify whatever a transport failed with.
    ///
    /// An error that already is a [`GromitError`], bare or inside
    /// [`Error::Classified`](super::Error::Classified), comes back unchanged,
    /// so classifying twice is the same as classifying once.
    #[track_caller]
    pub fn classify(err: BoxError, requester: &RequestBuilder) -> Self {
        if let Some(classified) = as_classified(&*err) {
            return classified.clone();
        }

        match err.downcast::<TransportError>() {
            Ok(transport) => Self::from_transport_error(&transport, requester),
            Err(other) => {
                tracing::trace!(error = %other, "classifying opaque transport failure");
                Self::from_failure(other.to_string(), None, None, None, requester)
            }
        }
    }

    /// Build an error from a transport failure.
    ///
    /// The status is the response status when the failure carries a response,
    /// 500 otherwise. The builder and what the transport reported are kept in
    /// [`ErrorData::Transport`].
    #[track_caller]
    #[must_use]
    pub fn from_transport_error(err: &TransportError, requester: &RequestBuilder) -> Self {
        Self::from_failure(
            err.to_string(),
            err.status(),
            err.response().cloned(),
            err.request().cloned(),
            requester,
        )
    }

    #[track_caller]
    fn from_failure(
        message: String,
        status_code: Option<u16>,
        response: Option<crate::transport::RawResponse>,
        request: Option<crate::transport::RequestHandle>,
        requester: &RequestBuilder,
    ) -> Self {
        let code = status_code.unwrap_or(FALLBACK_STATUS);
        let defaults = status::defaults_for(code);
        let message = present(Some(message.as_str()))
            .unwrap_or(defaults.message)
            .to_owned();
        let context = TransportContext::new(requester.clone(), response, request);

        Self::from_parts(
            code,
            defaults.name,
            message,
            Some(Arc::new(ErrorData::Transport(context))),
            Location::caller(),
        )
    }

    /// Returns true if `err` is already classified, either directly or as
    /// [`Error::Classified`](super::Error::Classified).
    #[must_use]
    pub fn is_classified(err: &(dyn StdError + 'static)) -> bool {
        as_classified(err).is_some()
    }
}
