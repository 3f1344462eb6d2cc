use std::error::Error as StdError;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use super::gromit_error::{ErrorData, GromitError};
use super::types::Error;
use crate::status::{self, FALLBACK_STATUS};
use crate::transport::TransportError;

/// Treat empty strings the same as a missing value.
pub(super) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn present_code(code: Option<u16>) -> Option<u16> {
    code.filter(|code| *code != 0)
}

impl GromitError {
    /// Create a new error from scratch.
    ///
    /// The status defaults to 500. A missing message or name is filled in from
    /// the status registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStatusCode`] when the status is not registered and
    /// either the message or the name was left out.
    #[track_caller]
    pub fn create(
        status_code: Option<u16>,
        message: Option<&str>,
        name: Option<&str>,
        data: Option<Value>,
    ) -> Result<Self, Error> {
        let location = Location::caller();
        let code = present_code(status_code).unwrap_or(FALLBACK_STATUS);

        let (message, name) = match (present(message), present(name)) {
            (Some(message), Some(name)) => (message, name),
            (message, name) => {
                let info = status::lookup(code)?;
                (message.unwrap_or(info.message), name.unwrap_or(info.name))
            }
        };

        Ok(Self::from_parts(
            code,
            name,
            message,
            data.map(|value| Arc::new(ErrorData::Value(value))),
            location,
        ))
    }

    /// Wrap an existing error, turning it into a classified one.
    ///
    /// Explicit arguments win. Otherwise the status comes from the wrapped
    /// error when it carries one, the message from its `Display`, and the name
    /// and data from it when it is already a [`GromitError`]. Whatever is still
    /// missing comes from the registry entry for the status. Never fails: an
    /// unregistered status keeps its code and takes the defaults of 500.
    #[track_caller]
    pub fn wrap(
        raw: &(dyn StdError + 'static),
        status_code: Option<u16>,
        message: Option<&str>,
        name: Option<&str>,
        data: Option<Value>,
    ) -> Self {
        let location = Location::caller();
        let classified = as_classified(raw);

        let code = present_code(status_code)
            .or_else(|| raw_status(raw))
            .unwrap_or(FALLBACK_STATUS);
        let defaults = status::defaults_for(code);

        let raw_message = raw.to_string();
        let message = present(message)
            .or_else(|| present(Some(raw_message.as_str())))
            .unwrap_or(defaults.message);
        let name = present(name)
            .or_else(|| classified.map(GromitError::name))
            .unwrap_or(defaults.name);

        let data = match data {
            Some(value) => Some(Arc::new(ErrorData::Value(value))),
            None => classified.and_then(|err| err.data.clone()),
        };
        let location = classified.map_or(location, GromitError::location);

        Self::from_parts(code, name, message, data, location)
    }
}

pub(super) fn as_classified<'a>(raw: &'a (dyn StdError + 'static)) -> Option<&'a GromitError> {
    raw.downcast_ref::<GromitError>()
        .or_else(|| raw.downcast_ref::<Error>().and_then(Error::classified))
}

/// The status-like field of an arbitrary error, when it has one.
fn raw_status(raw: &(dyn StdError + 'static)) -> Option<u16> {
    match as_classified(raw) {
        Some(classified) => present_code(Some(classified.status_code())),
        None => raw
            .downcast_ref::<TransportError>()
            .and_then(TransportError::status),
    }
}

macro_rules! status_constructors {
    ($($(#[$meta:meta])* $fn_name:ident => $code:literal,)*) => {
        impl GromitError {
            $(
                $(#[$meta])*
                #[doc = ""]
                #[doc = concat!("Creates a new ", stringify!($code), " error. A missing message or name takes the registry default.")]
                #[track_caller]
                #[must_use]
                pub fn $fn_name(message: Option<&str>, name: Option<&str>, data: Option<Value>) -> Self {
                    let location = Location::caller();
                    let info = status::defaults_for($code);
                    Self::from_parts(
                        $code,
                        present(name).unwrap_or(info.name),
                        present(message).unwrap_or(info.message),
                        data.map(|value| Arc::new(ErrorData::Value(value))),
                        location,
                    )
                }
            )*
        }
    };
}

status_constructors! {
    /// Bad Request
    bad_request => 400,
    /// Unauthorized
    unauthorized => 401,
    /// Payment Required
    payment_required => 402,
    /// Forbidden
    forbidden => 403,
    /// Not Found
    not_found => 404,
    /// Method Not Allowed
    method_not_allowed => 405,
    /// Not Acceptable
    not_acceptable => 406,
    /// Proxy Authentication Required
    proxy_auth_required => 407,
    /// Request Time-out
    client_timeout => 408,
    /// Conflict
    conflict => 409,
    /// Gone
    resource_gone => 410,
    /// Length Required
    length_required => 411,
    /// Precondition Failed
    precondition_failed => 412,
    /// Request Entity Too Large
    entity_too_large => 413,
    /// Request-URI Too Large
    uri_too_long => 414,
    /// Unsupported Media Type
    unsupported_media_type => 415,
    /// Requested Range Not Satisfiable
    range_not_satisfiable => 416,
    /// Expectation Failed
    expectation_failed => 417,
    /// I'm a teapot
    teapot => 418,
    /// Unprocessable Entity
    bad_data => 422,
    /// Locked
    locked => 423,
    /// Precondition Required
    precondition_required => 428,
    /// Too Many Requests
    too_many_requests => 429,
    /// Unavailable For Legal Reasons
    illegal => 451,
    /// Internal Server Error
    internal => 500,
    /// Not Implemented
    not_implemented => 501,
    /// Bad Gateway
    bad_gateway => 502,
    /// Service Unavailable
    server_unavailable => 503,
    /// Gateway Time-out
    gateway_timeout => 504,
    /// HTTP Version Not Supported
    http_version_not_supported => 505,
    /// Variant Also Negotiates
    variant_also_negotiates => 506,
    /// Insufficient Storage
    insufficient_storage => 507,
    /// Bandwidth Limit Exceeded
    bandwidth_limit_exceeded => 509,
    /// Not Extended
    not_extended => 510,
    /// Network Authentication Required
    network_authentication_required => 511,
}
