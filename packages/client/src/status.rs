//! Status code registry
//!
//! Static mapping from an HTTP status code to the canonical `(name, message)`
//! pair used to fill in defaults for [`GromitError`](crate::error::GromitError).
//! The table is built once on first use and never changes afterwards.

use std::sync::LazyLock;

use hashbrown::HashMap;

use crate::error::Error;

/// Canonical name and message for a registered status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// The HTTP status code
    pub code: u16,
    /// Stable machine-readable name, eg. `NOT_FOUND`
    pub name: &'static str,
    /// Human-readable default message, eg. `Not Found`
    pub message: &'static str,
}

impl StatusInfo {
    const fn new(code: u16, message: &'static str, name: &'static str) -> Self {
        Self { code, name, message }
    }
}

/// Status code substituted for any unregistered code before a default is looked up
pub const FALLBACK_STATUS: u16 = 500;

const INTERNAL_SERVER_ERROR: StatusInfo =
    StatusInfo::new(500, "Internal Server Error", "INTERNAL_SERVER_ERROR");

const STATUS_TABLE: &[StatusInfo] = &[
    StatusInfo::new(100, "Continue", "CONTINUE"),
    StatusInfo::new(101, "Switching Protocols", "SWITCHING_PROTOCOLS"),
    StatusInfo::new(102, "Processing", "PROCESSING"),
    StatusInfo::new(200, "OK", "OK"),
    StatusInfo::new(201, "Created", "CREATED"),
    StatusInfo::new(202, "Accepted", "ACCEPTED"),
    StatusInfo::new(203, "Non-Authoritative Information", "NON_AUTHORITATIVE_INFORMATION"),
    StatusInfo::new(204, "No Content", "NO_CONTENT"),
    StatusInfo::new(205, "Reset Content", "RESET_CONTENT"),
    StatusInfo::new(206, "Partial Content", "PARTIAL_CONTENT"),
    StatusInfo::new(207, "Multi-Status", "MULTI_STATUS"),
    StatusInfo::new(300, "Multiple Choices", "MULTIPLE_CHOICES"),
    StatusInfo::new(301, "Moved Permanently", "MOVED_PERMANENTLY"),
    StatusInfo::new(302, "Moved Temporarily", "MOVED_TEMPORARILY"),
    StatusInfo::new(303, "See Other", "SEE_OTHER"),
    StatusInfo::new(304, "Not Modified", "NOT_MODIFIED"),
    StatusInfo::new(305, "Use Proxy", "USE_PROXY"),
    StatusInfo::new(307, "Temporary Redirect", "TEMPORARY_REDIRECT"),
    StatusInfo::new(400, "Bad Request", "BAD_REQUEST"),
    StatusInfo::new(401, "Unauthorized", "UNAUTHORIZED"),
    StatusInfo::new(402, "Payment Required", "PAYMENT_REQUIRED"),
    StatusInfo::new(403, "Forbidden", "FORBIDDEN"),
    StatusInfo::new(404, "Not Found", "NOT_FOUND"),
    StatusInfo::new(405, "Method Not Allowed", "METHOD_NOT_ALLOWED"),
    StatusInfo::new(406, "Not Acceptable", "NOT_ACCEPTABLE"),
    StatusInfo::new(407, "Proxy Authentication Required", "PROXY_AUTHENTICATION_REQUIRED"),
    StatusInfo::new(408, "Request Time-out", "REQUEST_TIME_OUT"),
    StatusInfo::new(409, "Conflict", "CONFLICT"),
    StatusInfo::new(410, "Gone", "GONE"),
    StatusInfo::new(411, "Length Required", "LENGTH_REQUIRED"),
    StatusInfo::new(412, "Precondition Failed", "PRECONDITION_FAILED"),
    StatusInfo::new(413, "Request Entity Too Large", "REQUEST_ENTITY_TOO_LARGE"),
    StatusInfo::new(414, "Request-URI Too Large", "REQUEST_URI_TOO_LARGE"),
    StatusInfo::new(415, "Unsupported Media Type", "UNSUPPORTED_MEDIA_TYPE"),
    StatusInfo::new(416, "Requested Range Not Satisfiable", "REQUESTED_RANGE_NOT_SATISFIABLE"),
    StatusInfo::new(417, "Expectation Failed", "EXPECTATION_FAILED"),
    StatusInfo::new(418, "I'm a teapot", "IM_A_TEAPOT"),
    StatusInfo::new(422, "Unprocessable Entity", "UNPROCESSABLE_ENTITY"),
    StatusInfo::new(423, "Locked", "LOCKED"),
    StatusInfo::new(424, "Failed Dependency", "FAILED_DEPENDENCY"),
    StatusInfo::new(425, "Unordered Collection", "UNORDERED_COLLECTION"),
    StatusInfo::new(426, "Upgrade Required", "UPGRADE_REQUIRED"),
    StatusInfo::new(428, "Precondition Required", "PRECONDITION_REQUIRED"),
    StatusInfo::new(429, "Too Many Requests", "TOO_MANY_REQUESTS"),
    StatusInfo::new(431, "Request Header Fields Too Large", "REQUEST_HEADER_FIELDS_TOO_LARGE"),
    StatusInfo::new(451, "Unavailable For Legal Reasons", "UNAVAILABLE_FOR_LEGAL_REASONS"),
    INTERNAL_SERVER_ERROR,
    StatusInfo::new(501, "Not Implemented", "NOT_IMPLEMENTED"),
    StatusInfo::new(502, "Bad Gateway", "BAD_GATEWAY"),
    StatusInfo::new(503, "Service Unavailable", "SERVICE_UNAVAILABLE"),
    StatusInfo::new(504, "Gateway Time-out", "GATEWAY_TIME_OUT"),
    StatusInfo::new(505, "HTTP Version Not Supported", "HTTP_VERSION_NOT_SUPPORTED"),
    StatusInfo::new(506, "Variant Also Negotiates", "VARIANT_ALSO_NEGOTIATES"),
    StatusInfo::new(507, "Insufficient Storage", "INSUFFICIENT_STORAGE"),
    StatusInfo::new(509, "Bandwidth Limit Exceeded", "BANDWIDTH_LIMIT_EXCEEDED"),
    StatusInfo::new(510, "Not Extended", "NOT_EXTENDED"),
    StatusInfo::new(511, "Network Authentication Required", "NETWORK_AUTHENTICATION_REQUIRED"),
];

static REGISTRY: LazyLock<HashMap<u16, &'static StatusInfo>> =
    LazyLock::new(|| STATUS_TABLE.iter().map(|info| (info.code, info)).collect());

/// Look up the canonical name and message for `code`
///
/// # Errors
///
/// Returns [`Error::UnknownStatusCode`] when `code` is not registered. Callers that
/// only need a default should go through [`defaults_for`] instead.
pub fn lookup(code: u16) -> Result<&'static StatusInfo, Error> {
    REGISTRY
        .get(&code)
        .copied()
        .ok_or(Error::UnknownStatusCode { code })
}

/// Whether `code` has an entry in the registry
#[must_use]
pub fn is_registered(code: u16) -> bool {
    REGISTRY.contains_key(&code)
}

/// Map an unregistered code onto [`FALLBACK_STATUS`]
#[must_use]
pub fn resolve(code: u16) -> u16 {
    if is_registered(code) { code } else { FALLBACK_STATUS }
}

/// Default name and message for `code`, falling back to 500 for unknown codes
#[must_use]
pub fn defaults_for(code: u16) -> &'static StatusInfo {
    lookup(resolve(code)).unwrap_or(&INTERNAL_SERVER_ERROR)
}

/// Iterate over every registered status in ascending code order
pub fn iter() -> impl Iterator<Item = &'static StatusInfo> {
    STATUS_TABLE.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_code() {
        let info = lookup(404).expect("404 is registered");
        assert_eq!(info.name, "NOT_FOUND");
        assert_eq!(info.message, "Not Found");
    }

    #[test]
    fn lookup_unknown_code_fails() {
        assert!(matches!(lookup(299), Err(Error::UnknownStatusCode { code: 299 })));
    }

    #[test]
    fn nonstandard_codes_are_registered() {
        assert_eq!(defaults_for(425).name, "UNORDERED_COLLECTION");
        assert_eq!(defaults_for(509).name, "BANDWIDTH_LIMIT_EXCEEDED");
        assert_eq!(defaults_for(418).message, "I'm a teapot");
    }

    #[test]
    fn unknown_codes_resolve_to_internal_error() {
        assert_eq!(resolve(999), FALLBACK_STATUS);
        assert_eq!(resolve(401), 401);
        assert_eq!(defaults_for(999).name, "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn table_is_sorted_without_duplicates() {
        let codes: Vec<u16> = iter().map(|info| info.code).collect();
        assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(codes.len(), REGISTRY.len());
        assert_eq!(codes.first(), Some(&100));
        assert_eq!(codes.last(), Some(&511));
    }
}
