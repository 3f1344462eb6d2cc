//! Value types carried by a [`RequestConfig`](super::RequestConfig)

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::HeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    /// Whether a request body is sent with this method.
    #[must_use]
    pub fn allows_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
            Method::Head => http::Method::HEAD,
            Method::Options => http::Method::OPTIONS,
        }
    }
}

/// A request or response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    Text(String),
    Json(Value),
    Bytes(Bytes),
}

impl Payload {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Empty => true,
            Payload::Text(text) => text.is_empty(),
            Payload::Json(_) => false,
            Payload::Bytes(bytes) => bytes.is_empty(),
        }
    }

    /// The JSON value, when the payload is JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text, when the payload is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Content type implied by the payload, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Payload::Empty => None,
            Payload::Text(_) => Some("text/plain;charset=utf-8"),
            Payload::Json(_) => Some("application/json;charset=utf-8"),
            Payload::Bytes(_) => Some("application/octet-stream"),
        }
    }

    /// Encode the payload for the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON payload cannot be serialized.
    pub fn to_bytes(&self) -> Result<Bytes, serde_json::Error> {
        Ok(match self {
            Payload::Empty => Bytes::new(),
            Payload::Text(text) => Bytes::copy_from_slice(text.as_bytes()),
            Payload::Json(value) => Bytes::from(serde_json::to_vec(value)?),
            Payload::Bytes(bytes) => bytes.clone(),
        })
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(bytes))
    }
}

/// Query string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params {
    /// Ordered key/value pairs, url-encoded on use.
    Pairs(Vec<(String, String)>),
    /// An already encoded query string, without the leading `?`.
    Encoded(String),
}

impl Params {
    pub fn pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Params::Pairs(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Serialize into a query string.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair cannot be url-encoded.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        match self {
            Params::Pairs(pairs) => serde_urlencoded::to_string(pairs),
            Params::Encoded(query) => Ok(query.trim_start_matches('?').to_owned()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Params::Pairs(pairs) => pairs.is_empty(),
            Params::Encoded(query) => query.trim_start_matches('?').is_empty(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Params {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Params::pairs(pairs)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        Params::pairs(pairs)
    }
}

/// How the response body should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    ArrayBuffer,
    Blob,
    Document,
    #[default]
    Json,
    Text,
    Stream,
}

/// HTTP basic auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value, marked sensitive.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn basic_auth_header() {
        let value = BasicAuth::new("user", "pass").header_value().unwrap();
        assert_eq!(value, "Basic dXNlcjpwYXNz");
        assert!(value.is_sensitive());
        assert!(!format!("{:?}", BasicAuth::new("user", "pass")).contains("pass\""));
    }

    #[test]
    fn params_encode_in_order() {
        let params = Params::from([("q", "a b"), ("page", "2")]);
        assert_eq!(params.encode().unwrap(), "q=a+b&page=2");
        assert_eq!(Params::Encoded("?x=1".into()).encode().unwrap(), "x=1");
    }

    #[test]
    fn payload_encoding() {
        let payload = Payload::from(json!({"a": 1}));
        assert_eq!(payload.to_bytes().unwrap(), Bytes::from_static(b"{\"a\":1}"));
        assert_eq!(payload.content_type(), Some("application/json;charset=utf-8"));
        assert!(Payload::Empty.is_empty());
        assert_eq!(Payload::Empty.content_type(), None);
    }

    #[test]
    fn method_body_rules() {
        assert!(Method::Post.allows_body());
        assert!(!Method::Delete.allows_body());
        assert_eq!(http::Method::from(Method::Options), http::Method::OPTIONS);
        assert_eq!(serde_json::to_value(Method::Patch).unwrap(), json!("patch"));
    }
}
