//! Authentication helpers

use http::HeaderValue;
use http::header::AUTHORIZATION;

use crate::config::{BasicAuth, RequestConfig};

use super::core::RequestBuilder;

impl RequestBuilder {
    /// Set basic auth credentials
    ///
    /// The transport encodes them into the `Authorization` header, replacing
    /// any header of that name.
    pub fn basic_auth(&self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.merge(RequestConfig::default().with_auth(BasicAuth::new(username, password)))
    }

    /// Set a bearer token
    ///
    /// Adds `Authorization: Bearer <token>`. An invalid token is logged and
    /// skipped.
    pub fn bearer_auth(&self, token: &str) -> Self {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.typed_header(AUTHORIZATION, value)
            }
            Err(_) => {
                log::warn!("Skipping invalid bearer token");
                self.clone()
            }
        }
    }
}
