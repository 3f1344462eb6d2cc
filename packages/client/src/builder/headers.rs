//! Header management
//!
//! Header setters build a complete new header map from the current one, since
//! a merge replaces the header map as a whole.

use std::str::FromStr;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::RequestConfig;

use super::core::RequestBuilder;

impl RequestBuilder {
    /// Add a header on top of the configured ones
    ///
    /// An invalid name or value is logged and skipped; the builder comes back
    /// unchanged.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn run(builder: gromit_client::RequestBuilder) -> gromit_client::Result<()> {
    /// let response = builder
    ///     .header("x-request-id", "42")
    ///     .get("/users", None)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn header(&self, name: &str, value: &str) -> Self {
        let name = match HeaderName::from_str(name) {
            Ok(name) => name,
            Err(err) => {
                log::warn!("Skipping invalid header name {name:?}: {err}");
                return self.clone();
            }
        };
        match HeaderValue::from_str(value) {
            Ok(value) => self.typed_header(name, value),
            Err(err) => {
                log::warn!("Skipping invalid value for header {name}: {err}");
                self.clone()
            }
        }
    }

    /// Add an already validated header on top of the configured ones
    pub fn typed_header(&self, name: HeaderName, value: HeaderValue) -> Self {
        let mut headers = self.config.headers.as_deref().cloned().unwrap_or_default();
        headers.insert(name, value);
        self.headers(headers)
    }

    /// Replace all configured headers
    pub fn headers(&self, headers: HeaderMap) -> Self {
        self.merge(RequestConfig::default().with_headers(headers))
    }

    /// Add several headers, skipping invalid ones
    pub fn extend_headers<'a, I>(&self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = self.config.headers.as_deref().cloned().unwrap_or_default();
        for (name, value) in headers {
            match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => log::warn!("Skipping invalid header {name:?}"),
            }
        }
        self.headers(map)
    }
}
