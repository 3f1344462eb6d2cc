//! Resolved request handed to a transport

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use http::HeaderMap;
use regex::Regex;

use crate::config::{
    BasicAuth, Method, Params, Payload, ProgressCallback, RequestConfig, ResponseType,
};

// scheme:// or protocol-relative //
static ABSOLUTE_URL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z][a-z\d+\-.]*:)?//").ok());

/// Returns true if `url` carries its own scheme or is protocol relative.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    match ABSOLUTE_URL.as_ref() {
        Some(pattern) => pattern.is_match(url),
        None => url.contains("://") || url.starts_with("//"),
    }
}

/// Join a base URL and a relative path with exactly one `/` between them.
#[must_use]
pub fn combine_urls(base_url: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base_url.to_owned();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// Everything a transport needs to send one request.
///
/// Built from a fully merged [`RequestConfig`]; unset fields are resolved
/// here so a transport never has to know the defaults.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub base_url: Option<Arc<str>>,
    pub path: Option<Arc<str>>,
    pub params: Option<Arc<Params>>,
    /// `None` for methods that do not send a body.
    pub data: Option<Arc<Payload>>,
    pub headers: Arc<HeaderMap>,
    pub timeout: Option<Duration>,
    pub with_credentials: bool,
    pub auth: Option<Arc<BasicAuth>>,
    pub response_type: ResponseType,
    pub max_content_length: Option<u64>,
    /// `None` lets the transport apply its own limit.
    pub max_redirects: Option<u32>,
    pub on_upload_progress: Option<ProgressCallback>,
    pub on_download_progress: Option<ProgressCallback>,
}

impl RequestDescriptor {
    #[must_use]
    pub fn from_config(config: &RequestConfig) -> Self {
        let method = config.resolved_method();
        let data = if method.allows_body() {
            config.data.clone()
        } else {
            None
        };

        Self {
            method,
            base_url: config.base_url.clone(),
            path: config.path.clone(),
            params: config.params.clone(),
            data,
            headers: config.headers.clone().unwrap_or_default(),
            timeout: config.timeout,
            with_credentials: config.with_credentials.unwrap_or(false),
            auth: config.auth.clone(),
            response_type: config.resolved_response_type(),
            max_content_length: config.max_content_length,
            max_redirects: config.max_redirects,
            on_upload_progress: config.on_upload_progress.clone(),
            on_download_progress: config.on_download_progress.clone(),
        }
    }

    /// Base URL and path combined, without query parameters.
    ///
    /// An absolute path ignores the base URL.
    #[must_use]
    pub fn url(&self) -> String {
        let path = self.path.as_deref().unwrap_or("");
        match self.base_url.as_deref() {
            Some(base_url) if !is_absolute_url(path) => combine_urls(base_url, path),
            _ => path.to_owned(),
        }
    }

    /// [`url`](Self::url) with the query parameters appended.
    ///
    /// Any fragment is dropped when parameters are added.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters cannot be url-encoded.
    pub fn full_url(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let mut url = self.url();
        let Some(params) = self.params.as_deref() else {
            return Ok(url);
        };

        let query = params.encode()?;
        if query.is_empty() {
            return Ok(url);
        }
        if let Some(hash) = url.find('#') {
            url.truncate(hash);
        }
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
        Ok(url)
    }

    /// The request body, when there is one to send.
    #[must_use]
    pub fn body(&self) -> Option<&Payload> {
        self.data.as_deref().filter(|payload| !payload.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn descriptor(config: RequestConfig) -> RequestDescriptor {
        RequestDescriptor::from_config(&RequestConfig::defaults().merge(&config))
    }

    #[test]
    fn joins_base_and_path_with_one_slash() {
        assert_eq!(combine_urls("http://a/", "/b"), "http://a/b");
        assert_eq!(combine_urls("http://a", "b"), "http://a/b");
        assert_eq!(combine_urls("http://a//", "//b"), "http://a/b");
        assert_eq!(combine_urls("http://a", ""), "http://a");
    }

    #[test]
    fn absolute_path_wins_over_base() {
        let d = descriptor(
            RequestConfig::default()
                .with_base_url("http://a")
                .with_path("https://b/c"),
        );
        assert_eq!(d.url(), "https://b/c");

        let d = descriptor(
            RequestConfig::default()
                .with_base_url("http://a")
                .with_path("//cdn/x"),
        );
        assert_eq!(d.url(), "//cdn/x");
    }

    #[test]
    fn params_are_appended() {
        let d = descriptor(
            RequestConfig::default()
                .with_base_url("http://a")
                .with_path("/search?lang=en#top")
                .with_params([("q", "rust lang")]),
        );
        assert_eq!(d.full_url().unwrap(), "http://a/search?lang=en&q=rust+lang");
    }

    #[test]
    fn body_dropped_for_bodyless_methods() {
        let d = descriptor(
            RequestConfig::default()
                .with_method(Method::Delete)
                .with_data(json!({"a": 1})),
        );
        assert!(d.data.is_none());

        let d = descriptor(
            RequestConfig::default()
                .with_method(Method::Put)
                .with_data(json!({"a": 1})),
        );
        assert_eq!(d.body(), Some(&Payload::Json(json!({"a": 1}))));
    }

    #[test]
    fn unset_fields_are_resolved() {
        let d = descriptor(RequestConfig::default());
        assert_eq!(d.method, Method::Get);
        assert_eq!(d.response_type, ResponseType::Json);
        assert!(!d.with_credentials);
        assert!(d.headers.is_empty());
        assert_eq!(d.url(), "");
    }
}
