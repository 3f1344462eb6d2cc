//! Immutable, partial request description and its merge rule

use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};

use super::hooks::{ProgressCallback, ResponseHook};
use super::types::{BasicAuth, Method, Params, Payload, ResponseType};

/// A partial description of a request.
///
/// Every field is optional. A builder resolves a request from the merge of
/// the system defaults with each configuration layered on top. Values are
/// never mutated once shared; heavy fields sit behind an `Arc` so merging
/// only bumps reference counts.
///
/// Fields are public so partial configurations can be written with struct
/// update syntax:
///
/// ```
/// use std::time::Duration;
/// use gromit_client::RequestConfig;
///
/// let base = RequestConfig::default().with_base_url("http://localhost:8080");
/// let slow = RequestConfig { timeout: Some(Duration::from_secs(30)), ..base.clone() };
/// assert_eq!(slow.base_url, base.base_url);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub method: Option<Method>,
    /// Path relative to `base_url`. `Some("")` is an explicit empty path.
    pub path: Option<Arc<str>>,
    /// Request body. Dropped for methods that do not send one.
    pub data: Option<Arc<Payload>>,
    pub params: Option<Arc<Params>>,
    pub headers: Option<Arc<HeaderMap>>,
    pub base_url: Option<Arc<str>>,
    pub timeout: Option<Duration>,
    /// Browser credential mode. Carried to the transport, which may ignore it.
    pub with_credentials: Option<bool>,
    pub auth: Option<Arc<BasicAuth>>,
    pub response_type: Option<ResponseType>,
    /// Largest response body accepted, in bytes.
    pub max_content_length: Option<u64>,
    pub max_redirects: Option<u32>,
    pub on_upload_progress: Option<ProgressCallback>,
    pub on_download_progress: Option<ProgressCallback>,
    pub before_response: Option<ResponseHook>,
}

fn pick<T: Clone>(overrides: &Option<T>, base: &Option<T>) -> Option<T> {
    overrides.as_ref().or(base.as_ref()).cloned()
}

impl RequestConfig {
    /// The configuration every builder starts from.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            method: Some(Method::Get),
            ..Self::default()
        }
    }

    /// Right-biased shallow merge.
    ///
    /// Every field set in `overrides` wins; everything else is taken from
    /// `self`. Neither input changes. Shared fields keep pointing at the same
    /// allocation.
    #[must_use]
    pub fn merge(&self, overrides: &RequestConfig) -> RequestConfig {
        RequestConfig {
            method: overrides.method.or(self.method),
            path: pick(&overrides.path, &self.path),
            data: pick(&overrides.data, &self.data),
            params: pick(&overrides.params, &self.params),
            headers: pick(&overrides.headers, &self.headers),
            base_url: pick(&overrides.base_url, &self.base_url),
            timeout: overrides.timeout.or(self.timeout),
            with_credentials: overrides.with_credentials.or(self.with_credentials),
            auth: pick(&overrides.auth, &self.auth),
            response_type: overrides.response_type.or(self.response_type),
            max_content_length: overrides.max_content_length.or(self.max_content_length),
            max_redirects: overrides.max_redirects.or(self.max_redirects),
            on_upload_progress: pick(&overrides.on_upload_progress, &self.on_upload_progress),
            on_download_progress: pick(&overrides.on_download_progress, &self.on_download_progress),
            before_response: pick(&overrides.before_response, &self.before_response),
        }
    }

    /// The method, `GET` when unset.
    #[must_use]
    pub fn resolved_method(&self) -> Method {
        self.method.unwrap_or_default()
    }

    /// The response type, `Json` when unset.
    #[must_use]
    pub fn resolved_response_type(&self) -> ResponseType {
        self.response_type.unwrap_or_default()
    }

    /// Short JSON summary, used when an error is rendered as JSON.
    #[must_use]
    pub fn describe(&self) -> Value {
        json!({
            "method": self.resolved_method(),
            "baseURL": self.base_url.as_deref(),
            "url": self.path.as_deref(),
            "timeout": self.timeout.and_then(|timeout| u64::try_from(timeout.as_millis()).ok()),
        })
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<str>) -> Self {
        self.path = Some(Arc::from(path.as_ref()));
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(Arc::new(data.into()));
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: impl Into<Params>) -> Self {
        self.params = Some(Arc::new(params.into()));
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = Some(Arc::from(base_url.as_ref()));
        self
    }

    /// Replace the whole header map.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(Arc::new(headers));
        self
    }

    /// Add one header on top of any headers already set.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        let mut headers = self.headers.as_deref().cloned().unwrap_or_default();
        headers.insert(name, value);
        self.headers = Some(Arc::new(headers));
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = Some(with_credentials);
        self
    }

    #[must_use]
    pub fn with_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    #[must_use]
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    #[must_use]
    pub fn with_max_content_length(mut self, max_content_length: u64) -> Self {
        self.max_content_length = Some(max_content_length);
        self
    }

    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = Some(max_redirects);
        self
    }

    #[must_use]
    pub fn with_upload_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_upload_progress = Some(callback);
        self
    }

    #[must_use]
    pub fn with_download_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_download_progress = Some(callback);
        self
    }

    #[must_use]
    pub fn with_before_response(mut self, hook: ResponseHook) -> Self {
        self.before_response = Some(hook);
        self
    }
}
