//! Lazy configuration setters
//!
//! Each setter is shorthand for [`merge`](RequestBuilder::merge) with a single
//! field set.

use std::time::Duration;

use crate::config::{Params, Payload, RequestConfig, ResponseHook, ResponseType};
use crate::error::BoxError;
use crate::response::GromitResponse;

use super::core::RequestBuilder;

impl RequestBuilder {
    pub fn base_url(&self, base_url: impl AsRef<str>) -> Self {
        self.merge(RequestConfig::default().with_base_url(base_url))
    }

    pub fn path(&self, path: impl AsRef<str>) -> Self {
        self.merge(RequestConfig::default().with_path(path))
    }

    pub fn data(&self, data: impl Into<Payload>) -> Self {
        self.merge(RequestConfig::default().with_data(data))
    }

    pub fn params(&self, params: impl Into<Params>) -> Self {
        self.merge(RequestConfig::default().with_params(params))
    }

    /// Fail the request when it takes longer than `timeout`. Zero disables it.
    pub fn timeout(&self, timeout: Duration) -> Self {
        self.merge(RequestConfig::default().with_timeout(timeout))
    }

    pub fn response_type(&self, response_type: ResponseType) -> Self {
        self.merge(RequestConfig::default().with_response_type(response_type))
    }

    /// Reject response bodies larger than `max` bytes.
    pub fn max_content_length(&self, max: u64) -> Self {
        self.merge(RequestConfig::default().with_max_content_length(max))
    }

    /// Follow at most `max` redirects. Zero disables following.
    pub fn max_redirects(&self, max: u32) -> Self {
        self.merge(RequestConfig::default().with_max_redirects(max))
    }

    pub fn with_credentials(&self, with_credentials: bool) -> Self {
        self.merge(RequestConfig::default().with_credentials(with_credentials))
    }

    /// Run `hook` on every successful response before it is returned.
    pub fn before_response<F>(&self, hook: F) -> Self
    where
        F: Fn(GromitResponse) -> Result<GromitResponse, BoxError> + Send + Sync + 'static,
    {
        self.merge(RequestConfig::default().with_before_response(ResponseHook::sync(hook)))
    }

    /// Like [`before_response`](Self::before_response) with an already built,
    /// possibly async hook.
    pub fn response_hook(&self, hook: ResponseHook) -> Self {
        self.merge(RequestConfig::default().with_before_response(hook))
    }
}
