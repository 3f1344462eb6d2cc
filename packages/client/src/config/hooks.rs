//! Callbacks a request configuration can carry

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::BoxError;
use crate::response::GromitResponse;

/// Bytes moved so far for an upload or download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub loaded: u64,
    /// Total size when known up front, eg. from `Content-Length`.
    pub total: Option<u64>,
}

impl ProgressEvent {
    /// Fraction complete in `0.0..=1.0`, when the total is known.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some((self.loaded as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Shared progress callback.
#[derive(Clone)]
pub struct ProgressCallback(Arc<dyn Fn(ProgressEvent) + Send + Sync>);

impl ProgressCallback {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(ProgressEvent) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub fn call(&self, event: ProgressEvent) {
        (self.0)(event);
    }
}

impl fmt::Debug for ProgressCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgressCallback")
    }
}

type HookFn =
    dyn Fn(GromitResponse) -> BoxFuture<'static, Result<GromitResponse, BoxError>> + Send + Sync;

/// Runs on every successful response before it is handed back.
///
/// The hook may replace the response. A failing hook fails the fetch with
/// [`Error::Hook`](crate::Error::Hook) and its error is passed through as is.
#[derive(Clone)]
pub struct ResponseHook(Arc<HookFn>);

impl ResponseHook {
    /// Async hook.
    pub fn new<F, Fut>(hook: F) -> Self
    where
        F: Fn(GromitResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<GromitResponse, BoxError>> + Send + 'static,
    {
        Self(Arc::new(move |response| hook(response).boxed()))
    }

    /// Hook that does not need to await anything.
    pub fn sync<F>(hook: F) -> Self
    where
        F: Fn(GromitResponse) -> Result<GromitResponse, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(move |response| {
            let result = hook(response);
            async move { result }.boxed()
        }))
    }

    pub async fn call(&self, response: GromitResponse) -> Result<GromitResponse, BoxError> {
        (self.0)(response).await
    }
}

impl fmt::Debug for ResponseHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResponseHook")
    }
}
