//! Core `RequestBuilder` type and the merge operations every setter goes through

use std::fmt;
use std::sync::Arc;

use crate::config::{ProgressCallback, ProgressEvent, RequestConfig};
use crate::transport::Transport;

/// Immutable request builder
///
/// Cheap to clone: a clone shares both the configuration and the transport.
/// Nothing here ever changes a configuration that has already been handed
/// out, so builders can be reused and shared across tasks freely.
#[derive(Clone)]
#[must_use = "builders do nothing until a verb or fetch() runs them"]
pub struct RequestBuilder {
    pub(crate) config: Arc<RequestConfig>,
    pub(crate) transport: Arc<dyn Transport>,
}

impl RequestBuilder {
    /// Create a builder from a partial configuration.
    ///
    /// `config` is merged over [`RequestConfig::defaults`].
    pub fn new(config: RequestConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(RequestConfig::defaults().merge(&config)),
            transport,
        }
    }

    /// The resolved configuration.
    #[must_use]
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// The resolved configuration as the shared value it is stored in.
    #[must_use]
    pub fn shared_config(&self) -> &Arc<RequestConfig> {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// A new builder with `overrides` merged over this one's configuration.
    pub fn merge(&self, overrides: RequestConfig) -> Self {
        Self {
            config: Arc::new(self.config.merge(&overrides)),
            transport: Arc::clone(&self.transport),
        }
    }

    /// A new builder whose configuration is whatever `configure` returns.
    ///
    /// The result replaces the configuration outright and is then based on
    /// the defaults again, exactly like a freshly created builder.
    pub fn configure<F>(&self, configure: F) -> Self
    where
        F: FnOnce(&RequestConfig) -> RequestConfig,
    {
        Self::new(configure(&self.config), Arc::clone(&self.transport))
    }

    /// Report upload progress to `callback`.
    pub fn upload_progress<F>(&self, callback: F) -> Self
    where
        F: Fn(ProgressEvent) + Send + Sync + 'static,
    {
        self.merge(RequestConfig::default().with_upload_progress(ProgressCallback::new(callback)))
    }

    /// Report download progress to `callback`.
    pub fn download_progress<F>(&self, callback: F) -> Self
    where
        F: Fn(ProgressEvent) + Send + Sync + 'static,
    {
        self.merge(RequestConfig::default().with_download_progress(ProgressCallback::new(callback)))
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .finish()
    }
}
