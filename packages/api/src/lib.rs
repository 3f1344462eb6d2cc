//! # Gromit
//!
//! Chainable, immutable HTTP request builder with classified errors.
//!
//! Every configuration step returns a new builder; nothing a builder has
//! handed out ever changes. Failures of any kind come back as a
//! [`GromitError`] with a status code, a stable name and a message, which
//! survive being squashed into a single string.
//!
//! ```no_run
//! use gromit::{Payload, RequestConfig};
//! use serde_json::json;
//!
//! # async fn run() -> gromit::Result<()> {
//! let api = gromit::new(RequestConfig::default().with_base_url("http://localhost:8080"));
//!
//! let created = api
//!     .bearer_auth("secret")
//!     .post("/users", Payload::from(json!({"name": "wallace"})), None)
//!     .await?;
//! assert_eq!(created.status_code(), 201);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::{Arc, OnceLock};

pub mod requesters;

// Re-export the public API of the client package
pub use gromit_client::prelude::*;
pub use gromit_client::{builder, config, error, response, status, transport};
pub use gromit_client::config::{ProgressCallback, ProgressEvent};
pub use gromit_client::error::{ErrorMessage, TransportContext};
pub use gromit_client::transport::{RequestHandle, SentRequest, TransportError};

pub use requesters::graphql::{GraphqlRequester, graphql_request, graphql_request_with};

/// Shared default transport, created on first use
static DEFAULT_TRANSPORT: OnceLock<Arc<dyn Transport>> = OnceLock::new();

/// Get the default transport
///
/// A pooled [`HyperTransport`] with [`TransportConfig::default`] unless
/// [`init_default_transport`] ran first. Every builder created without an
/// explicit transport shares it.
pub fn default_transport() -> Arc<dyn Transport> {
    DEFAULT_TRANSPORT
        .get_or_init(|| Arc::new(HyperTransport::new()))
        .clone()
}

/// Initialize the default transport with custom configuration
///
/// Returns false, keeping whatever transport is already in place, when the
/// configuration is invalid or the default transport was already created.
pub fn init_default_transport(config: TransportConfig) -> bool {
    if let Err(e) = config.validate() {
        tracing::error!(
            "Failed to initialize default transport with custom config: {}, using default transport",
            e
        );
        return false;
    }

    let transport: Arc<dyn Transport> = Arc::new(HyperTransport::with_config(config));
    if DEFAULT_TRANSPORT.set(transport).is_err() {
        log::warn!("Default transport already initialized, ignoring new configuration");
        return false;
    }
    true
}

/// Main entry point providing builder factories
pub struct Gromit;

impl Gromit {
    /// Create a builder from a partial configuration using the default transport
    pub fn new(config: RequestConfig) -> RequestBuilder {
        RequestBuilder::new(config, default_transport())
    }

    /// Create a builder from a partial configuration with a custom transport
    pub fn with_transport(config: RequestConfig, transport: Arc<dyn Transport>) -> RequestBuilder {
        RequestBuilder::new(config, transport)
    }
}

/// Create a builder from a partial configuration using the default transport
///
/// Shorthand for `Gromit::new(config)`
pub fn new(config: RequestConfig) -> RequestBuilder {
    Gromit::new(config)
}

/// Create a builder from a partial configuration with a custom transport
///
/// Shorthand for `Gromit::with_transport(config, transport)`
pub fn with_transport(config: RequestConfig, transport: Arc<dyn Transport>) -> RequestBuilder {
    Gromit::with_transport(config, transport)
}
