//! Request and transport configuration
//!
//! [`RequestConfig`] is the immutable, partial request description that
//! builders merge; [`TransportConfig`] configures the default transport.

pub mod client;
pub mod core;
pub mod hooks;
pub mod request_config;
pub mod types;
pub mod validation;

pub use self::core::{DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT, TransportConfig};
pub use hooks::{ProgressCallback, ProgressEvent, ResponseHook};
pub use request_config::RequestConfig;
pub use types::{BasicAuth, Method, Params, Payload, ResponseType};
