//! Transport configuration types and default implementations
//!
//! - `types`: the `TransportConfig` struct
//! - `defaults`: default values
//! - `builders`: fluent setters

pub mod builders;
pub mod defaults;
pub mod types;

pub use defaults::{DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT};
pub use types::TransportConfig;
