//! Request builder
//!
//! A [`RequestBuilder`] holds one shared, immutable [`RequestConfig`] and the
//! transport that will run it. Configuration methods return a new builder
//! with a merged configuration; verbs and [`fetch`](RequestBuilder::fetch)
//! execute it.
//!
//! [`RequestConfig`]: crate::RequestConfig

pub mod auth;
pub mod configuration;
pub mod core;
pub mod headers;
pub mod methods;

pub use self::core::RequestBuilder;
