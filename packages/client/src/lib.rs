//! # Gromit client
//!
//! Immutable HTTP request builder with classified errors.
//!
//! A [`RequestBuilder`] wraps one immutable [`RequestConfig`]. Chained
//! configuration returns new builders; verbs execute the merged configuration
//! against a [`Transport`]. A success comes back as a [`GromitResponse`]. Any
//! failure comes back as a [`GromitError`] carrying a status code, a stable
//! name, a message and optional data, which can be folded into a single
//! string and recovered again.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use gromit_client::{HyperTransport, RequestBuilder, RequestConfig};
//!
//! # async fn run() -> gromit_client::Result<()> {
//! let api = RequestBuilder::new(
//!     RequestConfig::default().with_base_url("http://localhost:8080"),
//!     Arc::new(HyperTransport::new()),
//! );
//!
//! match api.get("/users/1", None).await {
//!     Ok(response) => println!("{:?}", response.json()),
//!     Err(err) => match err.classified() {
//!         Some(err) => eprintln!("{}", err.serialize()),
//!         None => eprintln!("{err}"),
//!     },
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod config;
pub mod error;
pub mod response;
pub mod status;
pub mod transport;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;
