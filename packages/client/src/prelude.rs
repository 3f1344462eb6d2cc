//! Gromit prelude
//!
//! The types callers touch when building and running requests.

pub use crate::builder::RequestBuilder;
pub use crate::config::{
    BasicAuth, Method, Params, Payload, ProgressEvent, RequestConfig, ResponseHook, ResponseType,
    TransportConfig,
};
pub use crate::error::{BoxError, Error, ErrorData, GromitError, Result};
pub use crate::response::GromitResponse;
pub use crate::transport::{HyperTransport, RawResponse, RequestDescriptor, Transport};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
