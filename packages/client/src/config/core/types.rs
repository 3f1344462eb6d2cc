//! Transport configuration structure and field definitions
//!
//! Settings for the default hyper transport: connection pool, connect
//! timeout, redirect limit and the identity sent with every request.

use std::time::Duration;

/// Configuration for [`HyperTransport`](crate::transport::HyperTransport)
///
/// Request-level settings (timeout, redirect limit, size limit) live on
/// [`RequestConfig`](crate::RequestConfig) and win over these when set.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,

    /// Connection timeout
    pub connect_timeout: Option<Duration>,

    /// Pool idle timeout
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Redirects followed when the request does not set its own limit
    pub max_redirects: u32,

    /// Enable TCP_NODELAY
    pub tcp_nodelay: bool,

    /// TCP keep-alive duration
    pub tcp_keepalive: Option<Duration>,
}
