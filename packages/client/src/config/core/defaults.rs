//! Default values for `TransportConfig`

use std::time::Duration;

use super::types::TransportConfig;

/// Redirects followed when nothing else is configured.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// User agent sent when nothing else is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("gromit/", env!("CARGO_PKG_VERSION"));

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Some(Duration::from_secs(10)),
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            tcp_nodelay: true,
            tcp_keepalive: Some(Duration::from_secs(60)),
        }
    }
}
