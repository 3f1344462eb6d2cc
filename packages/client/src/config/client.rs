//! Transport configuration presets

use std::time::Duration;

use super::core::TransportConfig;

impl TransportConfig {
    /// Preset for talking to services on the same host or network
    ///
    /// Short connect timeout, no redirects and a small pool. Useful in tests
    /// and for sidecar style services where waiting never helps.
    ///
    /// # Examples
    /// ```
    /// use gromit_client::TransportConfig;
    ///
    /// let config = TransportConfig::fast_fail();
    /// assert_eq!(config.max_redirects, 0);
    /// ```
    #[must_use]
    pub fn fast_fail() -> Self {
        Self {
            connect_timeout: Some(Duration::from_millis(500)),
            pool_idle_timeout: Some(Duration::from_secs(5)),
            pool_max_idle_per_host: 4,
            max_redirects: 0,
            ..Self::default()
        }
    }

    /// Preset for slow upstreams
    ///
    /// Longer connect timeout and idle pool, more redirects allowed.
    #[must_use]
    pub fn patient() -> Self {
        Self {
            connect_timeout: Some(Duration::from_secs(30)),
            pool_idle_timeout: Some(Duration::from_secs(300)),
            max_redirects: 10,
            tcp_keepalive: Some(Duration::from_secs(30)),
            ..Self::default()
        }
    }
}
