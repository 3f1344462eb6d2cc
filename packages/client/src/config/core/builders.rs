//! Builder methods for transport configuration

use std::time::Duration;

use super::types::TransportConfig;

impl TransportConfig {
    /// Set the user agent sent with every request
    ///
    /// # Examples
    /// ```
    /// use gromit_client::TransportConfig;
    ///
    /// let config = TransportConfig::default().with_user_agent("my-app/1.0");
    /// assert_eq!(config.user_agent, "my-app/1.0");
    /// ```
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the default redirect limit; zero disables redirects
    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}
