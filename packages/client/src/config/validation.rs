//! Sanity checks for transport configuration

use std::time::Duration;

use super::core::TransportConfig;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(300);

impl TransportConfig {
    /// Check the configuration before a transport is built from it.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(timeout) = self.connect_timeout {
            if timeout.is_zero() {
                return Err("Connect timeout must be greater than zero".to_string());
            }
            if timeout > MAX_CONNECT_TIMEOUT {
                return Err("Connect timeout must not exceed 5 minutes".to_string());
            }
        }

        if self.user_agent.is_empty() {
            return Err("User agent cannot be empty".to_string());
        }
        if self.user_agent.len() > 1000 {
            return Err("User agent must not exceed 1000 characters".to_string());
        }

        Ok(())
    }
}
