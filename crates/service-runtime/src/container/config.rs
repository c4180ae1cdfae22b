//! # Service Configuration
//!
//! Environment-driven configuration for the runtime. Every variable has
//! a sane default; a present-but-unparseable numeric value is a startup
//! error rather than a silent fallback.

use thiserror::Error;

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service name printed in the startup banner.
    pub service_name: String,
    /// Event bus channel capacity.
    pub bus_capacity: usize,
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "agora".to_string(),
            bus_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a non-numeric value.
    #[error("Environment variable {var} is not a valid number: \"{value}\"")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AGORA_SERVICE_NAME`: Banner name (default: agora)
    /// - `AGORA_BUS_CAPACITY`: Event bus capacity (default: 1000)
    /// - `AGORA_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("AGORA_SERVICE_NAME") {
            config.service_name = name;
        }

        if let Ok(capacity) = std::env::var("AGORA_BUS_CAPACITY") {
            config.bus_capacity =
                capacity
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: "AGORA_BUS_CAPACITY",
                        value: capacity,
                    })?;
        }

        if let Ok(level) = std::env::var("AGORA_LOG_LEVEL").or_else(|_| std::env::var("RUST_LOG")) {
            config.log_level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.service_name, "agora");
        assert_eq!(config.bus_capacity, 1000);
        assert_eq!(config.log_level, "info");
    }
}
