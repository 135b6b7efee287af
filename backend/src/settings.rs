//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `SALON_*` environment variables or a `.salon.toml`
//! configuration file. Command-line flags belong to the admin binary and
//! take precedence over anything loaded here.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Raised when the configuration sources cannot be merged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load settings: {message}")]
pub struct SettingsError {
    pub message: String,
}

/// Settings shared by every entry point.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SALON")]
pub struct SalonSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_max_size: Option<u32>,
    /// Minimum number of idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl SalonSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source holds a malformed value.
    pub fn from_environment() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("salon-admin")]).map_err(|err| SettingsError {
            message: err.to_string(),
        })
    }

    /// Pool configuration for `database_url`; unset tuning values keep the
    /// pool defaults.
    pub fn pool_config(&self, database_url: impl Into<String>) -> PoolConfig {
        let mut config = PoolConfig::new(database_url);
        if let Some(max_size) = self.pool_max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(min_idle) = self.pool_min_idle {
            config = config.with_min_idle(Some(min_idle));
        }
        if let Some(secs) = self.connection_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        config
    }
}
