//! Session housekeeping configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for the session store and its background sweeper.
///
/// Loaded from TOML; every field has a default, so an empty file is valid.
///
/// ```toml
/// inactivity_timeout_secs = 1800
/// sweep_interval_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DamesConfig {
    /// Seconds without a move before a session is evicted.
    #[serde(default = "default_inactivity_timeout_secs")]
    inactivity_timeout_secs: u64,

    /// Seconds between sweeps for inactive sessions.
    #[serde(default = "default_sweep_interval_secs")]
    sweep_interval_secs: u64,
}

#[instrument]
fn default_inactivity_timeout_secs() -> u64 {
    30 * 60
}

#[instrument]
fn default_sweep_interval_secs() -> u64 {
    5 * 60
}

impl DamesConfig {
    /// Creates a configuration, rejecting zero durations.
    #[instrument]
    pub fn new(
        inactivity_timeout_secs: u64,
        sweep_interval_secs: u64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            inactivity_timeout_secs,
            sweep_interval_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            inactivity_timeout_secs = config.inactivity_timeout_secs,
            sweep_interval_secs = config.sweep_interval_secs,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Replaces fields with command-line overrides where given.
    #[instrument(skip(self))]
    pub fn with_overrides(
        self,
        inactivity_timeout_secs: Option<u64>,
        sweep_interval_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            inactivity_timeout_secs: inactivity_timeout_secs
                .unwrap_or(self.inactivity_timeout_secs),
            sweep_interval_secs: sweep_interval_secs.unwrap_or(self.sweep_interval_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// How long a session may sit idle.
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    /// How often the sweeper runs.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ConfigError> {
        if self.inactivity_timeout_secs == 0 {
            return Err(ConfigError::new("inactivity_timeout_secs must be positive".to_string()));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::new("sweep_interval_secs must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for DamesConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_inactivity_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
