//! Configuration
//!
//! TOML-backed defaults for terminal sessions. Configuration is optional:
//! every field has a default, loading falls back to those defaults when no
//! file is found, and session setters override loaded values per instance.
//!
//! Lookup order: explicit path, `$TERMSYNC_CONFIG`, the platform config
//! directory (`~/.config/termsync/config.toml` on Linux), then
//! `~/.termsync/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid settle window: {0} ms (must be greater than 0)")]
    InvalidSettleWindow(u64),

    #[error("Invalid timeout: {0} ms (must be greater than 0 when set)")]
    InvalidTimeout(u64),

    #[error("Working directory does not exist: {0}")]
    WorkingDirNotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session defaults loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Timeout bounding the wait for child exit, in milliseconds.
    /// Absent means wait indefinitely.
    pub timeout_ms: Option<u64>,

    /// Settle window in milliseconds
    pub settle_window_ms: u64,

    /// Whether command failures and timeouts raise errors
    pub break_on_error: bool,

    /// Whether children inherit this process's environment
    pub inherit_env: bool,

    /// Working directory for spawned commands; absent means the current
    /// directory at session creation
    pub working_dir: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            settle_window_ms: crate::terminal::DEFAULT_SETTLE_WINDOW.as_millis() as u64,
            break_on_error: false,
            inherit_env: true,
            working_dir: None,
        }
    }
}

impl TerminalConfig {
    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default locations, falling back to
    /// defaults when no file is found or a file fails to load
    pub fn load() -> Self {
        for path in Self::default_locations() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    debug!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("ignoring config at {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }

    /// Candidate config file locations, in precedence order
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();
        if let Ok(path) = std::env::var("TERMSYNC_CONFIG") {
            locations.push(PathBuf::from(path));
        }
        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("termsync").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            locations.push(home.join(".termsync").join("config.toml"));
        }
        locations
    }

    /// Validate field ranges and referenced paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_window_ms == 0 {
            return Err(ConfigError::InvalidSettleWindow(self.settle_window_ms));
        }
        if let Some(0) = self.timeout_ms {
            return Err(ConfigError::InvalidTimeout(0));
        }
        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(ConfigError::WorkingDirNotFound(dir.clone()));
            }
        }
        Ok(())
    }

    /// The configured timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// The configured settle window as a `Duration`
    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_window_ms)
    }
}
