//! CLI configuration file support
//!
//! Loads configuration from ~/.config/compliance/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "info";

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default settings
    #[serde(default)]
    pub default: DefaultConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default values for login options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Server used when `login` is given no SERVER argument
    pub server: Option<String>,
    /// Disable TLS certificate validation unless overridden
    #[serde(default)]
    pub insecure: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive (e.g. "info", "compliance_core=debug")
    pub level: Option<String>,
}

impl CliConfig {
    /// Load configuration from default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("compliance").join("config.toml"))
    }

    /// Filter directive for the log file; `--verbose` wins over the file.
    pub fn log_level(&self, verbose: bool) -> &str {
        if verbose {
            return "debug";
        }
        self.logging
            .level
            .as_deref()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// SERVER argument, falling back to the configured default.
    pub fn server(&self, arg: Option<String>) -> Option<String> {
        arg.filter(|s| !s.trim().is_empty())
            .or_else(|| self.default.server.clone())
    }

    pub fn insecure(&self, flag: bool) -> bool {
        flag || self.default.insecure
    }
}
