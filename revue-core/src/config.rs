//! Configuration management for Revue
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REVUE_*)
//! 3. Config file (~/.config/revue/config.toml)
//! 4. Default values

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default review backend endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/review";

/// Review server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Endpoint of the review backend (answers with an event stream)
    pub endpoint: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Review server configuration
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/revue/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revue").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REVUE_ENDPOINT: Review backend endpoint URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("REVUE_ENDPOINT") {
            self.server.endpoint = endpoint;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.server.endpoint = endpoint;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(endpoint: Option<String>) -> Result<Self> {
        Ok(Self::load()?.with_env_overrides().with_cli_overrides(endpoint))
    }

    /// Parse the configured endpoint into a URL
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.server.endpoint)
            .map_err(|e| Error::Config(format!("Invalid endpoint '{}': {}", self.server.endpoint, e)))
    }
}
