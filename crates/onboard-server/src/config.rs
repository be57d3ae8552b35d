// File: src/config.rs
// Purpose: Configuration parsing from onboard.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::theme::Theme;

/// Overrides `[submit] endpoint`
pub const ENDPOINT_ENV: &str = "ONBOARD_ENDPOINT";

/// Overrides `[form] theme`
pub const THEME_ENV: &str = "ONBOARD_THEME";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub submit: SubmitConfig,

    #[serde(default)]
    pub form: FormConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Seconds a visitor's form may sit untouched before it is dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

/// Where completed forms are posted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Presentation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub theme: Theme,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

fn default_endpoint() -> String {
    onboard::DEFAULT_ENDPOINT.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./onboard.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("onboard.toml")
    }

    /// Apply environment overrides. An unparsable theme is logged and ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(std::env::var(ENDPOINT_ENV).ok(), std::env::var(THEME_ENV).ok())
    }

    fn with_overrides(mut self, endpoint: Option<String>, theme: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.submit.endpoint = endpoint;
        }
        if let Some(theme) = theme {
            match theme.parse::<Theme>() {
                Ok(theme) => self.form.theme = theme,
                Err(e) => warn!("{}: {}", THEME_ENV, e),
            }
        }
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.server.session_idle_secs)
    }
}
