//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::provider::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Geoapify gateway configuration.
    pub provider: ProviderConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the Geoapify request gateway.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Geoapify API key, sent as the `apiKey` query parameter.
    /// Get a key at: https://myprojects.geoapify.com
    pub api_key: Option<String>,

    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// Per-request timeout. `None` leaves reqwest's default (no timeout).
    pub request_timeout_secs: Option<u64>,

    /// Delay before the single follow-up fetch of an isoline job.
    pub isoline_retry_delay_ms: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("isoline_retry_delay_ms", &self.isoline_retry_delay_ms)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: Some(30),
            isoline_retry_delay_ms: 200,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "geoapify-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...). The API key is read from `GEOAPIFY_KEY`, with
    /// `MCP_GEOAPIFY_KEY` taking precedence when both are set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        let api_key = std::env::var("MCP_GEOAPIFY_KEY")
            .or_else(|_| std::env::var("GEOAPIFY_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        match api_key {
            Some(key) => {
                config.provider.api_key = Some(key);
                info!("Geoapify API key loaded from environment");
            }
            None => warn!("GEOAPIFY_KEY is not set; every tool call will fail"),
        }

        if let Ok(base_url) = std::env::var("MCP_GEOAPIFY_BASE_URL") {
            config.provider.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_GEOAPIFY_TIMEOUT_SECS") {
            config.provider.request_timeout_secs = match timeout.parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!("Ignoring invalid MCP_GEOAPIFY_TIMEOUT_SECS: {}", timeout);
                    config.provider.request_timeout_secs
                }
            };
        }

        if let Ok(delay) = std::env::var("MCP_ISOLINE_RETRY_DELAY_MS") {
            match delay.parse() {
                Ok(ms) => config.provider.isoline_retry_delay_ms = ms,
                Err(_) => warn!("Ignoring invalid MCP_ISOLINE_RETRY_DELAY_MS: {}", delay),
            }
        }

        config
    }

    /// Check that the configuration can serve tool calls.
    pub fn validate(&self) -> Result<()> {
        match self.provider.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(Error::config(
                "GEOAPIFY_KEY environment variable not set (get a key at https://myprojects.geoapify.com)",
            )),
        }
    }
}
