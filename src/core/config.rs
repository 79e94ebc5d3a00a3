//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::domains::instrument::fetcher::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::domains::instrument::retry::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::domains::instrument::{HttpFetcher, Instrument, RetryPolicy};

/// Key under `mcpServers` this server registers itself as.
pub const DEFAULT_SERVER_KEY: &str = "claude-light";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Remote instrument access.
    pub instrument: InstrumentConfig,

    /// Host config registration.
    pub registration: RegistrationConfig,
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

/// How to reach the instrument and how hard to try.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Endpoint URL; settings are sent as `R`, `G`, `B` query fields.
    pub endpoint: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Total attempts per fetch.
    pub max_attempts: u32,

    /// Fixed pause between attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

/// Where and under which key to register in the host config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Entry name under `mcpServers`.
    pub server_key: String,

    /// Explicit host config path. When unset the platform default is used.
    pub host_config_path: Option<PathBuf>,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: u64::try_from(DEFAULT_RETRY_DELAY.as_millis()).unwrap_or(2000),
        }
    }
}

impl InstrumentConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    /// Build the instrument client this configuration describes.
    pub fn build(&self) -> Instrument<HttpFetcher> {
        Instrument::new(
            HttpFetcher::new(&self.endpoint, Duration::from_secs(self.timeout_secs)),
            self.retry_policy(),
        )
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            server_key: DEFAULT_SERVER_KEY.to_string(),
            host_config_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "claude-light".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            instrument: InstrumentConfig::default(),
            registration: RegistrationConfig::default(),
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
    /// `MCP_LOG_LEVEL`). Instrument and registration
    /// settings use `CLAUDE_LIGHT_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(endpoint) = std::env::var("CLAUDE_LIGHT_URL") {
            info!("Instrument endpoint overridden: {}", endpoint);
            config.instrument.endpoint = endpoint;
        }

        parse_env("CLAUDE_LIGHT_TIMEOUT_SECS", &mut config.instrument.timeout_secs);
        parse_env("CLAUDE_LIGHT_MAX_ATTEMPTS", &mut config.instrument.max_attempts);
        parse_env("CLAUDE_LIGHT_RETRY_DELAY_MS", &mut config.instrument.retry_delay_ms);

        if let Ok(path) = std::env::var("CLAUDE_LIGHT_HOST_CONFIG") {
            config.registration.host_config_path = Some(PathBuf::from(path));
        }

        config
    }
}

/// Overwrite `target` with a parsed env var, keeping the default on bad input.
fn parse_env<T: FromStr>(key: &str, target: &mut T) {
    let Ok(raw) = std::env::var(key) else {
        return;
    };
    match raw.parse() {
        Ok(value) => *target = value,
        Err(_) => warn!("Ignoring invalid {}={:?}, keeping default", key, raw),
    }
}
