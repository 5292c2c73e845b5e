//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export HASURA_ENDPOINT="https://my-project.hasura.app/v1/graphql"
//! export ADMIN_SECRET="..."
//! export PORT="5000"
//! ```
//!
//! ## Required Variables
//!
//! `HASURA_ENDPOINT` and `ADMIN_SECRET`, unless `STORE_BACKEND=memory`.
//!
//! ## Optional Variables
//!
//! - `STORE_BACKEND` - `hasura` or `memory` (default: `hasura`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`)
//! - `PORT` - Port used when `LISTEN` is not set (default: `5000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `STORE_TIMEOUT_SECONDS` - Per-request store timeout (default: 10)
//! - `STORE_RETRY_ATTEMPTS` - Extra attempts for read queries (default: 2, max: 10)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Hasura,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hasura" => Ok(Self::Hasura),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'hasura' or 'memory', got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hasura => write!(f, "hasura"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub hasura_endpoint: Option<String>,
    /// Sent as `x-hasura-admin-secret`; never logged.
    pub admin_secret: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub store_timeout_seconds: u64,
    pub store_retry_attempts: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_BACKEND` has an unknown value, or if a
    /// numeric store setting cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let store_backend = env::var("STORE_BACKEND")
            .ok()
            .map(|v| v.parse::<StoreBackend>())
            .transpose()
            .context("Failed to load store configuration")?
            .unwrap_or(StoreBackend::Hasura);

        let hasura_endpoint = env::var("HASURA_ENDPOINT").ok();
        let admin_secret = env::var("ADMIN_SECRET").ok();

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let store_timeout_seconds = env::var("STORE_TIMEOUT_SECONDS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("STORE_TIMEOUT_SECONDS must be a whole number of seconds")?
            .unwrap_or(10);

        let store_retry_attempts = env::var("STORE_RETRY_ATTEMPTS")
            .ok()
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("STORE_RETRY_ATTEMPTS must be a non-negative integer")?
            .unwrap_or(2);

        Ok(Self {
            store_backend,
            hasura_endpoint,
            admin_secret,
            listen_addr,
            log_level,
            log_format,
            store_timeout_seconds,
            store_retry_attempts,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT`, with `PORT` defaulting to `5000`
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the Hasura backend is selected without an endpoint or admin secret
    /// - `HASURA_ENDPOINT` is not an http(s) URL
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - store timeout or retry settings are out of range
    pub fn validate(&self) -> Result<()> {
        if self.store_backend == StoreBackend::Hasura {
            let endpoint = self
                .hasura_endpoint
                .as_deref()
                .context("HASURA_ENDPOINT must be set when STORE_BACKEND is 'hasura'")?;

            let parsed = Url::parse(endpoint)
                .with_context(|| format!("HASURA_ENDPOINT is not a valid URL: '{}'", endpoint))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!(
                    "HASURA_ENDPOINT must use http or https, got '{}'",
                    parsed.scheme()
                );
            }

            if self.admin_secret.as_deref().is_none_or(str::is_empty) {
                anyhow::bail!("ADMIN_SECRET must be set when STORE_BACKEND is 'hasura'");
            }
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_timeout_seconds == 0 {
            anyhow::bail!("STORE_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.store_retry_attempts > 10 {
            anyhow::bail!(
                "STORE_RETRY_ATTEMPTS must be between 0 and 10, got {}",
                self.store_retry_attempts
            );
        }

        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Store backend: {}", self.store_backend);

        if let Some(ref endpoint) = self.hasura_endpoint {
            tracing::info!("  Hasura endpoint: {}", endpoint);
        }
        tracing::info!(
            "  Admin secret: {}",
            if self.admin_secret.is_some() {
                "***"
            } else {
                "not set"
            }
        );

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Store timeout: {}s, read retries: {}",
            self.store_timeout_seconds,
            self.store_retry_attempts
        );
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
