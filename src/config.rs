//! Configuration loading and constants.
//!
//! Every setting has a built-in default so the service starts without any
//! configuration file. Settings are layered: defaults, then an optional TOML
//! file, then environment variables, then command line flags (applied in
//! `main`). Worker timing and the shutdown window are fixed constants.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// Worker and Lifecycle Constants
// =============================================================================

/// Interval between worker ticks in seconds
pub const WORKER_TICK_INTERVAL_SECS: u64 = 5;

/// Maximum time in seconds in-flight requests may drain after a termination signal
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

pub const WORKER_TICK_INTERVAL: Duration = Duration::from_secs(WORKER_TICK_INTERVAL_SECS);
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(SHUTDOWN_TIMEOUT_SECS);

/// Key recorded by the worker on every tick
pub const SIMULATED_LOG_KEY: &str = "simulated-log";

/// Capacity of the termination signal channel
pub const SIGNAL_CHANNEL_CAPACITY: usize = 1;

// =============================================================================
// HTTP Probes
// =============================================================================

/// Probe responses must never be served from a cache
pub const CACHE_CONTROL_PROBES: &str = "no-store";

/// Header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Default Settings
// =============================================================================

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 9000;

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "log_processor=info,tower_http=info";

/// Environment variable overriding the listener port
pub const ENV_PORT: &str = "PORT";

/// Environment variable holding the log filter
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Look up an environment variable, falling back to `default` when it is
/// unset or empty.
pub fn get_env(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => default.to_string(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply port overrides on top of file or default settings.
    ///
    /// A port given on the command line wins, and `PORT` is not consulted.
    pub fn apply_overrides(&mut self, cli_port: Option<u16>) -> Result<(), ConfigError> {
        if let Some(port) = cli_port {
            self.http.port = port;
            return Ok(());
        }

        let port = get_env(ENV_PORT, &self.http.port.to_string());
        self.http.port = port.parse().map_err(|_| {
            ConfigError::Validation(format!("{ENV_PORT} must be a valid TCP port, got '{port}'"))
        })?;
        Ok(())
    }

    /// Listener address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
