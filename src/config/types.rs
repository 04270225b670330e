//! Configuration types.
//!
//! This module defines the enums and the library `Config` struct. The CLI
//! definitions in `cli.rs` convert into these types.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    AUTO_REFRESH_INTERVAL_SECS, DB_PATH, DEFAULT_BACKEND_URL, DEFAULT_IPINFO_BASE_URL,
    DEFAULT_TELEMETRY_URL, PROVIDER_TIMEOUT_SECS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the telemetry stream waits between reconnect attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReconnectMode {
    /// Constant 3 second delay, unbounded attempts
    Fixed,
    /// Doubling delay starting at 3 seconds, capped at 60 seconds
    Exponential,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use network_monitor::Config;
///
/// let config = Config {
///     backend_url: "http://10.0.0.2:3001".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// SQLite file backing the local key-value store
    pub db_path: PathBuf,

    /// Local backend proxy base URL
    pub backend_url: String,

    /// Base URL for direct geolocation lookups
    pub ipinfo_base_url: String,

    /// Optional ipinfo token used by the direct fallback
    pub ipinfo_token: Option<String>,

    /// WebSocket URL of the live telemetry channel
    pub telemetry_url: String,

    /// Per-provider timeout in seconds
    pub provider_timeout_seconds: u64,

    /// Telemetry reconnect behavior
    pub reconnect: ReconnectMode,

    /// Auto refresh interval in seconds
    pub auto_refresh_seconds: u64,
}

impl Config {
    /// Per-provider timeout as a `Duration`.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_seconds)
    }

    /// Auto refresh interval as a `Duration`.
    pub fn auto_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.auto_refresh_seconds)
    }

    /// Checks URLs and durations before any client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("backend URL", &self.backend_url, &["http", "https"], "http, https")?;
        check_url(
            "ipinfo base URL",
            &self.ipinfo_base_url,
            &["http", "https"],
            "http, https",
        )?;
        check_url("telemetry URL", &self.telemetry_url, &["ws", "wss"], "ws, wss")?;
        if self.provider_timeout_seconds == 0 {
            return Err(ConfigError::ZeroDuration {
                setting: "provider timeout",
            });
        }
        if self.auto_refresh_seconds == 0 {
            return Err(ConfigError::ZeroDuration {
                setting: "auto refresh interval",
            });
        }
        Ok(())
    }
}

fn check_url(
    setting: &'static str,
    value: &str,
    schemes: &[&str],
    expected: &'static str,
) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        setting,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if !schemes.contains(&parsed.scheme()) {
        return Err(ConfigError::UnsupportedScheme {
            setting,
            value: value.to_string(),
            expected,
        });
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            ipinfo_base_url: DEFAULT_IPINFO_BASE_URL.to_string(),
            ipinfo_token: None,
            telemetry_url: DEFAULT_TELEMETRY_URL.to_string(),
            provider_timeout_seconds: PROVIDER_TIMEOUT_SECS,
            reconnect: ReconnectMode::Fixed,
            auto_refresh_seconds: AUTO_REFRESH_INTERVAL_SECS,
        }
    }
}
