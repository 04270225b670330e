//! Error type definitions.
//!
//! This module defines the error enums for each concern plus the provider and
//! outcome kinds tracked by `ProviderStats`.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL setting could not be parsed.
    #[error("{setting} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        setting: &'static str,
        value: String,
        reason: String,
    },

    /// A URL setting uses a scheme the client cannot speak.
    #[error("{setting} must use one of {expected}, got {value}")]
    UnsupportedScheme {
        setting: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Timeouts and intervals must be at least one second.
    #[error("{setting} must be greater than zero")]
    ZeroDuration { setting: &'static str },
}

/// Target input rejected before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing was entered.
    #[error("Please enter an IP address or domain name")]
    Empty,

    /// Input is neither a dotted IPv4 address nor a domain name.
    #[error("Please enter a valid IP address or domain name: {0}")]
    Invalid(String),
}

/// Failure of a single data provider.
///
/// Provider failures are isolated: the aggregated lookup turns them into an
/// absent section rather than propagating them.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport or status error from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The provider did not answer within its timeout.
    #[error("{provider} provider timed out after {seconds}s")]
    Timeout {
        provider: ProviderKind,
        seconds: u64,
    },

    /// No strategy can serve this provider (e.g. no credentialed access).
    #[error("{0}")]
    Unavailable(String),

    /// The provider answered with something we could not use.
    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Error types for the local key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Invalid input to the change calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChangeError {
    #[error("Amount must be a number, got {0}")]
    NotFinite(f64),

    #[error("Amount must not be negative, got {0}")]
    Negative(f64),
}

/// Errors raised by the live telemetry connection.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Telemetry stream closed by server")]
    Closed,
}

/// The three independent data providers behind a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProviderKind {
    Geolocation,
    Latency,
    Threat,
}

/// Result of one provider call, as counted by `ProviderStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProviderOutcome {
    Success,
    Failure,
    Timeout,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Geolocation => "Geolocation",
            ProviderKind::Latency => "Latency",
            ProviderKind::Threat => "Threat",
        }
    }
}

impl ProviderOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderOutcome::Success => "success",
            ProviderOutcome::Failure => "failure",
            ProviderOutcome::Timeout => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_provider_kinds_have_string_representation() {
        for kind in ProviderKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have a name", kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::Empty.to_string(),
            "Please enter an IP address or domain name"
        );
        assert!(ValidationError::Invalid("not valid".into())
            .to_string()
            .contains("not valid"));
    }

    #[test]
    fn test_timeout_error_names_provider() {
        let err = ProviderError::Timeout {
            provider: ProviderKind::Threat,
            seconds: 10,
        };
        assert_eq!(err.to_string(), "Threat provider timed out after 10s");
    }

    #[test]
    fn test_unavailable_error_is_verbatim() {
        let err = ProviderError::Unavailable("no backend".into());
        assert_eq!(err.to_string(), "no backend");
    }
}
