//! Error handling and provider statistics.
//!
//! This module provides:
//! - Error type definitions, one enum per concern
//! - Provider outcome statistics (success, failure, timeout per provider)
//!
//! Nothing here is fatal to a session: validation errors block a single
//! request, provider errors empty a single section, storage errors degrade
//! to an empty history.

mod stats;
mod types;

// Re-export public API
pub use stats::ProviderStats;
pub use types::{
    ChangeError, ConfigError, InitializationError, ProviderError, ProviderKind, ProviderOutcome,
    StorageError, TelemetryError, ValidationError,
};
