//! Configuration constants.
//!
//! This module defines the constants used throughout the application:
//! endpoints, timeouts, window sizes and storage keys.

use std::time::Duration;

/// Default local backend proxy that holds provider credentials server-side.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Default live telemetry channel (served by the same backend).
pub const DEFAULT_TELEMETRY_URL: &str = "ws://localhost:3001";

/// Base URL for direct (credential-less) geolocation lookups.
pub const DEFAULT_IPINFO_BASE_URL: &str = "https://ipinfo.io";

/// Default SQLite file holding the local key-value store.
pub const DB_PATH: &str = "./network_monitor.db";

// Network operation timeouts
/// Backend availability probe timeout.
/// Kept short so an absent backend costs little before falling back.
pub const BACKEND_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
/// Per-provider call timeout in seconds. A timeout counts as a provider failure.
pub const PROVIDER_TIMEOUT_SECS: u64 = 10;
/// Timeout for the response-time measurement used when no backend ping exists
pub const DIRECT_PING_TIMEOUT: Duration = Duration::from_secs(5);
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;

// History
/// Storage key holding the serialized history list
pub const HISTORY_KEY: &str = "networkMonitorSearches";
/// Maximum number of history entries kept (newest first)
pub const MAX_HISTORY_ENTRIES: usize = 10;

// Latency trend
/// Number of hourly points in the generated latency trend
pub const LATENCY_TREND_POINTS: usize = 24;
/// Maximum jitter (±ms) applied to each trend point
pub const LATENCY_JITTER_MS: f64 = 10.0;
/// Base latency used when no ping time is known
pub const DEFAULT_BASE_LATENCY_MS: u64 = 50;
/// Lower bound for any trend point
pub const MIN_TREND_LATENCY_MS: f64 = 1.0;

// Live bandwidth
/// Trailing moving-average window applied to the newest point
pub const SMOOTHING_WINDOW: usize = 3;
/// Number of smoothed points retained client-side
pub const MAX_BANDWIDTH_POINTS: usize = 60;
/// Fixed delay before reconnecting a closed telemetry stream
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);
/// Upper bound on the reconnect delay when exponential backoff is selected
pub const RECONNECT_MAX_DELAY_SECS: u64 = 60;
/// Factor applied to the reconnect delay on each failed attempt (exponential mode)
pub const RECONNECT_FACTOR: u64 = 2;

// Auto refresh
/// Interval between automatic refreshes of the current target
pub const AUTO_REFRESH_INTERVAL_SECS: u64 = 60;
