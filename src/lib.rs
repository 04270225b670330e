//! network_monitor library: the data layer of a network monitoring dashboard
//!
//! This library looks up geolocation, latency and threat data for an IPv4
//! address or domain, keeps a short local history of lookups, streams live
//! bandwidth and device telemetry from a local backend, and breaks cash change
//! down into denominations.
//!
//! # Example
//!
//! ```no_run
//! use network_monitor::initialization::{init_dashboard, init_provider_context};
//! use network_monitor::history::MemoryStore;
//! use network_monitor::Config;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let ctx = init_provider_context(&config)?;
//! let mut dashboard = init_dashboard(&config, ctx, Arc::new(MemoryStore::new())).await;
//!
//! dashboard.search("example.com").await?;
//! if let Some(geo) = &dashboard.state().geolocation {
//!     println!("{:?} in {:?}", geo.ip, geo.country);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod app;
pub mod change;
pub mod config;
pub mod dashboard;
pub mod error_handling;
pub mod history;
pub mod initialization;
pub mod lookup;
pub mod network;
pub mod providers;
pub mod state;
pub mod target;
pub mod telemetry;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ReconnectMode};
pub use dashboard::Dashboard;
pub use lookup::{LookupResult, LookupService};
pub use target::Target;
