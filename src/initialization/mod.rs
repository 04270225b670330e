//! Application initialization and resource setup.
//!
//! This module builds the shared resources a session needs:
//! - Logger
//! - HTTP clients (provider and health probe)
//! - DNS resolver
//! - Local key-value store
//! - The lookup service and dashboard wired from a `Config`

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error_handling::{InitializationError, StorageError};
use crate::history::{HistoryStore, KeyValueStore, SqliteStore};
use crate::lookup::LookupService;
use crate::providers::ProviderContext;

pub use client::{init_clients, HttpClients};
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Builds the provider context from configuration.
pub fn init_provider_context(config: &Config) -> Result<Arc<ProviderContext>, InitializationError> {
    let clients = init_clients(config)?;
    Ok(Arc::new(ProviderContext::new(
        config,
        clients.provider,
        clients.probe,
        init_resolver(),
    )))
}

/// Opens the SQLite-backed key-value store at the configured path.
pub async fn init_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    Ok(Arc::new(SqliteStore::open(&config.db_path).await?))
}

/// Wires a dashboard over an already built provider context and store.
pub async fn init_dashboard(
    config: &Config,
    ctx: Arc<ProviderContext>,
    store: Arc<dyn KeyValueStore>,
) -> Dashboard {
    let lookup = LookupService::from_context(ctx, config.provider_timeout());
    let history = HistoryStore::load(store).await;
    Dashboard::new(lookup, history)
}
