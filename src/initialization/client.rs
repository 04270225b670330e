//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{Config, BACKEND_PROBE_TIMEOUT};

const USER_AGENT: &str = concat!("network_monitor/", env!("CARGO_PKG_VERSION"));

/// HTTP clients shared by all providers.
#[derive(Clone)]
pub struct HttpClients {
    /// Provider calls, bounded by the configured provider timeout.
    pub provider: Arc<reqwest::Client>,
    /// Backend health probe, bounded by a short fixed timeout.
    pub probe: Arc<reqwest::Client>,
}

/// Builds the provider and probe clients.
///
/// # Errors
///
/// Returns a `reqwest::Error` if the TLS backend cannot be initialized.
pub fn init_clients(config: &Config) -> Result<HttpClients, reqwest::Error> {
    let provider = ClientBuilder::new()
        .timeout(config.provider_timeout())
        .user_agent(USER_AGENT)
        .build()?;
    let probe = ClientBuilder::new()
        .timeout(BACKEND_PROBE_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(HttpClients {
        provider: Arc::new(provider),
        probe: Arc::new(probe),
    })
}
