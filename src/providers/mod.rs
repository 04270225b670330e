//! Data providers behind a lookup.
//!
//! Each provider follows the same two-tier policy: the local backend proxy
//! first (it holds credentials server-side), then a direct call that needs no
//! credentials. Tiers are expressed as a `Strategy` list evaluated by
//! `first_success`.

mod backend;
mod chain;
mod geolocation;
mod latency;
mod resolve;
mod threat;
mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, DIRECT_PING_TIMEOUT};
use crate::error_handling::{ProviderError, ProviderKind};
use crate::target::Target;

pub use backend::BackendClient;
pub use chain::{first_success, Strategy};
pub use geolocation::GeolocationProvider;
pub use latency::LatencyProvider;
pub use resolve::{address_for, HostResolver};
pub use threat::{ThreatProvider, THREAT_UNAVAILABLE};
pub use types::{Coordinates, GeoRecord, ProbeResult, ProbeStatus, ThreatLevel, ThreatRecord};
pub(crate) use types::rounded_u64;

/// A source of one section of lookup data.
#[async_trait]
pub trait Provider<T>: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn fetch(&self, target: &Target) -> Result<T, ProviderError>;
}

/// Shared resources for the three providers.
pub struct ProviderContext {
    pub backend: BackendClient,
    /// Client for direct provider calls.
    pub client: Arc<reqwest::Client>,
    pub ipinfo_base_url: String,
    pub ipinfo_token: Option<String>,
    pub resolver: Arc<dyn HostResolver>,
    pub direct_ping_timeout: Duration,
}

impl ProviderContext {
    pub fn new(
        config: &Config,
        client: Arc<reqwest::Client>,
        probe_client: Arc<reqwest::Client>,
        resolver: Arc<dyn HostResolver>,
    ) -> Self {
        Self {
            backend: BackendClient::new(&config.backend_url, Arc::clone(&client), probe_client),
            client,
            ipinfo_base_url: config.ipinfo_base_url.trim_end_matches('/').to_string(),
            ipinfo_token: config.ipinfo_token.clone(),
            resolver,
            direct_ping_timeout: DIRECT_PING_TIMEOUT,
        }
    }
}
