//! Latency provider.
//!
//! The backend runs a real ICMP ping. Without it, the round-trip time of an
//! HTTP request to the geolocation service is used as an approximation.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::FutureExt;

use super::chain::{first_success, Strategy};
use super::resolve::address_for;
use super::types::{IpInfoResponse, ProbeResult, ProbeStatus};
use super::{Provider, ProviderContext};
use crate::error_handling::{ProviderError, ProviderKind};
use crate::target::Target;

const RESPONSE_TIME_SOURCE: &str = "Response Time Measurement";
const FAILED_CONNECTION_SOURCE: &str = "Failed Connection";

pub struct LatencyProvider {
    ctx: Arc<ProviderContext>,
}

impl LatencyProvider {
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self { ctx }
    }

    async fn via_backend(&self, target: &Target) -> Result<ProbeResult, ProviderError> {
        self.ctx.backend.require_available().await?;
        let mut probe: ProbeResult = self
            .ctx
            .backend
            .get_json(&format!("/api/ping/{target}"))
            .await?;
        if probe.hostname.is_none() {
            probe.hostname = Some(target.to_string());
        }
        Ok(probe)
    }

    /// Never fails: an unreachable host is reported as a `down` probe.
    async fn response_time(&self, target: &Target) -> Result<ProbeResult, ProviderError> {
        let (address, _) = address_for(target, self.ctx.resolver.as_ref()).await;
        let url = format!("{}/{}/json", self.ctx.ipinfo_base_url, address);

        let start = Instant::now();
        let outcome = async {
            let response = self
                .ctx
                .client
                .get(&url)
                .timeout(self.ctx.direct_ping_timeout)
                .send()
                .await?
                .error_for_status()?;
            response.json::<IpInfoResponse>().await
        }
        .await;

        match outcome {
            Ok(raw) => {
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                Ok(ProbeResult {
                    hostname: Some(target.to_string()),
                    ip: raw.ip.filter(|ip| !ip.is_empty()).or(Some(address)),
                    ping_time: Some(elapsed_ms.round() as u64),
                    status: ProbeStatus::Up,
                    data_source: Some(RESPONSE_TIME_SOURCE.to_string()),
                    note: None,
                })
            }
            Err(e) => {
                log::warn!("Response time measurement for {target} failed: {e}");
                Ok(ProbeResult {
                    hostname: Some(target.to_string()),
                    ip: Some(target.to_string()),
                    ping_time: None,
                    status: ProbeStatus::Down,
                    data_source: Some(FAILED_CONNECTION_SOURCE.to_string()),
                    note: Some("Unable to connect to target".to_string()),
                })
            }
        }
    }
}

#[async_trait]
impl Provider<ProbeResult> for LatencyProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Latency
    }

    async fn fetch(&self, target: &Target) -> Result<ProbeResult, ProviderError> {
        first_success(
            self.kind(),
            vec![
                Strategy::new("backend", self.via_backend(target).boxed()),
                Strategy::new("response-time", self.response_time(target).boxed()),
            ],
        )
        .await
    }
}
