//! Threat-intelligence provider.
//!
//! Only the backend holds the credentials for this data. Without it the
//! section is reported unavailable; nothing is synthesized.

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use super::chain::{first_success, Strategy};
use super::resolve::address_for;
use super::types::{ThreatLevel, ThreatRecord, ThreatResponse};
use super::{Provider, ProviderContext};
use crate::error_handling::{ProviderError, ProviderKind};
use crate::target::Target;

/// Error reported when no credentialed threat source is reachable.
pub const THREAT_UNAVAILABLE: &str = "Security analysis unavailable - no valid API access";

pub struct ThreatProvider {
    ctx: Arc<ProviderContext>,
}

impl ThreatProvider {
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self { ctx }
    }

    async fn via_backend(&self, target: &Target) -> Result<ThreatRecord, ProviderError> {
        self.ctx.backend.require_available().await?;
        let (address, _) = address_for(target, self.ctx.resolver.as_ref()).await;
        let raw: ThreatResponse = self
            .ctx
            .backend
            .get_json(&format!("/api/shodan/{address}"))
            .await?;
        if !raw.success {
            return Err(ProviderError::Unavailable(
                raw.error.unwrap_or_else(|| THREAT_UNAVAILABLE.to_string()),
            ));
        }
        Ok(ThreatRecord {
            threat_level: raw.threat_level.unwrap_or(ThreatLevel::Unknown),
            organization: raw.organization.filter(|o| !o.trim().is_empty()),
            vulnerabilities: raw.vulnerabilities.unwrap_or(0),
            open_ports: raw.open_ports.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl Provider<ThreatRecord> for ThreatProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Threat
    }

    async fn fetch(&self, target: &Target) -> Result<ThreatRecord, ProviderError> {
        first_success(
            self.kind(),
            vec![
                Strategy::new("backend", self.via_backend(target).boxed()),
                Strategy::new(
                    "unavailable",
                    async { Err(ProviderError::Unavailable(THREAT_UNAVAILABLE.to_string())) }
                        .boxed(),
                ),
            ],
        )
        .await
    }
}
