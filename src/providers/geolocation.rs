//! Geolocation provider (ipinfo-shaped data).

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use super::chain::{first_success, Strategy};
use super::resolve::address_for;
use super::types::{GeoRecord, IpInfoResponse};
use super::{Provider, ProviderContext};
use crate::error_handling::{ProviderError, ProviderKind};
use crate::target::Target;

pub struct GeolocationProvider {
    ctx: Arc<ProviderContext>,
}

impl GeolocationProvider {
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self { ctx }
    }

    async fn via_backend(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        self.ctx.backend.require_available().await?;
        let raw: IpInfoResponse = self
            .ctx
            .backend
            .get_json(&format!("/api/ipinfo/{target}"))
            .await?;
        if raw.success == Some(false) {
            return Err(ProviderError::InvalidResponse(
                raw.error_message()
                    .unwrap_or_else(|| "Backend reported failure".to_string()),
            ));
        }
        let mut record = raw.into_record();
        record.original_target = Some(target.to_string());
        if target.is_domain() {
            record.resolved_ip = record.ip.clone();
        }
        Ok(record)
    }

    async fn direct(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        let (address, resolved_ip) = address_for(target, self.ctx.resolver.as_ref()).await;
        let url = format!("{}/{}", self.ctx.ipinfo_base_url, address);
        let mut request = self.ctx.client.get(&url);
        if let Some(token) = &self.ctx.ipinfo_token {
            request = request.query(&[("token", token)]);
        }
        let raw: IpInfoResponse = request.send().await?.error_for_status()?.json().await?;
        if let Some(message) = raw.error_message() {
            return Err(ProviderError::InvalidResponse(message));
        }
        let mut record = raw.into_record();
        record.original_target = Some(target.to_string());
        record.resolved_ip = resolved_ip;
        Ok(record)
    }
}

#[async_trait]
impl Provider<GeoRecord> for GeolocationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Geolocation
    }

    async fn fetch(&self, target: &Target) -> Result<GeoRecord, ProviderError> {
        first_success(
            self.kind(),
            vec![
                Strategy::new("backend", self.via_backend(target).boxed()),
                Strategy::new("ipinfo", self.direct(target).boxed()),
            ],
        )
        .await
    }
}
