//! Aggregated target lookup.
//!
//! A lookup fans out to the geolocation, latency and threat providers at
//! once. Each provider runs under its own timeout and fails alone: a failed
//! provider leaves its section `None` while the others are still shown.

mod trend;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error_handling::{ProviderError, ProviderKind, ProviderOutcome, ProviderStats};
use crate::providers::{
    GeoRecord, GeolocationProvider, LatencyProvider, ProbeResult, Provider, ProviderContext,
    ThreatProvider, ThreatRecord,
};
use crate::target::Target;

pub use trend::{generate_latency_trend, trend_base, LatencyPoint};

/// The three sections of a lookup, as shown and as stored in history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupSnapshot {
    pub ip_info: Option<GeoRecord>,
    pub ping_info: Option<ProbeResult>,
    pub threat_info: Option<ThreatRecord>,
}

/// Result of one aggregated lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub target: Target,
    pub geolocation: Option<GeoRecord>,
    pub probe: Option<ProbeResult>,
    pub threat: Option<ThreatRecord>,
    pub latency_trend: Vec<LatencyPoint>,
    pub completed_at: DateTime<Utc>,
}

impl LookupResult {
    pub fn snapshot(&self) -> LookupSnapshot {
        LookupSnapshot {
            ip_info: self.geolocation.clone(),
            ping_info: self.probe.clone(),
            threat_info: self.threat.clone(),
        }
    }

    /// True when every provider failed.
    pub fn is_empty(&self) -> bool {
        self.geolocation.is_none() && self.probe.is_none() && self.threat.is_none()
    }
}

/// Runs the three providers for a target.
#[derive(Clone)]
pub struct LookupService {
    geolocation: Arc<dyn Provider<GeoRecord>>,
    latency: Arc<dyn Provider<ProbeResult>>,
    threat: Arc<dyn Provider<ThreatRecord>>,
    timeout: Duration,
    stats: Arc<ProviderStats>,
}

impl LookupService {
    pub fn new(
        geolocation: Arc<dyn Provider<GeoRecord>>,
        latency: Arc<dyn Provider<ProbeResult>>,
        threat: Arc<dyn Provider<ThreatRecord>>,
        timeout: Duration,
        stats: Arc<ProviderStats>,
    ) -> Self {
        Self {
            geolocation,
            latency,
            threat,
            timeout,
            stats,
        }
    }

    /// Builds the default HTTP-backed providers over a shared context.
    pub fn from_context(ctx: Arc<ProviderContext>, timeout: Duration) -> Self {
        Self::new(
            Arc::new(GeolocationProvider::new(Arc::clone(&ctx))),
            Arc::new(LatencyProvider::new(Arc::clone(&ctx))),
            Arc::new(ThreatProvider::new(ctx)),
            timeout,
            Arc::new(ProviderStats::new()),
        )
    }

    pub fn stats(&self) -> &Arc<ProviderStats> {
        &self.stats
    }

    /// Looks up all three sections concurrently.
    ///
    /// Never fails as a whole; see `LookupResult::is_empty`.
    pub async fn lookup(&self, target: &Target) -> LookupResult {
        log::info!("Looking up {target}");

        let (geolocation, probe, threat) = tokio::join!(
            self.guarded(ProviderKind::Geolocation, self.geolocation.fetch(target)),
            self.guarded(ProviderKind::Latency, self.latency.fetch(target)),
            self.guarded(ProviderKind::Threat, self.threat.fetch(target)),
        );

        let base = trend_base(probe.as_ref());
        let completed_at = Utc::now();
        let latency_trend = generate_latency_trend(base, completed_at, &mut rand::rng());

        LookupResult {
            target: target.clone(),
            geolocation,
            probe,
            threat,
            latency_trend,
            completed_at,
        }
    }

    /// Applies the timeout and records the outcome. Failures become `None`.
    async fn guarded<T>(
        &self,
        kind: ProviderKind,
        fetch: impl Future<Output = Result<T, ProviderError>>,
    ) -> Option<T> {
        let result = match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                provider: kind,
                seconds: self.timeout.as_secs(),
            }),
        };

        match result {
            Ok(value) => {
                self.stats.record(kind, ProviderOutcome::Success);
                Some(value)
            }
            Err(e) => {
                let outcome = if matches!(e, ProviderError::Timeout { .. }) {
                    ProviderOutcome::Timeout
                } else {
                    ProviderOutcome::Failure
                };
                self.stats.record(kind, outcome);
                log::warn!("{kind} lookup failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ProbeStatus, ThreatLevel};
    use async_trait::async_trait;

    struct StaticGeo;

    #[async_trait]
    impl Provider<GeoRecord> for StaticGeo {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Geolocation
        }
        async fn fetch(&self, _target: &Target) -> Result<GeoRecord, ProviderError> {
            Ok(GeoRecord {
                city: Some("Mountain View".into()),
                ..Default::default()
            })
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl Provider<ProbeResult> for FailingProbe {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Latency
        }
        async fn fetch(&self, _target: &Target) -> Result<ProbeResult, ProviderError> {
            Err(ProviderError::Unavailable("ping failed".into()))
        }
    }

    struct StaticThreat;

    #[async_trait]
    impl Provider<ThreatRecord> for StaticThreat {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Threat
        }
        async fn fetch(&self, _target: &Target) -> Result<ThreatRecord, ProviderError> {
            Ok(ThreatRecord {
                threat_level: ThreatLevel::Low,
                organization: None,
                vulnerabilities: 0,
                open_ports: vec![443],
            })
        }
    }

    #[tokio::test]
    async fn test_failed_provider_leaves_only_its_section_empty() {
        let service = LookupService::new(
            Arc::new(StaticGeo),
            Arc::new(FailingProbe),
            Arc::new(StaticThreat),
            Duration::from_secs(1),
            Arc::new(ProviderStats::new()),
        );
        let target = Target::parse("8.8.8.8").unwrap();
        let result = service.lookup(&target).await;

        assert!(result.geolocation.is_some());
        assert!(result.probe.is_none());
        assert!(result.threat.is_some());
        assert_eq!(result.latency_trend.len(), 24);
        assert_eq!(
            service
                .stats()
                .get_count(ProviderKind::Latency, ProviderOutcome::Failure),
            1
        );
    }

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let snapshot = LookupSnapshot {
            ip_info: None,
            ping_info: Some(ProbeResult {
                hostname: None,
                ip: Some("1.1.1.1".into()),
                ping_time: Some(12),
                status: ProbeStatus::Up,
                data_source: None,
                note: None,
            }),
            threat_info: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("ipInfo").is_some());
        assert_eq!(json["pingInfo"]["pingTime"], 12);
    }
}
