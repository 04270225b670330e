//! Dashboard state and its reducer.
//!
//! All state transitions go through `DashboardState::reduce`, a pure function
//! of the previous state and a named `Action`. Searches are tagged with a
//! request id so a slow response for an earlier search can never overwrite
//! the result of a later one.

use crate::history::HistoryEntry;
use crate::lookup::{LatencyPoint, LookupResult};
use crate::providers::{GeoRecord, ProbeResult, ThreatRecord};
use crate::target::Target;

/// Monotonic id assigned to each search.
pub type RequestId = u64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub current_target: Option<Target>,
    pub loading: bool,
    pub error: Option<String>,
    pub geolocation: Option<GeoRecord>,
    pub probe: Option<ProbeResult>,
    pub threat: Option<ThreatRecord>,
    pub latency_trend: Vec<LatencyPoint>,
    pub recent_searches: Vec<HistoryEntry>,
    pub auto_refresh: bool,
    /// Id of the most recent search; completions for other ids are dropped.
    pub latest_request: RequestId,
}

#[derive(Debug, Clone)]
pub enum Action {
    SearchStarted {
        request_id: RequestId,
        target: Target,
    },
    SearchCompleted {
        request_id: RequestId,
        result: Box<LookupResult>,
    },
    SearchFailed {
        request_id: RequestId,
        message: String,
    },
    /// Input rejected before any request was issued.
    ValidationFailed(String),
    HistoryLoaded(Vec<HistoryEntry>),
    HistoryCleared,
    /// Restore a remembered lookup. The trend is regenerated by the caller.
    SelectRecent {
        entry: Box<HistoryEntry>,
        latency_trend: Vec<LatencyPoint>,
    },
    SetAutoRefresh(bool),
    ClearData,
}

impl DashboardState {
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::SearchStarted { request_id, target } => Self {
                current_target: Some(target),
                loading: true,
                error: None,
                geolocation: None,
                probe: None,
                threat: None,
                latency_trend: Vec::new(),
                latest_request: request_id,
                ..self
            },
            Action::SearchCompleted { request_id, result } => {
                if request_id != self.latest_request {
                    log::debug!("Ignoring stale result for request {request_id}");
                    return self;
                }
                let result = *result;
                let error = result
                    .is_empty()
                    .then(|| format!("No data available for {}", result.target));
                Self {
                    current_target: Some(result.target),
                    loading: false,
                    error,
                    geolocation: result.geolocation,
                    probe: result.probe,
                    threat: result.threat,
                    latency_trend: result.latency_trend,
                    ..self
                }
            }
            Action::SearchFailed {
                request_id,
                message,
            } => {
                if request_id != self.latest_request {
                    return self;
                }
                Self {
                    loading: false,
                    error: Some(message),
                    ..self
                }
            }
            Action::ValidationFailed(message) => Self {
                loading: false,
                error: Some(message),
                ..self
            },
            Action::HistoryLoaded(entries) => Self {
                recent_searches: entries,
                ..self
            },
            Action::HistoryCleared => Self {
                recent_searches: Vec::new(),
                ..self
            },
            Action::SelectRecent {
                entry,
                latency_trend,
            } => {
                let entry = *entry;
                Self {
                    current_target: Target::parse(&entry.target).ok(),
                    loading: false,
                    error: None,
                    geolocation: entry.data.ip_info,
                    probe: entry.data.ping_info,
                    threat: entry.data.threat_info,
                    latency_trend,
                    // Any search still in flight must not replace the restored view.
                    latest_request: self.latest_request + 1,
                    ..self
                }
            }
            Action::SetAutoRefresh(enabled) => Self {
                auto_refresh: enabled,
                ..self
            },
            Action::ClearData => Self {
                current_target: None,
                loading: false,
                error: None,
                geolocation: None,
                probe: None,
                threat: None,
                latency_trend: Vec::new(),
                ..self
            },
        }
    }
}
