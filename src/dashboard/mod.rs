//! Dashboard orchestration.
//!
//! `Dashboard` owns the state, the lookup service and the history. Every
//! state change is dispatched through the reducer.

use std::time::Duration;

use rand::Rng;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::error_handling::ValidationError;
use crate::history::{HistoryEntry, HistoryStore};
use crate::lookup::{generate_latency_trend, trend_base, LookupResult, LookupService};
use crate::state::{Action, DashboardState, RequestId};
use crate::target::Target;

const UNEXPECTED_ERROR: &str = "An unexpected error occurred while fetching data";

pub struct Dashboard {
    state: DashboardState,
    lookup: LookupService,
    history: HistoryStore,
    next_request_id: RequestId,
}

impl Dashboard {
    pub fn new(lookup: LookupService, history: HistoryStore) -> Self {
        let state = DashboardState::default()
            .reduce(Action::HistoryLoaded(history.entries().to_vec()));
        Self {
            state,
            lookup,
            history,
            next_request_id: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn lookup_service(&self) -> &LookupService {
        &self.lookup
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Validates `input` and runs a lookup for it.
    ///
    /// Invalid input is recorded in the state and returned; no request is
    /// issued for it.
    pub async fn search(&mut self, input: &str) -> Result<(), ValidationError> {
        let target = match Target::parse(input) {
            Ok(target) => target,
            Err(e) => {
                self.dispatch(Action::ValidationFailed(e.to_string()));
                return Err(e);
            }
        };
        self.run(target).await;
        Ok(())
    }

    /// Re-runs the current target, if there is one.
    pub async fn refresh(&mut self) {
        if let Some(target) = self.state.current_target.clone() {
            self.run(target).await;
        }
    }

    async fn run(&mut self, target: Target) {
        let request_id = self.begin_search(target.clone());
        let service = self.lookup.clone();
        let outcome = tokio::spawn(async move { service.lookup(&target).await }).await;
        self.complete_search(request_id, outcome).await;
    }

    /// Marks a search as started and returns its request id.
    pub fn begin_search(&mut self, target: Target) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.dispatch(Action::SearchStarted { request_id, target });
        request_id
    }

    /// Applies a finished lookup and records it in the history.
    ///
    /// Results for superseded requests are dropped without touching history.
    pub async fn complete_search(
        &mut self,
        request_id: RequestId,
        outcome: Result<LookupResult, JoinError>,
    ) {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                log::error!("Lookup task failed: {e}");
                self.dispatch(Action::SearchFailed {
                    request_id,
                    message: UNEXPECTED_ERROR.to_string(),
                });
                return;
            }
        };

        let current = request_id == self.state.latest_request;
        let entry = HistoryEntry::from(&result);
        self.dispatch(Action::SearchCompleted {
            request_id,
            result: Box::new(result),
        });
        if !current {
            return;
        }

        if let Err(e) = self.history.push(entry).await {
            log::warn!("Failed to save search history: {e}");
        }
        self.dispatch(Action::HistoryLoaded(self.history.entries().to_vec()));
    }

    /// Restores a remembered lookup by its position (0 is newest).
    ///
    /// Returns false when there is no entry at `index`.
    pub fn select_recent(&mut self, index: usize) -> bool {
        self.select_recent_with(index, &mut rand::rng())
    }

    pub fn select_recent_with<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> bool {
        let Some(entry) = self.history.get(index).cloned() else {
            return false;
        };
        let base = trend_base(entry.data.ping_info.as_ref());
        let latency_trend = generate_latency_trend(base, chrono::Utc::now(), rng);
        self.dispatch(Action::SelectRecent {
            entry: Box::new(entry),
            latency_trend,
        });
        true
    }

    pub async fn clear_history(&mut self) {
        if let Err(e) = self.history.clear().await {
            log::warn!("Failed to clear search history: {e}");
        }
        self.dispatch(Action::HistoryCleared);
    }

    pub fn clear_data(&mut self) {
        self.dispatch(Action::ClearData);
    }

    /// Refreshes the current target every `interval` until `cancel` fires.
    ///
    /// `on_update` is called with the new state after each refresh.
    pub async fn run_auto_refresh<F>(
        &mut self,
        interval: Duration,
        cancel: CancellationToken,
        mut on_update: F,
    ) where
        F: FnMut(&DashboardState),
    {
        self.dispatch(Action::SetAutoRefresh(true));
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    log::debug!("Auto refresh tick");
                    self.refresh().await;
                    on_update(&self.state);
                }
            }
        }
        self.dispatch(Action::SetAutoRefresh(false));
    }
}
