//! Provider outcome statistics.
//!
//! Thread-safe counters of how each provider call ended, used to summarise
//! long-running sessions (auto refresh).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ProviderKind, ProviderOutcome};

/// Thread-safe provider statistics tracker.
///
/// Every `(ProviderKind, ProviderOutcome)` pair is initialized to zero on
/// creation, so lookups never miss. Share across tasks with `Arc`.
pub struct ProviderStats {
    counts: HashMap<(ProviderKind, ProviderOutcome), AtomicUsize>,
}

impl ProviderStats {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for kind in ProviderKind::iter() {
            for outcome in ProviderOutcome::iter() {
                counts.insert((kind, outcome), AtomicUsize::new(0));
            }
        }
        ProviderStats { counts }
    }

    /// Record one provider call.
    pub fn record(&self, kind: ProviderKind, outcome: ProviderOutcome) {
        if let Some(counter) = self.counts.get(&(kind, outcome)) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "No counter for {:?}/{:?}; ProviderStats was not fully initialized",
                kind,
                outcome
            );
        }
    }

    /// Count for one provider and outcome.
    pub fn get_count(&self, kind: ProviderKind, outcome: ProviderOutcome) -> usize {
        self.counts
            .get(&(kind, outcome))
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total calls made to one provider.
    pub fn total_for(&self, kind: ProviderKind) -> usize {
        ProviderOutcome::iter()
            .map(|o| self.get_count(kind, o))
            .sum()
    }

    /// Total calls that did not succeed, across providers.
    pub fn total_failures(&self) -> usize {
        ProviderKind::iter()
            .map(|k| {
                self.get_count(k, ProviderOutcome::Failure)
                    + self.get_count(k, ProviderOutcome::Timeout)
            })
            .sum()
    }
}

impl Default for ProviderStats {
    fn default() -> Self {
        Self::new()
    }
}
