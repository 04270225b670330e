//! Provider statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ProviderKind, ProviderOutcome, ProviderStats};

/// Logs per-provider success, failure and timeout counts.
///
/// Providers with no calls are skipped.
pub fn print_provider_statistics(stats: &ProviderStats) {
    info!(
        "Provider outcomes ({} failures total):",
        stats.total_failures()
    );
    for kind in ProviderKind::iter() {
        if stats.total_for(kind) == 0 {
            continue;
        }
        let counts: Vec<String> = ProviderOutcome::iter()
            .map(|outcome| format!("{}={}", outcome.as_str(), stats.get_count(kind, outcome)))
            .collect();
        info!("   {}: {}", kind, counts.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_provider_statistics_does_not_panic() {
        let stats = ProviderStats::new();
        print_provider_statistics(&stats);
        stats.record(ProviderKind::Threat, ProviderOutcome::Timeout);
        print_provider_statistics(&stats);
    }
}
