//! Ordered fallback strategies.
//!
//! Each provider is an ordered list of strategies (backend proxy, then direct
//! call). `first_success` tries them in order and stops at the first `Ok`.

use futures::future::BoxFuture;

use crate::error_handling::{ProviderError, ProviderKind};

/// One way of obtaining a provider's value.
///
/// The future is not polled until the chain reaches it, so later tiers cost
/// nothing when an earlier one succeeds.
pub struct Strategy<'a, T> {
    pub name: &'static str,
    pub future: BoxFuture<'a, Result<T, ProviderError>>,
}

impl<'a, T> Strategy<'a, T> {
    pub fn new(name: &'static str, future: BoxFuture<'a, Result<T, ProviderError>>) -> Self {
        Self { name, future }
    }
}

/// Runs strategies in order and returns the first success.
///
/// Failures are logged and the next strategy is tried. When every strategy
/// fails, the last error is returned.
pub async fn first_success<T>(
    provider: ProviderKind,
    strategies: Vec<Strategy<'_, T>>,
) -> Result<T, ProviderError> {
    let mut last_error = None;
    for strategy in strategies {
        match strategy.future.await {
            Ok(value) => {
                log::debug!("{} served by {}", provider, strategy.name);
                return Ok(value);
            }
            Err(e) => {
                log::debug!("{} strategy '{}' failed: {}", provider, strategy.name, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        ProviderError::Unavailable(format!("No strategies configured for {provider}"))
    }))
}
