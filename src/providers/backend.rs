//! Local backend proxy client.
//!
//! The backend holds provider credentials server-side and is always tried
//! first. Availability is decided by a short `/health` probe.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error_handling::ProviderError;

/// HTTP client for the local backend proxy.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: Arc<reqwest::Client>,
    probe_client: Arc<reqwest::Client>,
}

impl BackendClient {
    /// Creates a backend client.
    ///
    /// `client` is used for data calls (provider timeout), `probe_client` for
    /// the availability probe (short timeout).
    pub fn new(
        base_url: impl Into<String>,
        client: Arc<reqwest::Client>,
        probe_client: Arc<reqwest::Client>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            probe_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true when `GET /health` answers 2xx within the probe timeout.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.probe_client.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                log::debug!("Backend health check returned {}", response.status());
                false
            }
            Err(e) => {
                log::debug!("Backend unreachable at {}: {}", self.base_url, e);
                false
            }
        }
    }

    /// GETs `path` from the backend and decodes the JSON body.
    ///
    /// Non-2xx statuses are errors.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Fails with `Unavailable` when the health probe does not pass.
    pub async fn require_available(&self) -> Result<(), ProviderError> {
        if self.is_available().await {
            Ok(())
        } else {
            Err(ProviderError::Unavailable(format!(
                "Backend not reachable at {}",
                self.base_url
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Arc<reqwest::Client> {
        Arc::new(reqwest::Client::new())
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = BackendClient::new("http://localhost:3001/", client(), client());
        assert_eq!(backend.base_url(), "http://localhost:3001");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let backend = BackendClient::new("http://127.0.0.1:9", client(), client());
        assert!(!backend.is_available().await);
        let err = backend.require_available().await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }
}
