// Shared test helpers for provider setup.
//
// Builds provider contexts pointed at wiremock servers, with a fixed DNS
// answer so no test depends on the network.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use network_monitor::providers::{BackendClient, HostResolver, ProviderContext};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Resolver that always answers with the same address (or nothing).
pub struct FixedResolver(pub Option<Ipv4Addr>);

#[async_trait]
impl HostResolver for FixedResolver {
    async fn resolve_ipv4(&self, _host: &str) -> Option<Ipv4Addr> {
        self.0
    }
}

/// Builds a provider context for a backend and an ipinfo mock.
#[allow(dead_code)] // Not every test file uses every helper
pub fn context(backend_url: &str, ipinfo_url: &str, resolved: Option<Ipv4Addr>) -> Arc<ProviderContext> {
    context_with_token(backend_url, ipinfo_url, resolved, None)
}

#[allow(dead_code)]
pub fn context_with_token(
    backend_url: &str,
    ipinfo_url: &str,
    resolved: Option<Ipv4Addr>,
    token: Option<&str>,
) -> Arc<ProviderContext> {
    let client = Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client"),
    );
    let probe = Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("Failed to build probe client"),
    );
    Arc::new(ProviderContext {
        backend: BackendClient::new(backend_url, Arc::clone(&client), probe),
        client,
        ipinfo_base_url: ipinfo_url.to_string(),
        ipinfo_token: token.map(str::to_string),
        resolver: Arc::new(FixedResolver(resolved)),
        direct_ping_timeout: Duration::from_secs(2),
    })
}

/// Starts a backend mock whose health check passes.
#[allow(dead_code)]
pub async fn healthy_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .mount(&server)
        .await;
    server
}

/// Starts a backend mock whose health check fails.
#[allow(dead_code)]
pub async fn unhealthy_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    server
}
