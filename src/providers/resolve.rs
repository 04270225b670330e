//! Domain-to-IPv4 resolution for the direct provider tiers.

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::target::Target;

/// Resolves a hostname to its first IPv4 address.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve_ipv4(&self, host: &str) -> Option<Ipv4Addr>;
}

#[async_trait]
impl HostResolver for TokioAsyncResolver {
    async fn resolve_ipv4(&self, host: &str) -> Option<Ipv4Addr> {
        match self.lookup_ip(host).await {
            Ok(response) => {
                let first = response.iter().find_map(|ip| match ip {
                    IpAddr::V4(v4) => Some(v4),
                    IpAddr::V6(_) => None,
                });
                if first.is_none() {
                    log::warn!("No IPv4 address found for {host}");
                }
                first
            }
            Err(e) => {
                log::warn!("DNS resolution failed for {host}: {e}");
                None
            }
        }
    }
}

/// Address a provider should query for `target`.
///
/// Returns the address string and, for domains that resolved, the resolved
/// address. A domain that fails to resolve is passed through unchanged.
pub async fn address_for(target: &Target, resolver: &dyn HostResolver) -> (String, Option<String>) {
    match target {
        Target::Ip(ip) => (ip.to_string(), None),
        Target::Domain(domain) => match resolver.resolve_ipv4(domain).await {
            Some(ip) => {
                let ip = ip.to_string();
                (ip.clone(), Some(ip))
            }
            None => (domain.clone(), None),
        },
    }
}
