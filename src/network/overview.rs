//! Host network overview (interfaces, DNS servers, traffic counters).

use serde::{Deserialize, Serialize};

use crate::error_handling::ProviderError;
use crate::providers::{rounded_u64, BackendClient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsServer {
    pub server: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

impl DnsServer {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

/// Per-interface traffic counters. Field names are snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStats {
    pub interface: String,
    #[serde(default)]
    pub operstate: Option<String>,
    #[serde(default, deserialize_with = "rounded_u64")]
    pub rx_bytes: u64,
    #[serde(default, deserialize_with = "rounded_u64")]
    pub tx_bytes: u64,
    #[serde(default)]
    pub rx_sec: Option<f64>,
    #[serde(default)]
    pub tx_sec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverview {
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    /// Host uptime in whole seconds.
    #[serde(default, deserialize_with = "rounded_u64")]
    pub uptime: u64,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<NetworkInterface>,
    #[serde(default)]
    pub dns_servers: Vec<DnsServer>,
    #[serde(default)]
    pub network_stats: Vec<InterfaceStats>,
}

/// Formats seconds as `"{d}d {h}h {m}m"`.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let mins = (seconds % 3_600) / 60;
    format!("{days}d {hours}h {mins}m")
}

pub async fn fetch_overview(backend: &BackendClient) -> Result<NetworkOverview, ProviderError> {
    backend.get_json("/api/network/overview").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(59), "0d 0h 0m");
        assert_eq!(format_uptime(3_661), "0d 1h 1m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }

    #[test]
    fn test_overview_wire_shape() {
        let overview: NetworkOverview = serde_json::from_str(
            r#"{"hostname":"box","platform":"linux","uptime":3600,"gateway":"192.168.1.1",
                "interfaces":[{"name":"eth0","address":"192.168.1.10","netmask":"255.255.255.0","mac":"aa:bb"}],
                "dnsServers":[{"server":"1.1.1.1","status":"online","responseTime":12}],
                "networkStats":[{"interface":"eth0","operstate":"up","rx_bytes":1024,"tx_bytes":2048,"rx_sec":10.5,"tx_sec":null}]}"#,
        )
        .unwrap();
        assert_eq!(overview.interfaces[0].name, "eth0");
        assert!(overview.dns_servers[0].is_online());
        assert_eq!(overview.network_stats[0].rx_bytes, 1024);
        assert_eq!(overview.network_stats[0].tx_sec, None);
    }

    #[test]
    fn test_fractional_counters_are_rounded() {
        let overview: NetworkOverview = serde_json::from_str(
            r#"{"hostname":"box","uptime":4127.19,
                "networkStats":[{"interface":"wlan0","rx_bytes":1536.6,"tx_bytes":2e3}]}"#,
        )
        .unwrap();
        assert_eq!(overview.uptime, 4127);
        assert_eq!(format_uptime(overview.uptime), "0d 1h 8m");
        assert_eq!(overview.network_stats[0].rx_bytes, 1537);
        assert_eq!(overview.network_stats[0].tx_bytes, 2000);
    }
}
