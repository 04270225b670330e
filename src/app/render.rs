//! Terminal rendering for the CLI.
//!
//! Only presentation lives here; nothing in this module changes state.

use colored::*;

use crate::change::ChangeResult;
use crate::history::HistoryEntry;
use crate::network::{format_uptime, DeviceSnapshot, NetworkOverview};
use crate::providers::{GeoRecord, ProbeResult, ProbeStatus, ThreatLevel, ThreatRecord};
use crate::state::DashboardState;
use crate::telemetry::{format_bytes, format_size, BandwidthPoint, BandwidthSample, ConnectionState};

fn field(label: &str, value: Option<&str>) {
    println!("  {:<12} {}", label.dimmed(), value.unwrap_or("-"));
}

fn heading(title: &str) {
    println!("\n{}", title.bold().cyan());
}

pub fn print_dashboard(state: &DashboardState) {
    if let Some(target) = &state.current_target {
        println!("{} {}", "TARGET".bold(), target.to_string().bold().white());
    }
    if let Some(error) = &state.error {
        println!("{} {}", "ERROR".red().bold(), error);
    }

    print_geolocation(state.geolocation.as_ref());
    print_probe(state.probe.as_ref());
    print_threat(state.threat.as_ref());

    if !state.latency_trend.is_empty() {
        heading("LATENCY_TREND (24h)");
        let line: Vec<String> = state
            .latency_trend
            .iter()
            .map(|p| format!("{}={}ms", p.time, p.latency))
            .collect();
        println!("  {}", line.join(" "));
    }
}

fn print_geolocation(record: Option<&GeoRecord>) {
    heading("IP_INFORMATION");
    let Some(record) = record else {
        println!("  {}", "Geolocation unavailable".yellow());
        return;
    };
    field("IP", record.ip.as_deref());
    if let Some(resolved) = &record.resolved_ip {
        field("RESOLVED", Some(resolved.as_str()));
    }
    field("CITY", record.city.as_deref());
    field("REGION", record.region.as_deref());
    field("COUNTRY", record.country.as_deref());
    field("ORG", record.org.as_deref());
    field("POSTAL", record.postal.as_deref());
    field("TIMEZONE", record.timezone.as_deref());
    let coordinates = record
        .coordinates
        .map(|c| format!("{:.4}, {:.4}", c.lat, c.lng));
    field("LOCATION", coordinates.as_deref());
}

fn print_probe(probe: Option<&ProbeResult>) {
    heading("CONNECTION_STATUS");
    let Some(probe) = probe else {
        println!("  {}", "Latency unavailable".yellow());
        return;
    };
    let status = match probe.status {
        ProbeStatus::Up => "ONLINE".green().bold(),
        ProbeStatus::Down => "OFFLINE".red().bold(),
    };
    println!("  {:<12} {}", "STATUS".dimmed(), status);
    let ping = probe.ping_time.map(|ms| format!("{ms}ms"));
    field("PING", ping.as_deref());
    field("SOURCE", probe.data_source.as_deref());
    if let Some(note) = &probe.note {
        field("NOTE", Some(note.as_str()));
    }
}

fn print_threat(threat: Option<&ThreatRecord>) {
    heading("SECURITY_ANALYSIS");
    let Some(threat) = threat else {
        println!("  {}", "Security analysis unavailable".yellow());
        return;
    };
    let level = threat.threat_level.label();
    let level = match threat.threat_level {
        ThreatLevel::Low => level.green(),
        ThreatLevel::Medium => level.yellow(),
        ThreatLevel::High => level.red().bold(),
        ThreatLevel::Unknown => level.dimmed(),
    };
    println!("  {:<12} {}", "THREAT".dimmed(), level);
    println!("  {:<12} {}", "".dimmed(), threat.threat_level.description());
    field("ORG", threat.organization.as_deref());
    println!("  {:<12} {}", "VULNS".dimmed(), threat.vulnerabilities);
    let ports: Vec<String> = threat.open_ports.iter().map(u16::to_string).collect();
    let ports = (!ports.is_empty()).then(|| ports.join(", "));
    field("OPEN_PORTS", ports.as_deref());
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No recent searches".dimmed());
        return;
    }
    heading("RECENT_SEARCHES");
    for (index, entry) in entries.iter().enumerate() {
        let ping = entry
            .data
            .ping_info
            .as_ref()
            .and_then(|p| p.ping_time)
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>2}  {:<32} {:>7}  {}",
            index,
            entry.target.bold(),
            ping,
            entry
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed()
        );
    }
}

pub fn print_connection_state(state: ConnectionState) {
    let label = state.as_str().to_uppercase();
    let label = match state {
        ConnectionState::Connected => label.green(),
        ConnectionState::Connecting | ConnectionState::Reconnecting => label.yellow(),
        ConnectionState::Error => label.red(),
    };
    println!("{} {}", "LIVE".bold(), label);
}

/// One live line: raw rates from the sample, smoothed KB/s from the point.
pub fn print_bandwidth(sample: &BandwidthSample, point: &BandwidthPoint) {
    println!(
        "{}  ↓ {:<12} ↑ {:<12} avg ↓ {} KB/s ↑ {} KB/s",
        sample
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string()
            .dimmed(),
        format_bytes(sample.download_speed).green(),
        format_bytes(sample.upload_speed).blue(),
        point.download_kbps,
        point.upload_kbps,
    );
}

pub fn print_devices(snapshot: &DeviceSnapshot) {
    heading("DEVICE_DISCOVERY");
    println!(
        "  {:<12} {}   {} online / {} total",
        "SUBNET".dimmed(),
        snapshot.subnet.as_deref().unwrap_or("Unknown"),
        snapshot.online_devices.to_string().green(),
        snapshot.total_devices
    );
    if let Some(source) = &snapshot.data_source {
        field("SOURCE", Some(source.as_str()));
    }
    if snapshot.is_enhancing {
        println!("  {}", "Enhancing device details...".dimmed());
    }
    for device in &snapshot.devices {
        let status = if device.is_online() {
            match device.response_time {
                Some(ms) => format!("ONLINE ({ms}ms)").green(),
                None => "ONLINE".green(),
            }
        } else {
            "OFFLINE".red()
        };
        println!(
            "  {} {:<28} {:<16} {:<18} {:<20} {}",
            device.category().icon(),
            device.display_name(),
            device.ip,
            device.mac.as_deref().unwrap_or("-"),
            device.vendor.as_deref().unwrap_or("-"),
            status
        );
    }
}

pub fn print_overview(overview: &NetworkOverview) {
    heading("NETWORK_OVERVIEW");
    field("HOSTNAME", overview.hostname.as_deref());
    field("PLATFORM", overview.platform.as_deref());
    field("UPTIME", Some(format_uptime(overview.uptime).as_str()));
    field("GATEWAY", overview.gateway.as_deref());

    heading("INTERFACES");
    for iface in &overview.interfaces {
        println!(
            "  {:<10} {:<16} {:<16} {}",
            iface.name.bold(),
            iface.address.as_deref().unwrap_or("-"),
            iface.netmask.as_deref().unwrap_or("-"),
            iface.mac.as_deref().unwrap_or("-")
        );
    }

    heading("DNS_SERVERS");
    for dns in &overview.dns_servers {
        let status = if dns.is_online() {
            "ONLINE".green()
        } else {
            "ERROR".red()
        };
        let time = dns
            .response_time
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_default();
        println!("  {:<16} {} {}", dns.server, status, time.dimmed());
    }

    if !overview.network_stats.is_empty() {
        heading("TRAFFIC_STATISTICS");
        for stat in &overview.network_stats {
            let up = stat.operstate.as_deref() == Some("up");
            let state = stat
                .operstate
                .as_deref()
                .unwrap_or("unknown")
                .to_uppercase();
            let state = if up { state.green() } else { state.red() };
            println!(
                "  {:<10} {:<8} rx {:<10} tx {:<10} ↓{} ↑{}",
                stat.interface,
                state,
                format_size(stat.rx_bytes),
                format_size(stat.tx_bytes),
                format_bytes(stat.rx_sec.unwrap_or(0.0)),
                format_bytes(stat.tx_sec.unwrap_or(0.0)),
            );
        }
    }
}

pub fn print_change(result: &ChangeResult) {
    if result.insufficient {
        println!(
            "{} short by ${:.2}",
            "INSUFFICIENT".red().bold(),
            -result.change()
        );
    } else {
        println!("{} ${:.2}", "CHANGE".green().bold(), result.change());
    }
    for (denomination, count) in &result.breakdown.counts {
        println!("  {:<10} {}", denomination.name, count);
    }
    if result.breakdown.remainder_cents > 0 {
        println!(
            "  {:<10} {}¢",
            "remainder".dimmed(),
            result.breakdown.remainder_cents
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_print_bandwidth_does_not_panic() {
        let sample = BandwidthSample {
            timestamp: Utc::now(),
            download_speed: 1536.0,
            upload_speed: 0.0,
        };
        let point = BandwidthPoint {
            timestamp: sample.timestamp,
            download_kbps: 2,
            upload_kbps: 0,
        };
        print_bandwidth(&sample, &point);
        print_connection_state(ConnectionState::Reconnecting);
    }
}
