//! Provider data structures.
//!
//! Field names serialize in camelCase to match the backend's JSON, which is
//! also the shape persisted in the search history.

use serde::{Deserialize, Deserializer, Serialize};

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Parses ipinfo's `"lat,lng"` location string.
    pub fn from_loc(loc: &str) -> Option<Self> {
        let (lat, lng) = loc.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Coordinates { lat, lng })
    }
}

/// Geolocation lookup result.
///
/// Every field is independently optional; missing upstream values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub org: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// What the user asked for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_target: Option<String>,
    /// Address a domain target resolved to; `None` for IP targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_ip: Option<String>,
}

/// Raw ipinfo-style response, as returned by ipinfo.io or the backend proxy.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct IpInfoResponse {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub org: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
    pub loc: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub success: Option<bool>,
    pub error: Option<serde_json::Value>,
}

impl IpInfoResponse {
    /// Converts into a `GeoRecord`, dropping blank strings.
    pub fn into_record(self) -> GeoRecord {
        let coordinates = self
            .coordinates
            .or_else(|| self.loc.as_deref().and_then(Coordinates::from_loc));
        GeoRecord {
            ip: non_blank(self.ip),
            city: non_blank(self.city),
            region: non_blank(self.region),
            country: non_blank(self.country),
            org: non_blank(self.org),
            postal: non_blank(self.postal),
            timezone: non_blank(self.timezone),
            coordinates,
            original_target: None,
            resolved_ip: None,
        }
    }

    /// Upstream error message, when the response reports one.
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .or_else(|| map.get("title"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}

/// Reads any JSON number as a whole count, rounding fractions.
///
/// Negative and non-finite values read as zero.
pub(crate) fn rounded_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(round_non_negative)
}

/// `rounded_u64` for optional fields; `null` stays `None`.
pub(crate) fn rounded_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(round_non_negative))
}

fn round_non_negative(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reachability of a probed host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Up,
    Down,
}

/// Latency probe result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    /// Target as submitted.
    #[serde(default)]
    pub hostname: Option<String>,
    pub ip: Option<String>,
    /// Measured round-trip time; `None` when the host did not answer.
    #[serde(default, deserialize_with = "rounded_opt_u64")]
    pub ping_time: Option<u64>,
    pub status: ProbeStatus,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Severity reported by the threat-intelligence backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl ThreatLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "LOW_RISK",
            ThreatLevel::Medium => "MEDIUM_RISK",
            ThreatLevel::High => "HIGH_RISK",
            ThreatLevel::Unknown => "UNKNOWN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "No significant security concerns detected",
            ThreatLevel::Medium => "Some security concerns detected",
            ThreatLevel::High => "Multiple security concerns detected",
            ThreatLevel::Unknown => "Unable to assess threat level",
        }
    }
}

/// Threat scan result. Only ever built from a real backend answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatRecord {
    pub threat_level: ThreatLevel,
    pub organization: Option<String>,
    #[serde(default)]
    pub vulnerabilities: u32,
    #[serde(default)]
    pub open_ports: Vec<u16>,
}

/// Raw backend threat response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreatResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub threat_level: Option<ThreatLevel>,
    pub organization: Option<String>,
    #[serde(default)]
    pub vulnerabilities: Option<u32>,
    #[serde(default)]
    pub open_ports: Option<Vec<u16>>,
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_from_loc() {
        assert_eq!(
            Coordinates::from_loc("37.4056,-122.0775"),
            Some(Coordinates {
                lat: 37.4056,
                lng: -122.0775
            })
        );
        assert_eq!(Coordinates::from_loc("nonsense"), None);
        assert_eq!(Coordinates::from_loc("1.0,"), None);
    }

    #[test]
    fn test_ipinfo_response_drops_blank_fields() {
        let raw: IpInfoResponse = serde_json::from_str(
            r#"{"ip":"8.8.8.8","city":"","region":"California","loc":"37.4,-122.1"}"#,
        )
        .unwrap();
        let record = raw.into_record();
        assert_eq!(record.ip.as_deref(), Some("8.8.8.8"));
        assert_eq!(record.city, None);
        assert_eq!(record.region.as_deref(), Some("California"));
        assert_eq!(record.country, None);
        assert_eq!(
            record.coordinates,
            Some(Coordinates {
                lat: 37.4,
                lng: -122.1
            })
        );
    }

    #[test]
    fn test_ipinfo_error_message_shapes() {
        let raw: IpInfoResponse =
            serde_json::from_str(r#"{"error":{"title":"Wrong ip","message":"Bad"}}"#).unwrap();
        assert_eq!(raw.error_message().as_deref(), Some("Bad"));
        let raw: IpInfoResponse = serde_json::from_str(r#"{"error":"rate limited"}"#).unwrap();
        assert_eq!(raw.error_message().as_deref(), Some("rate limited"));
    }

    #[test]
    fn test_threat_level_unknown_strings() {
        let level: ThreatLevel = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(level, ThreatLevel::Unknown);
        let level: ThreatLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, ThreatLevel::High);
    }

    #[test]
    fn test_probe_result_wire_format() {
        let probe: ProbeResult = serde_json::from_str(
            r#"{"hostname":"example.com","ip":"93.184.216.34","pingTime":23,"status":"up","dataSource":"ICMP Ping"}"#,
        )
        .unwrap();
        assert_eq!(probe.ping_time, Some(23));
        assert_eq!(probe.status, ProbeStatus::Up);
        let json = serde_json::to_value(&probe).unwrap();
        assert_eq!(json["pingTime"], 23);
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_probe_result_rounds_fractional_ping() {
        let probe: ProbeResult = serde_json::from_str(
            r#"{"ip":"1.1.1.1","pingTime":12.345,"status":"up","dataSource":"ICMP Ping"}"#,
        )
        .unwrap();
        assert_eq!(probe.ping_time, Some(12));

        let probe: ProbeResult =
            serde_json::from_str(r#"{"pingTime":null,"status":"down"}"#).unwrap();
        assert_eq!(probe.ping_time, None);

        // Missing field defaults to none
        let probe: ProbeResult = serde_json::from_str(r#"{"status":"down"}"#).unwrap();
        assert_eq!(probe.ping_time, None);
    }
}
