//! Live channel frames.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::network::DeviceSnapshot;

/// One bandwidth measurement from the backend, in bytes per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthSample {
    #[serde(deserialize_with = "timestamp_from_text_or_millis")]
    pub timestamp: DateTime<Utc>,
    pub download_speed: f64,
    pub upload_speed: f64,
}

/// A frame on the live channel, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TelemetryMessage {
    Bandwidth(BandwidthSample),
    DeviceUpdate(DeviceSnapshot),
}

/// Parses a text frame. Malformed or unknown frames yield `None`.
pub fn parse_frame(text: &str) -> Option<TelemetryMessage> {
    match serde_json::from_str(text) {
        Ok(message) => Some(message),
        Err(e) => {
            log::debug!("Ignoring telemetry frame: {e}");
            None
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

fn timestamp_from_text_or_millis<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom),
    }
}
