//! Local device discovery results.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::error_handling::ProviderError;
use crate::providers::BackendClient;

/// One device seen on the local subnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub ip: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }

    /// Name shown for the device: its hostname when it has a real one,
    /// otherwise its type, otherwise "Unknown Device".
    pub fn display_name(&self) -> &str {
        match self.hostname.as_deref() {
            Some(h) if h != self.ip && h != "?" && !h.is_empty() => h,
            _ => self
                .device_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or("Unknown Device"),
        }
    }

    pub fn category(&self) -> DeviceCategory {
        classify_device(
            self.vendor.as_deref().unwrap_or(""),
            self.hostname.as_deref().unwrap_or(""),
            self.device_type.as_deref(),
        )
    }
}

/// A device scan of the local subnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    #[serde(default)]
    pub subnet: Option<String>,
    #[serde(default)]
    pub online_devices: u32,
    #[serde(default)]
    pub total_devices: u32,
    #[serde(default)]
    pub scan_time: Option<String>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub is_enhancing: bool,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Coarse device kind used for the device list icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum DeviceCategory {
    Network,
    Phone,
    Computer,
    Apple,
    Tv,
    Printer,
    Speaker,
    Camera,
    Generic,
}

impl DeviceCategory {
    pub fn icon(&self) -> &'static str {
        match self {
            DeviceCategory::Network => "🌐",
            DeviceCategory::Phone => "📱",
            DeviceCategory::Computer => "💻",
            DeviceCategory::Apple => "🍎",
            DeviceCategory::Tv => "📺",
            DeviceCategory::Printer => "🖨️",
            DeviceCategory::Speaker => "🔊",
            DeviceCategory::Camera => "📹",
            DeviceCategory::Generic => "🖥️",
        }
    }
}

/// Classifies a device from its vendor, hostname and reported type.
///
/// Rules are checked in order and the first match wins; all matching is
/// case-insensitive substring search.
pub fn classify_device(vendor: &str, hostname: &str, device_type: Option<&str>) -> DeviceCategory {
    let v = vendor.to_lowercase();
    let h = hostname.to_lowercase();
    let t = device_type.unwrap_or("").to_lowercase();
    let vendor_has = |needles: &[&str]| needles.iter().any(|n| v.contains(n));
    let host_has = |needles: &[&str]| needles.iter().any(|n| h.contains(n));

    if t.contains("router") || t.contains("gateway") {
        return DeviceCategory::Network;
    }
    if vendor_has(&["apple"]) || host_has(&["iphone", "ipad", "macbook", "apple"]) {
        if host_has(&["iphone", "ipad"]) {
            return DeviceCategory::Phone;
        }
        if host_has(&["macbook", "imac"]) {
            return DeviceCategory::Computer;
        }
        return DeviceCategory::Apple;
    }
    if vendor_has(&["samsung", "lg"]) || host_has(&["android", "galaxy"]) {
        DeviceCategory::Phone
    } else if host_has(&["router", "gateway"])
        || vendor_has(&["cisco", "netgear", "linksys", "tp-link"])
    {
        DeviceCategory::Network
    } else if host_has(&["tv", "roku", "chromecast", "firestick"]) {
        DeviceCategory::Tv
    } else if vendor_has(&["microsoft"]) || host_has(&["xbox", "windows", "surface"]) {
        DeviceCategory::Computer
    } else if host_has(&["printer"]) || vendor_has(&["hp", "canon", "epson"]) {
        DeviceCategory::Printer
    } else if host_has(&["alexa", "echo", "google", "nest"]) {
        DeviceCategory::Speaker
    } else if host_has(&["camera", "security"]) || vendor_has(&["hikvision", "dahua"]) {
        DeviceCategory::Camera
    } else {
        DeviceCategory::Generic
    }
}

/// Fetches the latest device scan from the backend.
///
/// Device discovery only exists on the local backend; there is no fallback.
pub async fn fetch_devices(backend: &BackendClient) -> Result<DeviceSnapshot, ProviderError> {
    backend.get_json("/api/network/devices").await
}
