//! Local network views served by the backend: device discovery and the host
//! network overview.

mod devices;
mod overview;

pub use devices::{classify_device, fetch_devices, Device, DeviceCategory, DeviceSnapshot};
pub use overview::{
    fetch_overview, format_uptime, DnsServer, InterfaceStats, NetworkInterface, NetworkOverview,
};
