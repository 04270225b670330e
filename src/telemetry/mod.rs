//! Live bandwidth and device telemetry.
//!
//! The backend pushes JSON frames over a WebSocket. Bandwidth samples are
//! smoothed into a fixed-size chart window; device updates are passed
//! through. The connection is re-established forever until cancelled.

mod format;
mod message;
mod smoother;
mod stream;

pub use format::{format_bytes, format_size};
pub use message::{parse_frame, BandwidthSample, TelemetryMessage};
pub use smoother::{BandwidthPoint, BandwidthSmoother};
pub use stream::{BandwidthStream, ConnectionState, ReconnectPolicy, StreamEvent};
