//! CLI application helpers.
//!
//! Rendering, shutdown handling and statistics printing used by the binary.

pub mod render;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use shutdown::{cancel_on_ctrl_c, shutdown_gracefully};
pub use statistics::print_provider_statistics;
