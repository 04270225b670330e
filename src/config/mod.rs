//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, window sizes, storage keys)
//! - The library `Config` struct
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

pub use cli::{
    ChangeCommand, Cli, Command, DevicesCommand, Drawer, GlobalOpts, HistoryCommand,
    LookupCommand, WatchCommand,
};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ReconnectMode};
