//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::change::{Denomination, BILLS_ONLY, COIN_DRAWER, TILL_DRAWER};
use crate::config::constants::{
    AUTO_REFRESH_INTERVAL_SECS, DB_PATH, DEFAULT_BACKEND_URL, DEFAULT_IPINFO_BASE_URL,
    DEFAULT_TELEMETRY_URL, PROVIDER_TIMEOUT_SECS,
};
use crate::config::types::{Config, LogFormat, LogLevel, ReconnectMode};

/// Network monitor: target lookups, live bandwidth and device discovery.
#[derive(Debug, Parser)]
#[command(name = "network_monitor", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// SQLite file backing the search history
    #[arg(long, default_value = DB_PATH, global = true)]
    pub db_path: PathBuf,

    /// Local backend proxy base URL
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    pub backend_url: String,

    /// Base URL for direct geolocation lookups
    #[arg(long, env = "IPINFO_BASE_URL", default_value = DEFAULT_IPINFO_BASE_URL, global = true)]
    pub ipinfo_base_url: String,

    /// ipinfo token for direct lookups
    #[arg(long, env = "IPINFO_TOKEN", global = true, hide_env_values = true)]
    pub ipinfo_token: Option<String>,

    /// WebSocket URL of the live telemetry channel
    #[arg(long, env = "TELEMETRY_URL", default_value = DEFAULT_TELEMETRY_URL, global = true)]
    pub telemetry_url: String,

    /// Per-provider timeout in seconds
    #[arg(long, default_value_t = PROVIDER_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Telemetry reconnect behavior
    #[arg(long, value_enum, default_value_t = ReconnectMode::Fixed, global = true)]
    pub reconnect: ReconnectMode,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up geolocation, latency and threat data for an IP or domain
    Lookup(LookupCommand),
    /// Show or clear recent searches
    History(HistoryCommand),
    /// Stream live bandwidth from the backend
    Watch(WatchCommand),
    /// List devices discovered on the local network
    Devices(DevicesCommand),
    /// Show the local network overview
    Overview,
    /// Break change down into denominations
    Change(ChangeCommand),
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// IPv4 address or domain name
    pub target: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep refreshing the target until interrupted
    #[arg(long)]
    pub auto_refresh: bool,

    /// Auto refresh interval in seconds
    #[arg(long, default_value_t = AUTO_REFRESH_INTERVAL_SECS)]
    pub refresh_seconds: u64,
}

#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Erase all saved searches
    #[arg(long, conflicts_with = "select")]
    pub clear: bool,

    /// Re-display a saved search (0 = newest)
    #[arg(long)]
    pub select: Option<usize>,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Stop after this many seconds (runs until interrupted when omitted)
    #[arg(long)]
    pub duration_seconds: Option<u64>,
}

#[derive(Debug, Args)]
pub struct DevicesCommand {
    /// Keep listening for device updates pushed over the telemetry channel
    #[arg(long)]
    pub live: bool,
}

#[derive(Debug, Args)]
pub struct ChangeCommand {
    /// Amount due
    #[arg(long)]
    pub due: f64,

    /// Amount received
    #[arg(long)]
    pub received: f64,

    /// Denomination set to break the change into
    #[arg(long, value_enum, default_value_t = Drawer::Till)]
    pub drawer: Drawer,
}

/// Denomination sets selectable from the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Drawer {
    /// Bills and coins: $20 down to 1¢
    Till,
    /// Dollars and coins only
    Coins,
    /// Bills only; cents are left as remainder
    Bills,
}

impl Drawer {
    pub fn denominations(self) -> &'static [Denomination] {
        match self {
            Drawer::Till => TILL_DRAWER,
            Drawer::Coins => COIN_DRAWER,
            Drawer::Bills => BILLS_ONLY,
        }
    }
}

impl From<&GlobalOpts> for Config {
    fn from(opts: &GlobalOpts) -> Self {
        Config {
            log_level: opts.log_level.clone(),
            log_format: opts.log_format.clone(),
            db_path: opts.db_path.clone(),
            backend_url: opts.backend_url.clone(),
            ipinfo_base_url: opts.ipinfo_base_url.clone(),
            ipinfo_token: opts.ipinfo_token.clone().filter(|t| !t.trim().is_empty()),
            telemetry_url: opts.telemetry_url.clone(),
            provider_timeout_seconds: opts.timeout_seconds,
            reconnect: opts.reconnect,
            auto_refresh_seconds: AUTO_REFRESH_INTERVAL_SECS,
        }
    }
}
