//! Tests for CLI subcommand parsing.

use std::path::PathBuf;

use clap::Parser;
use network_monitor::config::{Cli, Command, Drawer, DB_PATH};
use network_monitor::{Config, LogFormat, LogLevel, ReconnectMode};

#[test]
fn test_lookup_command_defaults() {
    let cli = Cli::try_parse_from(["network_monitor", "lookup", "8.8.8.8"]).unwrap();
    assert_eq!(cli.global.log_level, LogLevel::Info);
    assert_eq!(cli.global.log_format, LogFormat::Plain);
    assert_eq!(cli.global.db_path, PathBuf::from(DB_PATH));
    assert_eq!(cli.global.reconnect, ReconnectMode::Fixed);
    match cli.command {
        Command::Lookup(cmd) => {
            assert_eq!(cmd.target, "8.8.8.8");
            assert!(!cmd.json);
            assert!(!cmd.auto_refresh);
            assert_eq!(cmd.refresh_seconds, 60);
        }
        other => panic!("Expected lookup, got {other:?}"),
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "network_monitor",
        "lookup",
        "example.com",
        "--json",
        "--auto-refresh",
        "--refresh-seconds",
        "15",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--timeout-seconds",
        "4",
        "--reconnect",
        "exponential",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, LogLevel::Debug);
    assert_eq!(cli.global.log_format, LogFormat::Json);
    assert_eq!(cli.global.timeout_seconds, 4);
    assert_eq!(cli.global.reconnect, ReconnectMode::Exponential);
    match cli.command {
        Command::Lookup(cmd) => {
            assert!(cmd.json);
            assert!(cmd.auto_refresh);
            assert_eq!(cmd.refresh_seconds, 15);
        }
        other => panic!("Expected lookup, got {other:?}"),
    }
}

#[test]
fn test_lookup_requires_target() {
    assert!(Cli::try_parse_from(["network_monitor", "lookup"]).is_err());
}

#[test]
fn test_history_clear_conflicts_with_select() {
    let result = Cli::try_parse_from(["network_monitor", "history", "--clear", "--select", "0"]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from(["network_monitor", "history", "--select", "2"]).unwrap();
    match cli.command {
        Command::History(cmd) => {
            assert!(!cmd.clear);
            assert_eq!(cmd.select, Some(2));
        }
        other => panic!("Expected history, got {other:?}"),
    }
}

#[test]
fn test_watch_and_devices_flags() {
    let cli =
        Cli::try_parse_from(["network_monitor", "watch", "--duration-seconds", "30"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Watch(ref cmd) if cmd.duration_seconds == Some(30)
    ));

    let cli = Cli::try_parse_from(["network_monitor", "devices", "--live"]).unwrap();
    assert!(matches!(cli.command, Command::Devices(ref cmd) if cmd.live));

    let cli = Cli::try_parse_from(["network_monitor", "overview"]).unwrap();
    assert!(matches!(cli.command, Command::Overview));
}

#[test]
fn test_change_command_drawers() {
    let cli = Cli::try_parse_from([
        "network_monitor",
        "change",
        "--due",
        "13.67",
        "--received",
        "20",
    ])
    .unwrap();
    match cli.command {
        Command::Change(cmd) => {
            assert_eq!(cmd.drawer, Drawer::Till);
            assert!((cmd.due - 13.67).abs() < f64::EPSILON);
            assert_eq!(cmd.drawer.denominations()[0].cents, 2000);
        }
        other => panic!("Expected change, got {other:?}"),
    }

    let cli = Cli::try_parse_from([
        "network_monitor",
        "change",
        "--due",
        "1",
        "--received",
        "2",
        "--drawer",
        "bills",
    ])
    .unwrap();
    match cli.command {
        Command::Change(cmd) => {
            assert_eq!(cmd.drawer, Drawer::Bills);
            assert!(cmd.drawer.denominations().iter().all(|d| d.cents >= 100));
        }
        other => panic!("Expected change, got {other:?}"),
    }
}

#[test]
fn test_config_from_global_opts() {
    let cli = Cli::try_parse_from([
        "network_monitor",
        "overview",
        "--backend-url",
        "http://10.0.0.2:3001",
        "--telemetry-url",
        "ws://10.0.0.2:3001",
        "--ipinfo-token",
        "   ",
    ])
    .unwrap();
    let config = Config::from(&cli.global);
    assert_eq!(config.backend_url, "http://10.0.0.2:3001");
    assert_eq!(config.telemetry_url, "ws://10.0.0.2:3001");
    // Blank tokens are treated as absent
    assert_eq!(config.ipinfo_token, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_telemetry_scheme_fails_validation() {
    let cli = Cli::try_parse_from([
        "network_monitor",
        "watch",
        "--telemetry-url",
        "http://localhost:3001",
    ])
    .unwrap();
    assert!(Config::from(&cli.global).validate().is_err());
}
