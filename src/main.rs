//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `network_monitor` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use network_monitor::app::{self, render};
use network_monitor::change::calculate_change;
use network_monitor::config::{
    ChangeCommand, Cli, Command, DevicesCommand, HistoryCommand, LookupCommand, WatchCommand,
};
use network_monitor::initialization::{
    init_dashboard, init_logger_with, init_provider_context, init_store,
};
use network_monitor::network::{fetch_devices, fetch_overview};
use network_monitor::telemetry::{BandwidthStream, ReconnectPolicy, StreamEvent};
use network_monitor::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Try loading .env from the current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    let mut config = Config::from(&cli.global);
    if let Command::Lookup(lookup) = &cli.command {
        config.auto_refresh_seconds = lookup.refresh_seconds;
    }

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command, config).await {
        eprintln!("network_monitor error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    match command {
        Command::Lookup(cmd) => lookup(cmd, &config).await,
        Command::History(cmd) => history(cmd, &config).await,
        Command::Watch(cmd) => watch(cmd, &config).await,
        Command::Devices(cmd) => devices(cmd, &config).await,
        Command::Overview => overview(&config).await,
        Command::Change(cmd) => change(cmd),
    }
}

async fn lookup(cmd: LookupCommand, config: &Config) -> Result<()> {
    let ctx = init_provider_context(config).context("Failed to initialize HTTP clients")?;
    let store = init_store(config)
        .await
        .context("Failed to open history database")?;
    let mut dashboard = init_dashboard(config, ctx, store).await;

    dashboard.search(&cmd.target).await?;
    if cmd.json {
        let state = dashboard.state();
        let output = serde_json::json!({
            "target": cmd.target.trim(),
            "ipInfo": state.geolocation,
            "pingInfo": state.probe,
            "threatInfo": state.threat,
            "latencyData": state.latency_trend,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        render::print_dashboard(dashboard.state());
    }

    if cmd.auto_refresh {
        let cancel = CancellationToken::new();
        let listener = app::cancel_on_ctrl_c(cancel.clone());
        log::info!(
            "Auto refresh every {}s, press Ctrl-C to stop",
            config.auto_refresh_seconds
        );
        dashboard
            .run_auto_refresh(config.auto_refresh_interval(), cancel.clone(), |state| {
                render::print_dashboard(state)
            })
            .await;
        app::shutdown_gracefully(cancel, [listener]).await;
    }

    app::print_provider_statistics(dashboard.lookup_service().stats());
    Ok(())
}

async fn history(cmd: HistoryCommand, config: &Config) -> Result<()> {
    let ctx = init_provider_context(config).context("Failed to initialize HTTP clients")?;
    let store = init_store(config)
        .await
        .context("Failed to open history database")?;
    let mut dashboard = init_dashboard(config, ctx, store).await;

    if cmd.clear {
        dashboard.clear_history().await;
        println!("Search history cleared");
        return Ok(());
    }

    if let Some(index) = cmd.select {
        if !dashboard.select_recent(index) {
            anyhow::bail!("No saved search at position {index}");
        }
        render::print_dashboard(dashboard.state());
        return Ok(());
    }

    render::print_history(&dashboard.state().recent_searches);
    Ok(())
}

async fn watch(cmd: WatchCommand, config: &Config) -> Result<()> {
    let cancel = CancellationToken::new();
    let listener = app::cancel_on_ctrl_c(cancel.clone());
    if let Some(seconds) = cmd.duration_seconds {
        let timer = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            timer.cancel();
        });
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let stream = BandwidthStream::new(&config.telemetry_url, ReconnectPolicy::from(config.reconnect));
    let stream_task = tokio::spawn(stream.run(tx, cancel.clone()));

    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::State(state) => render::print_connection_state(state),
            StreamEvent::Bandwidth { point, sample } => render::print_bandwidth(&sample, &point),
            StreamEvent::Devices(_) => {}
        }
    }

    let smoother = stream_task.await.context("Telemetry task failed")?;
    log::info!(
        "Received {} bandwidth points (peak down {} KB/s, peak up {} KB/s)",
        smoother.len(),
        smoother.peak_download_kbps(),
        smoother.peak_upload_kbps()
    );
    app::shutdown_gracefully(cancel, [listener]).await;
    Ok(())
}

async fn devices(cmd: DevicesCommand, config: &Config) -> Result<()> {
    let ctx = init_provider_context(config).context("Failed to initialize HTTP clients")?;
    let snapshot = fetch_devices(&ctx.backend)
        .await
        .context("Device discovery requires the local backend")?;
    render::print_devices(&snapshot);

    if !cmd.live {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let listener = app::cancel_on_ctrl_c(cancel.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let stream = BandwidthStream::new(&config.telemetry_url, ReconnectPolicy::from(config.reconnect));
    let stream_task = tokio::spawn(stream.run(tx, cancel.clone()));

    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::Devices(snapshot) => render::print_devices(&snapshot),
            StreamEvent::State(state) => log::debug!("Telemetry {}", state.as_str()),
            StreamEvent::Bandwidth { .. } => {}
        }
    }

    stream_task.await.context("Telemetry task failed")?;
    app::shutdown_gracefully(cancel, [listener]).await;
    Ok(())
}

async fn overview(config: &Config) -> Result<()> {
    let ctx = init_provider_context(config).context("Failed to initialize HTTP clients")?;
    let overview = fetch_overview(&ctx.backend)
        .await
        .context("Network overview requires the local backend")?;
    render::print_overview(&overview);
    Ok(())
}

fn change(cmd: ChangeCommand) -> Result<()> {
    let result = calculate_change(cmd.due, cmd.received, cmd.drawer.denominations())?;
    render::print_change(&result);
    Ok(())
}
