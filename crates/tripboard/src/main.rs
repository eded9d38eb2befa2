//! `tripboard` - CLI for the trip departure board
//!
//! This binary shows the board once, keeps it refreshing on screen, and
//! inspects the itinerary and configuration it runs from.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tripboard::cli::{
    Cli, Command, ConfigCommand, DemoArgs, ItineraryCommand, StatusCommand, WatchCommand,
};
use tripboard::render::render_itinerary;
use tripboard::status::snapshot_from_clock;
use tripboard::{
    init_logging, Board, ClockSource, Config, Itinerary, JsonPresenter, Presenter, TextPresenter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Execute the command
    match cli.command {
        Command::Status(status_cmd) => handle_status(&load_config(cli.config)?, &status_cmd),
        Command::Watch(watch_cmd) => handle_watch(&load_config(cli.config)?, &watch_cmd).await,
        Command::Itinerary(itinerary_cmd) => handle_itinerary(cli.config, itinerary_cmd),
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(path).context("failed to load configuration")
}

/// Build the clock, pinned to the demo instant when one was given.
fn build_clock(config: &Config, demo: &DemoArgs) -> anyhow::Result<ClockSource> {
    let clock = ClockSource::new();
    if let Some((date, time)) = demo.input() {
        let zone = config.demo_zone()?;
        clock
            .set_override_from_input(date, time, zone)
            .context("invalid demo time")?;
    }
    Ok(clock)
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let clock = build_clock(config, &cmd.demo)?;
    let itinerary = config.load_itinerary()?;
    let snapshot = snapshot_from_clock(&clock, &itinerary, &config.thresholds());

    if cmd.json {
        JsonPresenter::new(io::stdout())
            .pretty(true)
            .present(&snapshot)?;
    } else {
        TextPresenter::new(io::stdout()).present(&snapshot)?;
    }
    Ok(())
}

async fn handle_watch(config: &Config, cmd: &WatchCommand) -> anyhow::Result<()> {
    let clock = Arc::new(build_clock(config, &cmd.demo)?);
    let itinerary = Arc::new(config.load_itinerary()?);
    let board = Board::new(clock, itinerary, config.thresholds())
        .with_tick_interval(config.tick_interval())
        .with_max_ticks(cmd.ticks);

    let handle = board.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping board");
            handle.stop();
        }
    });

    let mut presenter: Box<dyn Presenter> = if cmd.json {
        Box::new(JsonPresenter::new(io::stdout()))
    } else {
        Box::new(TextPresenter::new(io::stdout()).clear_between_frames(true))
    };
    let presented = board.run(presenter.as_mut()).await?;
    debug!("Presented {presented} boards");
    Ok(())
}

fn handle_itinerary(config_path: Option<PathBuf>, cmd: ItineraryCommand) -> anyhow::Result<()> {
    match cmd {
        ItineraryCommand::Show { json } => {
            let itinerary = load_config(config_path)?.load_itinerary()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&itinerary)?);
            } else {
                print!("{}", render_itinerary(&itinerary));
            }
        }
        ItineraryCommand::Validate { file } => {
            let (source, result) = match file {
                Some(path) => (path.display().to_string(), Itinerary::load(&path)),
                None => {
                    let config = load_config(config_path)?;
                    let source = config.itinerary.path.as_ref().map_or_else(
                        || "built-in itinerary".to_string(),
                        |p| p.display().to_string(),
                    );
                    (source, config.load_itinerary())
                }
            };
            println!("Validating itinerary: {source}");
            let itinerary = result.with_context(|| format!("invalid itinerary: {source}"))?;
            let codes: Vec<&str> = itinerary
                .waypoints()
                .iter()
                .map(|place| place.code.as_str())
                .collect();
            println!(
                "Itinerary is valid: {} legs, {}",
                itinerary.len(),
                codes.join("-")
            );
        }
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Board]");
                println!("  Tick interval (ms): {}", config.board.tick_interval_ms);
                println!(
                    "  Boarding window:    {} min",
                    config.board.boarding_window_minutes
                );
                println!("  Urgent window:      {} h", config.board.urgent_window_hours);
                println!();
                println!("[Clock]");
                println!(
                    "  Demo UTC offset:    {}",
                    config.clock.demo_utc_offset.as_deref().unwrap_or("local")
                );
                println!();
                println!("[Itinerary]");
                println!(
                    "  Path:               {}",
                    config
                        .itinerary
                        .path
                        .as_ref()
                        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
