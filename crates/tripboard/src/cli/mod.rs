//! Command-line interface for tripboard.
//!
//! This module provides the CLI structure for the `tripboard` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DemoArgs, ItineraryCommand, StatusCommand, WatchCommand};

/// tripboard - A departure board for your trip
///
/// Shows the status of every leg of a multi-leg flight itinerary, counts down
/// to the next departure and tracks where you are along the route.
#[derive(Debug, Parser)]
#[command(name = "tripboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the board once
    Status(StatusCommand),

    /// Keep the board on screen, refreshing every tick
    Watch(WatchCommand),

    /// Inspect the itinerary
    #[command(subcommand)]
    Itinerary(ItineraryCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status() -> Command {
        Command::Status(StatusCommand {
            json: false,
            demo: DemoArgs::default(),
        })
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "tripboard");
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: status(),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: status(),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli {
            config: None,
            verbose: 1,
            quiet: false,
            command: status(),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli {
            config: None,
            verbose: 2,
            quiet: false,
            command: status(),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["tripboard", "status"]).unwrap();
        let Command::Status(cmd) = cli.command else {
            panic!("expected status command");
        };
        assert!(!cmd.json);
        assert_eq!(cmd.demo.input(), None);
    }

    #[test]
    fn test_parse_status_with_demo_time() {
        let cli = Cli::try_parse_from([
            "tripboard",
            "status",
            "--json",
            "--demo-date",
            "2025-09-22",
            "--demo-time",
            "12:00",
        ])
        .unwrap();
        let Command::Status(cmd) = cli.command else {
            panic!("expected status command");
        };
        assert!(cmd.json);
        assert_eq!(cmd.demo.input(), Some(("2025-09-22", "12:00")));
    }

    #[test]
    fn test_demo_date_requires_time() {
        let result = Cli::try_parse_from(["tripboard", "status", "--demo-date", "2025-09-22"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from(["tripboard", "watch", "-n", "3"]).unwrap();
        let Command::Watch(cmd) = cli.command else {
            panic!("expected watch command");
        };
        assert_eq!(cmd.ticks, Some(3));
        assert!(!cmd.json);
    }

    #[test]
    fn test_parse_itinerary_validate() {
        let cli =
            Cli::try_parse_from(["tripboard", "itinerary", "validate", "-f", "trip.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Itinerary(ItineraryCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["tripboard", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["tripboard", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let args = vec!["tripboard", "-vv", "watch"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_with_quiet() {
        let args = vec!["tripboard", "-q", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.quiet);
    }
}
