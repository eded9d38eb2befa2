//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Flags that pin the clock to a demo instant.
///
/// Both halves must be given together. Without them the board follows the
/// real clock.
#[derive(Debug, Clone, Default, Args)]
pub struct DemoArgs {
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "demo_time")]
    pub demo_date: Option<String>,

    /// Pretend it is this time of day (HH:MM or HH:MM:SS)
    #[arg(long, value_name = "TIME", requires = "demo_date")]
    pub demo_time: Option<String>,
}

impl DemoArgs {
    /// The demo date and time, if both were given.
    #[must_use]
    pub fn input(&self) -> Option<(&str, &str)> {
        match (&self.demo_date, &self.demo_time) {
            (Some(date), Some(time)) => Some((date, time)),
            _ => None,
        }
    }
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Demo clock override
    #[command(flatten)]
    pub demo: DemoArgs,
}

/// Watch command arguments.
#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Output one JSON document per tick
    #[arg(short, long)]
    pub json: bool,

    /// Stop after this many ticks
    #[arg(short = 'n', long, value_name = "N")]
    pub ticks: Option<u64>,

    /// Demo clock override
    #[command(flatten)]
    pub demo: DemoArgs,
}

/// Itinerary commands.
#[derive(Debug, Subcommand)]
pub enum ItineraryCommand {
    /// Show the configured itinerary
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Validate an itinerary file
    Validate {
        /// Path to itinerary file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_args_input() {
        let demo = DemoArgs {
            demo_date: Some("2025-09-22".to_string()),
            demo_time: Some("12:00".to_string()),
        };
        assert_eq!(demo.input(), Some(("2025-09-22", "12:00")));
    }

    #[test]
    fn test_demo_args_partial_is_none() {
        let demo = DemoArgs {
            demo_date: Some("2025-09-22".to_string()),
            demo_time: None,
        };
        assert_eq!(demo.input(), None);
        assert_eq!(DemoArgs::default().input(), None);
    }

    #[test]
    fn test_status_command_debug() {
        let cmd = StatusCommand {
            json: true,
            demo: DemoArgs::default(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
        assert!(debug_str.contains("demo_date"));
    }

    #[test]
    fn test_watch_command_debug() {
        let cmd = WatchCommand {
            json: false,
            ticks: Some(5),
            demo: DemoArgs::default(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("ticks"));
    }

    #[test]
    fn test_itinerary_command_debug() {
        let cmd = ItineraryCommand::Validate { file: None };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Validate"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
