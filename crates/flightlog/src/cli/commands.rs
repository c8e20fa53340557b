//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::book::FlightFilter;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which flights to show
    #[arg(short = 'F', long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Position of the selected flight (as shown by `list`)
    #[arg(short, long, value_name = "POSITION")]
    pub select: Option<usize>,

    /// Reference time for upcoming flights, "dd/MM/yy HH:mm" (defaults to now)
    #[arg(long, value_name = "WHEN")]
    pub now: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Flight number, e.g. IB3456
    pub flight_number: String,

    /// Destination city
    pub destination: String,

    /// Departure, "dd/MM/yy HH:mm"
    pub departure: String,

    /// Duration, "H:mm"
    pub duration: String,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Position of the flight to delete (as shown by `list`)
    pub position: Option<usize>,
}

/// Chart command arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
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
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

/// Filter argument for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Every flight
    All,
    /// Flights to the selected flight's destination
    Destination,
    /// Flights longer than the long-flight threshold
    Long,
    /// The next upcoming departures
    Next,
    /// Mean flight duration
    Average,
}

impl From<FilterArg> for FlightFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Destination => Self::SelectedDestination,
            FilterArg::Long => Self::Long,
            FilterArg::Next => Self::NextUpcoming,
            FilterArg::Average => Self::AverageDuration,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Turn a 1-based position from the command line into a log index.
///
/// Position 0 selects nothing.
#[must_use]
pub fn position_to_index(position: Option<usize>) -> Option<usize> {
    position.and_then(|p| p.checked_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_arg_conversion() {
        assert_eq!(FlightFilter::from(FilterArg::All), FlightFilter::All);
        assert_eq!(
            FlightFilter::from(FilterArg::Destination),
            FlightFilter::SelectedDestination
        );
        assert_eq!(FlightFilter::from(FilterArg::Long), FlightFilter::Long);
        assert_eq!(FlightFilter::from(FilterArg::Next), FlightFilter::NextUpcoming);
        assert_eq!(
            FlightFilter::from(FilterArg::Average),
            FlightFilter::AverageDuration
        );
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_position_to_index() {
        assert_eq!(position_to_index(None), None);
        assert_eq!(position_to_index(Some(0)), None);
        assert_eq!(position_to_index(Some(1)), Some(0));
        assert_eq!(position_to_index(Some(12)), Some(11));
    }

    #[test]
    fn test_list_command_debug() {
        let cmd = ListCommand {
            filter: FilterArg::Long,
            select: None,
            now: None,
            format: OutputFormat::Table,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Long"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
