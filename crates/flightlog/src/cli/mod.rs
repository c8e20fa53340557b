//! Command-line interface for flightlog.
//!
//! This module provides the CLI structure and output rendering for the
//! `flightlog` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    position_to_index, AddCommand, ChartCommand, ConfigCommand, DeleteCommand, FilterArg,
    ListCommand, OutputFormat,
};

/// flightlog - Keep track of your flights
///
/// Add, delete, filter and summarize flights kept in a plain text file.
#[derive(Debug, Parser)]
#[command(name = "flightlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Flights file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub file: Option<PathBuf>,

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
    /// List flights, optionally filtered
    List(ListCommand),

    /// Add a flight
    Add(AddCommand),

    /// Delete a flight by position
    Delete(DeleteCommand),

    /// Show the mean flight duration
    Average,

    /// Show flights by destination as a chart
    Chart(ChartCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
