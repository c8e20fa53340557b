//! `flightlog` - CLI for the flight log
//!
//! This binary loads the flight log, runs one command against it, and
//! prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::Parser;

use flightlog::cli::render::{self, Row};
use flightlog::cli::{
    position_to_index, AddCommand, ChartCommand, Cli, Command, ConfigCommand, DeleteCommand,
    ListCommand, OutputFormat,
};
use flightlog::flight::parse_departure;
use flightlog::{
    init_logging, Config, Error, FileStore, FilterView, FlightBook, FlightDraft, FlightFilter,
    SaveOutcome,
};

type Book = FlightBook<FileStore>;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let Cli {
        config: config_path,
        file,
        command,
        ..
    } = cli;

    let config = Config::load_from(config_path).context("loading configuration")?;

    let result = match command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        command => {
            let data_file = file.unwrap_or_else(|| config.data_file());
            let mut book = FlightBook::open(FileStore::new(data_file))
                .with_options(config.query_options());
            run(&mut book, command)
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_user_error() => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn run(book: &mut Book, command: Command) -> flightlog::Result<()> {
    match command {
        Command::List(cmd) => handle_list(book, &cmd),
        Command::Add(cmd) => handle_add(book, cmd),
        Command::Delete(cmd) => handle_delete(book, &cmd),
        Command::Average => handle_average(book),
        Command::Chart(cmd) => handle_chart(book, &cmd),
        // Handled before the book is opened
        Command::Config(_) => Ok(()),
    }
}

fn handle_list(book: &Book, cmd: &ListCommand) -> flightlog::Result<()> {
    let now = match &cmd.now {
        Some(when) => parse_departure(when)?,
        None => Local::now().naive_local(),
    };

    let filter: FlightFilter = cmd.filter.into();
    match book.apply(filter, position_to_index(cmd.select), &now)? {
        FilterView::Flights(view) => {
            let rows: Vec<Row<'_>> = view
                .into_iter()
                .map(|flight| Row {
                    position: book.position_of(flight).map_or(0, |i| i + 1),
                    flight,
                })
                .collect();
            match cmd.format {
                OutputFormat::Plain => {
                    println!("{}", book.filter_label(filter));
                    print!("{}", render::plain(&rows));
                }
                OutputFormat::Table => {
                    println!("{}", book.filter_label(filter));
                    print!("{}", render::table(&rows));
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }
        FilterView::Message(message) => println!("{message}"),
    }
    Ok(())
}

fn handle_add(book: &mut Book, cmd: AddCommand) -> flightlog::Result<()> {
    let draft = FlightDraft::new(
        cmd.flight_number,
        cmd.destination,
        cmd.departure,
        cmd.duration,
    );
    let outcome = book.add(&draft)?;
    println!("Flight added.");
    report_save(&outcome);
    Ok(())
}

fn handle_delete(book: &mut Book, cmd: &DeleteCommand) -> flightlog::Result<()> {
    let (removed, outcome) = book.delete(position_to_index(cmd.position))?;
    println!(
        "Deleted flight {} to {}.",
        removed.flight_number, removed.destination
    );
    report_save(&outcome);
    Ok(())
}

fn handle_average(book: &Book) -> flightlog::Result<()> {
    let now = Local::now().naive_local();
    if let FilterView::Message(message) = book.apply(FlightFilter::AverageDuration, None, &now)? {
        println!("{message}");
    }
    Ok(())
}

fn handle_chart(book: &Book, cmd: &ChartCommand) -> flightlog::Result<()> {
    let shares = book.breakdown();
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shares)?),
        OutputFormat::Plain | OutputFormat::Table => print!("{}", render::chart(&shares)),
    }
    Ok(())
}

fn report_save(outcome: &SaveOutcome) {
    if let SaveOutcome::Failed { reason } = outcome {
        eprintln!("Warning: changes were not saved: {reason}");
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> flightlog::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!();
                println!("[Query]");
                println!(
                    "  Long flights over:  {}",
                    config.query.long_flight_threshold
                );
                println!("  Upcoming count:     {}", config.query.upcoming_count);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { path } => {
            let path = path.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e @ (Error::ConfigLoad(_) | Error::ConfigValidation { .. })) => {
                    println!("Configuration error: {e}");
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}
