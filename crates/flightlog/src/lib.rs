//! `flightlog` - A personal flight log kept in a plain text file
//!
//! This library provides the flight record model, the text-file persistence
//! layer, the read-only queries over a log, and the [`FlightBook`] command
//! interface that front ends drive.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod book;
pub mod cli;
pub mod config;
pub mod error;
pub mod flight;
pub mod logging;
pub mod query;
pub mod storage;

pub use book::{FilterView, FlightBook, FlightFilter, QueryOptions, SaveOutcome};
pub use config::Config;
pub use error::{Error, Result};
pub use flight::{FlightDraft, FlightDuration, FlightRecord};
pub use logging::init_logging;
pub use storage::{FileStore, FlightStore, MemoryStore};
