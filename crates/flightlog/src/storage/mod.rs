//! Storage layer for flightlog.
//!
//! This module provides persistence for the flight log behind the
//! [`FlightStore`] trait: a flat text file for real use and an in-memory
//! store for tests.

pub mod format;

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::flight::FlightRecord;

pub use format::{Decoded, RejectedLine, HEADER};

/// Somewhere the flight log can be loaded from and saved to.
///
/// Saving always replaces the whole log; there are no partial writes.
pub trait FlightStore {
    /// Short human-readable description of where flights live.
    fn location(&self) -> String;

    /// Load every stored flight, in stored order.
    ///
    /// Malformed entries are skipped, not reported as errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileUnavailable`] if the store cannot be read.
    fn load(&self) -> Result<Vec<FlightRecord>>;

    /// Replace the stored flights with `flights`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileUnavailable`] if the store cannot be written.
    fn save(&self, flights: &[FlightRecord]) -> Result<()>;
}

/// Load flights, falling back to an empty log if the store is unavailable.
///
/// The cause is logged. This never fails, so a missing file on first start
/// just means an empty log.
pub fn load_or_empty<S: FlightStore + ?Sized>(store: &S) -> Vec<FlightRecord> {
    match store.load() {
        Ok(flights) => flights,
        Err(e) => {
            warn!("Could not load flights from {}: {}", store.location(), e);
            Vec::new()
        }
    }
}

/// Flight log kept in a `;`-delimited text file.
///
/// No atomic rename and no backup: a crash during save can truncate the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the flights file.
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the flights file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and decode the file, keeping the list of skipped lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileUnavailable`] if the file cannot be read.
    pub fn load_decoded(&self) -> Result<Decoded> {
        debug!("Loading flights from {}", self.path.display());
        let text = fs::read_to_string(&self.path)
            .map_err(|source| Error::file_unavailable(&self.path, source))?;

        let decoded = format::decode(&text);
        if decoded.rejected.is_empty() {
            debug!("Loaded {} flights", decoded.flights.len());
        } else {
            info!(
                "Loaded {} flights, skipped {} malformed lines",
                decoded.flights.len(),
                decoded.rejected.len()
            );
        }
        Ok(decoded)
    }
}

impl FlightStore for FileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<FlightRecord>> {
        self.load_decoded().map(|decoded| decoded.flights)
    }

    fn save(&self, flights: &[FlightRecord]) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|source| Error::file_unavailable(parent, source))?;
            }
        }

        fs::write(&self.path, format::encode(flights))
            .map_err(|source| Error::file_unavailable(&self.path, source))?;

        debug!("Saved {} flights to {}", flights.len(), self.path.display());
        Ok(())
    }
}

/// In-memory flight store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    flights: RefCell<Vec<FlightRecord>>,
    fail_saves: bool,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `flights`.
    #[must_use]
    pub fn with_flights(flights: Vec<FlightRecord>) -> Self {
        Self {
            flights: RefCell::new(flights),
            ..Self::default()
        }
    }

    /// Create a store whose saves always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Copy of the currently stored flights.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FlightRecord> {
        self.flights.borrow().clone()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl FlightStore for MemoryStore {
    fn location(&self) -> String {
        ":memory:".to_string()
    }

    fn load(&self) -> Result<Vec<FlightRecord>> {
        Ok(self.snapshot())
    }

    fn save(&self, flights: &[FlightRecord]) -> Result<()> {
        if self.fail_saves {
            return Err(Error::file_unavailable(
                ":memory:",
                io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            ));
        }
        *self.flights.borrow_mut() = flights.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
