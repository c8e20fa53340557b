//! Line format of the flights file.
//!
//! The file is plain text: a fixed header line followed by one record per
//! line, four fields separated by `;`:
//!
//! ```text
//! FlightNumber;Destination;DepartureDateTime;Duration
//! AA100;Paris;01/01/25 10:00;2:30
//! ```
//!
//! There is no escaping, so a field containing `;` cannot round-trip. Such a
//! line is rejected on the next load like any other malformed line.

use tracing::warn;

use crate::error::{Error, Result};
use crate::flight::{parse_departure, FlightRecord};

/// Header written as the first line of every flights file.
pub const HEADER: &str = "FlightNumber;Destination;DepartureDateTime;Duration";

/// Field separator.
pub const DELIMITER: char = ';';

/// Number of fields on a record line.
pub const FIELD_COUNT: usize = 4;

/// A record line that was skipped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the file.
    pub line: usize,
    /// The raw line text.
    pub content: String,
    /// Why it was rejected.
    pub reason: String,
}

impl From<&RejectedLine> for Error {
    fn from(rejected: &RejectedLine) -> Self {
        Self::MalformedRecordLine {
            line: rejected.line,
            reason: rejected.reason.clone(),
        }
    }
}

/// Result of decoding a whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Records in file order.
    pub flights: Vec<FlightRecord>,
    /// Lines that were skipped.
    pub rejected: Vec<RejectedLine>,
}

/// Format one record as a file line (without line terminator).
#[must_use]
pub fn format_line(flight: &FlightRecord) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
        flight.flight_number,
        flight.destination,
        flight.departure_text(),
        flight.duration
    )
}

/// Parse one record line.
///
/// # Errors
///
/// Returns a validation error if the line does not have exactly four fields,
/// if the flight number or destination is empty, or if the departure or
/// duration does not parse.
pub fn parse_line(line: &str) -> Result<FlightRecord> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(Error::validation(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    }

    let (flight_number, destination) = (fields[0], fields[1]);
    if flight_number.is_empty() {
        return Err(Error::validation("empty flight number"));
    }
    if destination.is_empty() {
        return Err(Error::validation("empty destination"));
    }

    Ok(FlightRecord::new(
        flight_number,
        destination,
        parse_departure(fields[2])?,
        fields[3].parse()?,
    ))
}

/// Encode records as a complete file, header included.
#[must_use]
pub fn encode(flights: &[FlightRecord]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + flights.len() * 40);
    out.push_str(HEADER);
    out.push('\n');
    for flight in flights {
        out.push_str(&format_line(flight));
        out.push('\n');
    }
    out
}

/// Decode a complete file.
///
/// The first line is always treated as the header and discarded. Blank lines
/// are ignored. Malformed lines are logged and skipped; decoding never fails.
#[must_use]
pub fn decode(text: &str) -> Decoded {
    let mut decoded = Decoded::default();

    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(flight) => decoded.flights.push(flight),
            Err(err) => {
                let rejected = RejectedLine {
                    line: index + 1,
                    content: line.to_string(),
                    reason: err.to_string(),
                };
                warn!(
                    "Skipping {}: {}",
                    Error::from(&rejected),
                    rejected.content
                );
                decoded.rejected.push(rejected);
            }
        }
    }

    decoded
}
