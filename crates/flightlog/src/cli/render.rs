//! Text rendering for command output.

use std::fmt::Write as _;

use serde::Serialize;

use crate::flight::FlightRecord;
use crate::query::DestinationShare;

/// Width of a full chart bar, in characters.
const BAR_WIDTH: usize = 30;

/// A flight together with its 1-based position in the log.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Row<'a> {
    /// 1-based position, as accepted by `--select` and `delete`.
    pub position: usize,
    /// The flight itself.
    #[serde(flatten)]
    pub flight: &'a FlightRecord,
}

/// One line per flight, fields separated by two spaces.
#[must_use]
pub fn plain(rows: &[Row<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}  {}",
            row.position,
            row.flight.flight_number,
            row.flight.destination,
            row.flight.departure_text(),
            row.flight.duration
        );
    }
    out
}

/// Aligned table with a header line.
#[must_use]
pub fn table(rows: &[Row<'_>]) -> String {
    if rows.is_empty() {
        return "No flights.\n".to_string();
    }

    let number_width = column_width("Flight", rows.iter().map(|r| r.flight.flight_number.as_str()));
    let destination_width =
        column_width("Destination", rows.iter().map(|r| r.flight.destination.as_str()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<number_width$}  {:<destination_width$}  {:<14}  {:>8}",
        "#", "Flight", "Destination", "Departure", "Duration"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>3}  {:<number_width$}  {:<destination_width$}  {:<14}  {:>8}",
            row.position,
            row.flight.flight_number,
            row.flight.destination,
            row.flight.departure_text(),
            row.flight.duration.to_string()
        );
    }
    out
}

fn column_width<'a>(title: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.len())
}

/// Horizontal bar chart of flights per destination.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn chart(shares: &[DestinationShare]) -> String {
    let mut out = String::from("Flights By Destination\n");
    if shares.is_empty() {
        out.push_str("No flights.\n");
        return out;
    }

    let name_width = column_width("", shares.iter().map(|s| s.destination.as_str()));
    for share in shares {
        let bar_len = ((share.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>3}  {:>5.1}%  {}",
            share.destination,
            share.count,
            share.percent,
            "#".repeat(bar_len.max(1))
        );
    }
    out
}
