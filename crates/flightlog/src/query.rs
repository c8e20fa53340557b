//! Read-only queries over the flight log.
//!
//! Every function here borrows the log and returns a view or a summary;
//! nothing mutates or keeps hold of the records.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::flight::{FlightDuration, FlightRecord};

pub use crate::flight::LONG_FLIGHT_THRESHOLD;

/// How many flights the upcoming view shows by default.
pub const UPCOMING_COUNT: usize = 5;

/// Every flight, unfiltered.
#[must_use]
pub fn all(flights: &[FlightRecord]) -> Vec<&FlightRecord> {
    flights.iter().collect()
}

/// Flights whose destination is exactly `destination`.
#[must_use]
pub fn filter_by_destination<'a>(
    flights: &'a [FlightRecord],
    destination: &str,
) -> Vec<&'a FlightRecord> {
    flights
        .iter()
        .filter(|f| f.destination == destination)
        .collect()
}

/// Flights going to the same destination as the selected one.
///
/// # Errors
///
/// Returns [`Error::NoSelection`] if nothing is selected.
pub fn flights_to_selected<'a>(
    flights: &'a [FlightRecord],
    selected: Option<&FlightRecord>,
) -> Result<Vec<&'a FlightRecord>> {
    let selected = selected.ok_or(Error::NoSelection)?;
    Ok(filter_by_destination(flights, &selected.destination))
}

/// Flights lasting strictly longer than `threshold`.
#[must_use]
pub fn filter_long(flights: &[FlightRecord], threshold: FlightDuration) -> Vec<&FlightRecord> {
    flights.iter().filter(|f| f.duration > threshold).collect()
}

/// The next `count` flights departing strictly after `now`, soonest first.
///
/// Flights with equal departures keep their log order.
///
/// # Errors
///
/// Returns [`Error::NoResults`] if no flight departs after `now`.
pub fn next_upcoming<'a>(
    flights: &'a [FlightRecord],
    now: &NaiveDateTime,
    count: usize,
) -> Result<Vec<&'a FlightRecord>> {
    let mut upcoming: Vec<&FlightRecord> =
        flights.iter().filter(|f| f.departs_after(now)).collect();
    upcoming.sort_by_key(|f| f.departure);
    upcoming.truncate(count);

    if upcoming.is_empty() {
        return Err(Error::no_results("no upcoming flights"));
    }
    Ok(upcoming)
}

/// Mean flight duration in whole minutes, truncated. Zero for an empty log.
#[must_use]
pub fn average_duration_minutes(flights: &[FlightRecord]) -> u32 {
    if flights.is_empty() {
        return 0;
    }
    let total: u64 = flights
        .iter()
        .map(|f| u64::from(f.duration.total_minutes()))
        .sum();
    let len = u64::try_from(flights.len()).unwrap_or(u64::MAX);
    u32::try_from(total / len).unwrap_or(u32::MAX)
}

/// Mean flight duration as a [`FlightDuration`].
#[must_use]
pub fn average_duration(flights: &[FlightRecord]) -> FlightDuration {
    // The mean of sub-day durations is itself sub-day.
    FlightDuration::from_total_minutes(average_duration_minutes(flights)).unwrap_or_default()
}

/// Number of flights per destination.
#[must_use]
pub fn count_by_destination(flights: &[FlightRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for flight in flights {
        *counts.entry(flight.destination.clone()).or_insert(0) += 1;
    }
    counts
}

/// One slice of the flights-by-destination chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationShare {
    /// Destination name.
    pub destination: String,
    /// Number of flights to it.
    pub count: usize,
    /// Share of all flights, in percent.
    pub percent: f64,
}

/// Flights per destination with their share of the total.
///
/// Largest slices first; ties are ordered by destination name.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn destination_breakdown(flights: &[FlightRecord]) -> Vec<DestinationShare> {
    let total = flights.len();
    let mut shares: Vec<DestinationShare> = count_by_destination(flights)
        .into_iter()
        .map(|(destination, count)| DestinationShare {
            destination,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();
    // BTreeMap order already sorts names; a stable sort keeps it for ties.
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
