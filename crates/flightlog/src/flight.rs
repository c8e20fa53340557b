//! Core flight types for flightlog.
//!
//! This module defines the flight record kept in the log, the sub-day
//! duration type it carries, and the unvalidated draft that user input
//! arrives as.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `chrono` format of a departure timestamp (`dd/MM/yy HH:mm`).
pub const DEPARTURE_FORMAT: &str = "%d/%m/%y %H:%M";

/// Human-readable form of [`DEPARTURE_FORMAT`], used in messages.
pub const DEPARTURE_PATTERN: &str = "dd/MM/yy HH:mm";

/// Human-readable form of the duration format, used in messages.
pub const DURATION_PATTERN: &str = "H:mm";

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("duration pattern is valid")
    })
}

/// How long a flight lasts, in hours and minutes.
///
/// Always shorter than one day. The text form is `H:mm`: one or two hour
/// digits and exactly two minute digits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FlightDuration {
    minutes: u16,
}

/// Flights strictly longer than this count as long flights.
pub const LONG_FLIGHT_THRESHOLD: FlightDuration = FlightDuration {
    minutes: 3 * MINUTES_PER_HOUR,
};

impl FlightDuration {
    /// Create a duration from hours and minutes.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `hours > 23` or `minutes > 59`.
    pub fn new(hours: u16, minutes: u16) -> Result<Self> {
        if hours >= 24 || minutes >= MINUTES_PER_HOUR {
            return Err(Error::validation(format!(
                "duration {hours}:{minutes:02} is out of range (0:00 to 23:59)"
            )));
        }
        Ok(Self {
            minutes: hours * MINUTES_PER_HOUR + minutes,
        })
    }

    /// Create a duration from a total number of minutes.
    ///
    /// Returns `None` if the total reaches a full day.
    #[must_use]
    pub fn from_total_minutes(total: u32) -> Option<Self> {
        u16::try_from(total)
            .ok()
            .filter(|m| *m < MINUTES_PER_DAY)
            .map(|minutes| Self { minutes })
    }

    /// Whole hours component.
    #[must_use]
    pub fn hours(&self) -> u16 {
        self.minutes / MINUTES_PER_HOUR
    }

    /// Remaining minutes after the whole hours.
    #[must_use]
    pub fn minutes(&self) -> u16 {
        self.minutes % MINUTES_PER_HOUR
    }

    /// The whole duration expressed in minutes.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        u32::from(self.minutes)
    }

    /// Render as `"2h 5m"`, the form used for averages.
    #[must_use]
    pub fn hours_minutes_label(&self) -> String {
        format!("{}h {}m", self.hours(), self.minutes())
    }
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for FlightDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::validation(format!(
                "invalid duration '{s}': expected {DURATION_PATTERN}"
            ))
        };
        let caps = duration_regex().captures(s).ok_or_else(invalid)?;
        let hours: u16 = caps[1].parse().map_err(|_| invalid())?;
        let minutes: u16 = caps[2].parse().map_err(|_| invalid())?;
        Self::new(hours, minutes)
    }
}

impl TryFrom<String> for FlightDuration {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FlightDuration> for String {
    fn from(duration: FlightDuration) -> Self {
        duration.to_string()
    }
}

/// Parse a departure timestamp in `dd/MM/yy HH:mm` form.
///
/// Two-digit years always land in 2000-2099.
///
/// # Errors
///
/// Returns a validation error if the text does not match the format.
pub fn parse_departure(s: &str) -> Result<NaiveDateTime> {
    let invalid = || {
        Error::validation(format!(
            "invalid departure '{s}': expected {DEPARTURE_PATTERN}"
        ))
    };
    let parsed = NaiveDateTime::parse_from_str(s, DEPARTURE_FORMAT).map_err(|_| invalid())?;
    if parsed.year() < 2000 {
        return parsed.with_year(parsed.year() + 100).ok_or_else(invalid);
    }
    Ok(parsed)
}

/// Format a departure timestamp in `dd/MM/yy HH:mm` form.
#[must_use]
pub fn format_departure(departure: &NaiveDateTime) -> String {
    departure.format(DEPARTURE_FORMAT).to_string()
}

/// A single flight in the log.
///
/// Records carry no identity: two records with equal fields are still two
/// separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Flight number, e.g. `IB3456`. Not required to be unique.
    pub flight_number: String,

    /// Destination city or airport.
    pub destination: String,

    /// Local departure date and time.
    pub departure: NaiveDateTime,

    /// Scheduled flight time.
    pub duration: FlightDuration,
}

impl FlightRecord {
    /// Create a new flight record.
    #[must_use]
    pub fn new(
        flight_number: impl Into<String>,
        destination: impl Into<String>,
        departure: NaiveDateTime,
        duration: FlightDuration,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            destination: destination.into(),
            departure,
            duration,
        }
    }

    /// Departure rendered in `dd/MM/yy HH:mm` form.
    #[must_use]
    pub fn departure_text(&self) -> String {
        format_departure(&self.departure)
    }

    /// Whether this flight departs strictly after `now`.
    #[must_use]
    pub fn departs_after(&self, now: &NaiveDateTime) -> bool {
        self.departure > *now
    }
}

/// Raw, unvalidated input for a new flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightDraft {
    /// Flight number as typed.
    pub flight_number: String,
    /// Destination as typed.
    pub destination: String,
    /// Departure as typed, expected `dd/MM/yy HH:mm`.
    pub departure: String,
    /// Duration as typed, expected `H:mm`.
    pub duration: String,
}

impl FlightDraft {
    /// Create a draft from the four input fields.
    #[must_use]
    pub fn new(
        flight_number: impl Into<String>,
        destination: impl Into<String>,
        departure: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            destination: destination.into(),
            departure: departure.into(),
            duration: duration.into(),
        }
    }

    /// Validate the draft and turn it into a record.
    ///
    /// Fields are trimmed first. All four must be non-empty, and the departure
    /// and duration must parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<FlightRecord> {
        let flight_number = self.flight_number.trim();
        let destination = self.destination.trim();
        let departure = self.departure.trim();
        let duration = self.duration.trim();

        if [flight_number, destination, departure, duration]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(Error::validation("all fields are required"));
        }

        Ok(FlightRecord::new(
            flight_number,
            destination,
            parse_departure(departure)?,
            duration.parse()?,
        ))
    }
}
