//! The flight book: the in-memory log plus the store it persists to.
//!
//! A [`FlightBook`] is what a front end talks to. Each method is one user
//! action (add a flight, delete the selected one, apply a filter). Actions
//! that change the log save it straight away.

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::flight::{FlightDraft, FlightDuration, FlightRecord, LONG_FLIGHT_THRESHOLD};
use crate::query::{self, DestinationShare, UPCOMING_COUNT};
use crate::storage::{load_or_empty, FlightStore};

/// The views a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlightFilter {
    /// Every flight.
    #[default]
    All,
    /// Flights to the selected flight's destination.
    SelectedDestination,
    /// Flights longer than the long-flight threshold.
    Long,
    /// The next few departures.
    NextUpcoming,
    /// A message with the mean flight duration.
    AverageDuration,
}

impl FlightFilter {
    /// Menu label for this filter, naming how many flights the upcoming
    /// view shows.
    #[must_use]
    pub fn label(&self, upcoming_count: usize) -> String {
        match self {
            Self::All => "Show all flights".to_string(),
            Self::SelectedDestination => "Show flights to currently selected city".to_string(),
            Self::Long => "Show long flights".to_string(),
            Self::NextUpcoming => format!("Show next {upcoming_count} flights"),
            Self::AverageDuration => "Show flight duration average".to_string(),
        }
    }
}

/// What applying a filter produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterView<'a> {
    /// A list of flights to show in place of the current one.
    Flights(Vec<&'a FlightRecord>),
    /// A message to show; the current list stays as it is.
    Message(String),
}

/// Whether a change made it to the store.
///
/// The in-memory change stands either way.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The log was written.
    Saved,
    /// The log could not be written.
    Failed {
        /// Why the write failed.
        reason: String,
    },
}

impl SaveOutcome {
    /// Whether the log was written.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Tunables for the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Flights strictly longer than this are long flights.
    pub long_flight_threshold: FlightDuration,
    /// How many flights the upcoming view shows.
    pub upcoming_count: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            long_flight_threshold: LONG_FLIGHT_THRESHOLD,
            upcoming_count: UPCOMING_COUNT,
        }
    }
}

/// The flight log held in memory, backed by a [`FlightStore`].
#[derive(Debug)]
pub struct FlightBook<S: FlightStore> {
    store: S,
    flights: Vec<FlightRecord>,
    options: QueryOptions,
}

impl<S: FlightStore> FlightBook<S> {
    /// Open the book, loading whatever the store holds.
    ///
    /// An unreadable store gives an empty book; the cause is logged.
    pub fn open(store: S) -> Self {
        let flights = load_or_empty(&store);
        info!("Opened flight book with {} flights", flights.len());
        Self {
            store,
            flights,
            options: QueryOptions::default(),
        }
    }

    /// Replace the filter tunables.
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// The filter tunables in use.
    #[must_use]
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All flights, in log order.
    #[must_use]
    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    /// Number of flights in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// The flight at `index` (0-based), if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FlightRecord> {
        self.flights.get(index)
    }

    /// Position (0-based) of `flight` in the log.
    ///
    /// Matches by address, so only references into this book are found and
    /// equal-looking duplicates are told apart.
    #[must_use]
    pub fn position_of(&self, flight: &FlightRecord) -> Option<usize> {
        self.flights.iter().position(|f| std::ptr::eq(f, flight))
    }

    /// Validate `draft`, append it, and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the draft is rejected; the log is
    /// left untouched.
    pub fn add(&mut self, draft: &FlightDraft) -> Result<SaveOutcome> {
        let flight = draft.validate()?;
        info!(
            "Adding flight {} to {}",
            flight.flight_number, flight.destination
        );
        self.flights.push(flight);
        Ok(self.save())
    }

    /// Remove the selected flight and save.
    ///
    /// Only the flight at that position is removed, even if others have the
    /// same fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] if `selection` is `None` or past the end.
    pub fn delete(&mut self, selection: Option<usize>) -> Result<(FlightRecord, SaveOutcome)> {
        let index = selection
            .filter(|i| *i < self.flights.len())
            .ok_or(Error::NoSelection)?;
        let removed = self.flights.remove(index);
        info!(
            "Deleted flight {} to {}",
            removed.flight_number, removed.destination
        );
        Ok((removed, self.save()))
    }

    /// Apply a filter to the log.
    ///
    /// `selection` is the currently selected position, used by
    /// [`FlightFilter::SelectedDestination`]. `now` is the reference time for
    /// [`FlightFilter::NextUpcoming`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] or [`Error::NoResults`]; the caller
    /// should keep showing whatever it showed before.
    pub fn apply(
        &self,
        filter: FlightFilter,
        selection: Option<usize>,
        now: &NaiveDateTime,
    ) -> Result<FilterView<'_>> {
        let view = match filter {
            FlightFilter::All => FilterView::Flights(query::all(&self.flights)),
            FlightFilter::SelectedDestination => {
                let selected = selection.and_then(|i| self.flights.get(i));
                FilterView::Flights(query::flights_to_selected(&self.flights, selected)?)
            }
            FlightFilter::Long => FilterView::Flights(query::filter_long(
                &self.flights,
                self.options.long_flight_threshold,
            )),
            FlightFilter::NextUpcoming => FilterView::Flights(query::next_upcoming(
                &self.flights,
                now,
                self.options.upcoming_count,
            )?),
            FlightFilter::AverageDuration => FilterView::Message(format!(
                "Average duration: {}",
                query::average_duration(&self.flights).hours_minutes_label()
            )),
        };
        Ok(view)
    }

    /// Label for `filter` as this book would apply it.
    #[must_use]
    pub fn filter_label(&self, filter: FlightFilter) -> String {
        filter.label(self.options.upcoming_count)
    }

    /// Flights per destination, for the chart view.
    #[must_use]
    pub fn breakdown(&self) -> Vec<DestinationShare> {
        query::destination_breakdown(&self.flights)
    }

    /// Write the whole log to the store.
    pub fn save(&self) -> SaveOutcome {
        match self.store.save(&self.flights) {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                error!("Failed to save flights to {}: {}", self.store.location(), e);
                SaveOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::parse_departure;
    use crate::storage::MemoryStore;

    fn draft(number: &str, destination: &str, departure: &str, duration: &str) -> FlightDraft {
        FlightDraft::new(number, destination, departure, duration)
    }

    fn seeded_book() -> FlightBook<MemoryStore> {
        let flights = [
            draft("AA100", "Paris", "01/01/25 10:00", "2:30"),
            draft("AA101", "Paris", "02/01/25 11:00", "4:00"),
            draft("BA200", "London", "03/01/25 09:00", "3:00"),
        ]
        .iter()
        .map(|d| d.validate().unwrap())
        .collect();
        FlightBook::open(MemoryStore::with_flights(flights))
    }

    fn numbers(view: &FilterView<'_>) -> Vec<String> {
        match view {
            FilterView::Flights(flights) => {
                flights.iter().map(|f| f.flight_number.clone()).collect()
            }
            FilterView::Message(msg) => panic!("expected flights, got message {msg:?}"),
        }
    }

    fn now() -> NaiveDateTime {
        parse_departure("01/01/25 12:00").unwrap()
    }

    #[test]
    fn test_open_loads_store() {
        let book = seeded_book();
        assert_eq!(book.len(), 3);
        assert!(!book.is_empty());
        assert_eq!(book.get(2).unwrap().flight_number, "BA200");
        assert!(book.get(3).is_none());
    }

    #[test]
    fn test_open_empty_store() {
        let book = FlightBook::open(MemoryStore::new());
        assert!(book.is_empty());
        assert_eq!(book.options(), &QueryOptions::default());
    }

    #[test]
    fn test_add_appends_and_saves() {
        let mut book = seeded_book();
        let outcome = book
            .add(&draft("IB400", "Madrid", "05/01/25 07:15", "1:10"))
            .unwrap();

        assert!(outcome.is_saved());
        assert_eq!(book.len(), 4);
        assert_eq!(book.flights()[3].flight_number, "IB400");
        assert_eq!(book.store().save_count(), 1);
        assert_eq!(book.store().snapshot(), book.flights());
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let mut book = seeded_book();

        let err = book
            .add(&draft("IB400", "", "05/01/25 07:15", "1:10"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let err = book
            .add(&draft("IB400", "Madrid", "05-01-2025", "1:10"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        assert_eq!(book.len(), 3);
        assert_eq!(book.store().save_count(), 0);
    }

    #[test]
    fn test_add_allows_duplicates() {
        let mut book = seeded_book();
        let _ = book
            .add(&draft("AA100", "Paris", "01/01/25 10:00", "2:30"))
            .unwrap();
        assert_eq!(book.len(), 4);
        assert_eq!(book.flights()[0], book.flights()[3]);
    }

    #[test]
    fn test_add_with_failing_store_keeps_change() {
        let mut book = FlightBook::open(MemoryStore::failing());
        let outcome = book
            .add(&draft("IB400", "Madrid", "05/01/25 07:15", "1:10"))
            .unwrap();

        assert!(!outcome.is_saved());
        assert!(matches!(outcome, SaveOutcome::Failed { .. }));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_delete_selected() {
        let mut book = seeded_book();
        let (removed, outcome) = book.delete(Some(1)).unwrap();

        assert_eq!(removed.flight_number, "AA101");
        assert!(outcome.is_saved());
        assert_eq!(book.len(), 2);
        assert_eq!(book.store().snapshot().len(), 2);
    }

    #[test]
    fn test_delete_removes_only_selected_duplicate() {
        let mut book = seeded_book();
        let _ = book
            .add(&draft("AA100", "Paris", "01/01/25 10:00", "2:30"))
            .unwrap();

        let (removed, _) = book.delete(Some(3)).unwrap();
        assert_eq!(removed.flight_number, "AA100");
        assert_eq!(book.len(), 3);
        assert_eq!(book.flights()[0].flight_number, "AA100");
    }

    #[test]
    fn test_delete_without_selection() {
        let mut book = seeded_book();
        assert!(matches!(book.delete(None), Err(Error::NoSelection)));
        assert!(matches!(book.delete(Some(10)), Err(Error::NoSelection)));
        assert_eq!(book.len(), 3);
        assert_eq!(book.store().save_count(), 0);
    }

    #[test]
    fn test_apply_all() {
        let book = seeded_book();
        let view = book.apply(FlightFilter::All, None, &now()).unwrap();
        assert_eq!(numbers(&view), vec!["AA100", "AA101", "BA200"]);
    }

    #[test]
    fn test_apply_selected_destination() {
        let book = seeded_book();
        let view = book
            .apply(FlightFilter::SelectedDestination, Some(0), &now())
            .unwrap();
        assert_eq!(numbers(&view), vec!["AA100", "AA101"]);
    }

    #[test]
    fn test_apply_selected_destination_without_selection() {
        let book = seeded_book();
        let err = book
            .apply(FlightFilter::SelectedDestination, None, &now())
            .unwrap_err();
        assert!(matches!(err, Error::NoSelection));

        let err = book
            .apply(FlightFilter::SelectedDestination, Some(99), &now())
            .unwrap_err();
        assert!(matches!(err, Error::NoSelection));
    }

    #[test]
    fn test_apply_long() {
        let book = seeded_book();
        let view = book.apply(FlightFilter::Long, None, &now()).unwrap();
        assert_eq!(numbers(&view), vec!["AA101"]);
    }

    #[test]
    fn test_apply_long_with_custom_threshold() {
        let book = seeded_book().with_options(QueryOptions {
            long_flight_threshold: FlightDuration::new(2, 0).unwrap(),
            upcoming_count: UPCOMING_COUNT,
        });
        let view = book.apply(FlightFilter::Long, None, &now()).unwrap();
        assert_eq!(numbers(&view), vec!["AA100", "AA101", "BA200"]);
    }

    #[test]
    fn test_apply_next_upcoming() {
        let book = seeded_book();
        let view = book
            .apply(FlightFilter::NextUpcoming, None, &now())
            .unwrap();
        assert_eq!(numbers(&view), vec!["AA101", "BA200"]);
    }

    #[test]
    fn test_apply_next_upcoming_respects_count() {
        let book = seeded_book().with_options(QueryOptions {
            upcoming_count: 1,
            ..QueryOptions::default()
        });
        let view = book
            .apply(FlightFilter::NextUpcoming, None, &now())
            .unwrap();
        assert_eq!(numbers(&view), vec!["AA101"]);
    }

    #[test]
    fn test_apply_next_upcoming_no_results() {
        let book = seeded_book();
        let later = parse_departure("01/01/30 00:00").unwrap();
        let err = book
            .apply(FlightFilter::NextUpcoming, None, &later)
            .unwrap_err();
        assert!(matches!(err, Error::NoResults { .. }));
    }

    #[test]
    fn test_apply_average_duration() {
        let book = seeded_book();
        // (150 + 240 + 180) / 3 = 190
        let view = book
            .apply(FlightFilter::AverageDuration, None, &now())
            .unwrap();
        assert_eq!(view, FilterView::Message("Average duration: 3h 10m".to_string()));
    }

    #[test]
    fn test_apply_average_duration_empty() {
        let book = FlightBook::open(MemoryStore::new());
        let view = book
            .apply(FlightFilter::AverageDuration, None, &now())
            .unwrap();
        assert_eq!(view, FilterView::Message("Average duration: 0h 0m".to_string()));
    }

    #[test]
    fn test_apply_does_not_mutate() {
        let book = seeded_book();
        let before = book.flights().to_vec();
        for filter in [
            FlightFilter::All,
            FlightFilter::SelectedDestination,
            FlightFilter::Long,
            FlightFilter::NextUpcoming,
            FlightFilter::AverageDuration,
        ] {
            let _ = book.apply(filter, Some(0), &now());
        }
        assert_eq!(book.flights(), before.as_slice());
        assert_eq!(book.store().save_count(), 0);
    }

    #[test]
    fn test_breakdown() {
        let book = seeded_book();
        let shares = book.breakdown();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].destination, "Paris");
        assert_eq!(shares[0].count, 2);
    }

    #[test]
    fn test_filter_labels() {
        assert_eq!(FlightFilter::default(), FlightFilter::All);
        assert_eq!(FlightFilter::Long.label(5), "Show long flights");
        assert_eq!(FlightFilter::NextUpcoming.label(5), "Show next 5 flights");
    }

    #[test]
    fn test_filter_label_follows_upcoming_count() {
        let book = seeded_book().with_options(QueryOptions {
            upcoming_count: 2,
            ..QueryOptions::default()
        });
        assert_eq!(
            book.filter_label(FlightFilter::NextUpcoming),
            "Show next 2 flights"
        );
        assert_eq!(book.filter_label(FlightFilter::All), "Show all flights");
    }

    #[test]
    fn test_position_of_tells_duplicates_apart() {
        let mut book = seeded_book();
        let _ = book
            .add(&draft("AA100", "Paris", "01/01/25 10:00", "2:30"))
            .unwrap();

        assert_eq!(book.position_of(&book.flights()[3]), Some(3));
        assert_eq!(book.position_of(&book.flights()[0]), Some(0));

        let copy = book.flights()[0].clone();
        assert_eq!(book.position_of(&copy), None);
    }

    #[test]
    fn test_explicit_save() {
        let book = seeded_book();
        assert!(book.save().is_saved());
        assert_eq!(book.store().save_count(), 1);
    }
}
