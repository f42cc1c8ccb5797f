//! Per-venue availability calendar.
//!
//! A venue is available on every date that has no entry. Marking a date
//! unavailable writes an entry with `is_available = false`; marking it
//! available again removes the entry.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Date;

/// The store mutation a toggle requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "date", rename_all = "snake_case")]
pub enum AvailabilityChange {
    /// Write (or overwrite) the entry for this date with `is_available = false`.
    MarkUnavailable(Date),
    /// Delete the entry for this date.
    MarkAvailable(Date),
}

impl AvailabilityChange {
    pub fn date(self) -> Date {
        match self {
            AvailabilityChange::MarkUnavailable(d) | AvailabilityChange::MarkAvailable(d) => d,
        }
    }
}

/// Loaded availability entries for one venue, keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    entries: BTreeMap<Date, bool>,
}

impl AvailabilityCalendar {
    /// Build from `(date, is_available)` rows. A later duplicate date wins.
    pub fn from_entries(entries: impl IntoIterator<Item = (Date, bool)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn is_available(&self, date: Date) -> bool {
        self.entries.get(&date).copied().unwrap_or(true)
    }

    /// Dates currently marked unavailable, ascending.
    pub fn unavailable_dates(&self) -> Vec<Date> {
        self.entries
            .iter()
            .filter(|(_, available)| !**available)
            .map(|(date, _)| *date)
            .collect()
    }

    /// Decide the change that flips `date`. Does not modify the calendar.
    pub fn toggle(&self, date: Date) -> AvailabilityChange {
        if self.is_available(date) {
            AvailabilityChange::MarkUnavailable(date)
        } else {
            AvailabilityChange::MarkAvailable(date)
        }
    }
}
