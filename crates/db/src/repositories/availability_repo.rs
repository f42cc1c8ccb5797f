//! Repository for the `venue_availability` table.

use wedplan_core::availability::{AvailabilityCalendar, AvailabilityChange};
use wedplan_core::types::RowId;

use crate::error::StoreError;
use crate::models::availability::{AvailabilityEntry, CreateAvailability};
use crate::query::{from_rows, to_row, Filter, Select, Table};
use crate::store::DataStore;

pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// Entries marking `venue_id` unavailable, by date.
    pub async fn unavailable_for(
        store: &dyn DataStore,
        venue_id: RowId,
    ) -> Result<Vec<AvailabilityEntry>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::VenueAvailability)
                    .eq("venue_id", venue_id)
                    .eq("is_available", false)
                    .order_by("date", true),
            )
            .await?;
        from_rows(rows)
    }

    pub async fn calendar(
        store: &dyn DataStore,
        venue_id: RowId,
    ) -> Result<AvailabilityCalendar, StoreError> {
        let entries = Self::unavailable_for(store, venue_id).await?;
        Ok(AvailabilityCalendar::from_entries(
            entries.into_iter().map(|e| (e.date, e.is_available)),
        ))
    }

    /// Write a toggle decided by [`AvailabilityCalendar::toggle`].
    ///
    /// Marking unavailable replaces any existing entry for the date so the
    /// one-entry-per-date constraint holds.
    pub async fn apply(
        store: &dyn DataStore,
        venue_id: RowId,
        change: AvailabilityChange,
    ) -> Result<(), StoreError> {
        let date = change.date();
        let same_day = [
            Filter::eq("venue_id", venue_id),
            Filter::eq("date", date),
        ];
        match change {
            AvailabilityChange::MarkAvailable(_) => {
                store.delete(Table::VenueAvailability, &same_day).await?;
            }
            AvailabilityChange::MarkUnavailable(_) => {
                store.delete(Table::VenueAvailability, &same_day).await?;
                let input = CreateAvailability {
                    venue_id,
                    date,
                    is_available: false,
                };
                store
                    .insert(Table::VenueAvailability, to_row(&input)?)
                    .await?;
            }
        }
        tracing::debug!(%venue_id, %date, ?change, "Applied availability change");
        Ok(())
    }
}
