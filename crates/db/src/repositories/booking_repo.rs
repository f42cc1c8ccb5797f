//! Repository for the `booking_requests` table.

use wedplan_core::status::BookingStatus;
use wedplan_core::types::{RowId, UserId};

use crate::error::StoreError;
use crate::models::booking::{BookingRequest, CreateBookingRequest, UpdateBookingStatus};
use crate::query::{from_row, from_rows, to_row, Select, Table};
use crate::store::DataStore;

pub struct BookingRepo;

impl BookingRepo {
    pub async fn create(
        store: &dyn DataStore,
        input: &CreateBookingRequest,
    ) -> Result<BookingRequest, StoreError> {
        let row = store.insert(Table::BookingRequests, to_row(input)?).await?;
        from_row(row)
    }

    /// Requests against any of `venue_ids`, newest first.
    pub async fn list_for_venues(
        store: &dyn DataStore,
        venue_ids: &[RowId],
    ) -> Result<Vec<BookingRequest>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::BookingRequests)
                    .is_in("venue_id", venue_ids)
                    .order_by("created_at", false),
            )
            .await?;
        from_rows(rows)
    }

    /// Requests for any of `event_ids`, newest first.
    pub async fn list_for_events(
        store: &dyn DataStore,
        event_ids: &[RowId],
    ) -> Result<Vec<BookingRequest>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::BookingRequests)
                    .is_in("event_id", event_ids)
                    .order_by("created_at", false),
            )
            .await?;
        from_rows(rows)
    }

    pub async fn list_for_requester(
        store: &dyn DataStore,
        requester_id: UserId,
    ) -> Result<Vec<BookingRequest>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::BookingRequests)
                    .eq("requester_id", requester_id)
                    .order_by("created_at", false),
            )
            .await?;
        from_rows(rows)
    }

    pub async fn update_status(
        store: &dyn DataStore,
        id: RowId,
        status: BookingStatus,
    ) -> Result<Option<BookingRequest>, StoreError> {
        let changes = to_row(&UpdateBookingStatus { status })?;
        store
            .update(Table::BookingRequests, id, changes)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn count_pending(store: &dyn DataStore) -> Result<i64, StoreError> {
        store
            .count(&Select::from(Table::BookingRequests).eq("status", BookingStatus::Pending))
            .await
    }
}
