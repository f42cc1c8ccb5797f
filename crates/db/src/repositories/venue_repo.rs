//! Repository for the `venues` table.

use wedplan_core::status::ApprovalStatus;
use wedplan_core::types::{RowId, UserId};

use crate::error::StoreError;
use crate::models::approval::ApprovalChange;
use crate::models::venue::{CreateVenue, Venue};
use crate::query::{from_row, from_rows, to_row, Select, Table};
use crate::store::DataStore;

pub struct VenueRepo;

impl VenueRepo {
    pub async fn create(store: &dyn DataStore, input: &CreateVenue) -> Result<Venue, StoreError> {
        let row = store.insert(Table::Venues, to_row(input)?).await?;
        from_row(row)
    }

    pub async fn find_by_id(store: &dyn DataStore, id: RowId) -> Result<Option<Venue>, StoreError> {
        let rows = store
            .select(&Select::from(Table::Venues).eq("id", id).limit(1))
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    /// Approved venues for the public directory, best rated first, unrated last.
    pub async fn list_directory(store: &dyn DataStore) -> Result<Vec<Venue>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::Venues)
                    .eq("approval_status", ApprovalStatus::Approved)
                    .order_by("rating", false)
                    .nulls_last(),
            )
            .await?;
        from_rows(rows)
    }

    /// Venues managed by `manager_id`, newest first.
    pub async fn list_for_manager(
        store: &dyn DataStore,
        manager_id: UserId,
    ) -> Result<Vec<Venue>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::Venues)
                    .eq("manager_id", manager_id)
                    .order_by("created_at", false),
            )
            .await?;
        from_rows(rows)
    }

    /// Every venue regardless of review state, newest first.
    pub async fn list_all(store: &dyn DataStore) -> Result<Vec<Venue>, StoreError> {
        let rows = store
            .select(&Select::from(Table::Venues).order_by("created_at", false))
            .await?;
        from_rows(rows)
    }

    pub async fn review(
        store: &dyn DataStore,
        id: RowId,
        change: &ApprovalChange,
    ) -> Result<Option<Venue>, StoreError> {
        store
            .update(Table::Venues, id, to_row(change)?)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn count(store: &dyn DataStore) -> Result<i64, StoreError> {
        store.count(&Select::from(Table::Venues)).await
    }
}
