//! Repository for the `events` table.

use wedplan_core::status::EventStatus;
use wedplan_core::types::{RowId, UserId};

use crate::error::StoreError;
use crate::models::event::{CreateEvent, Event, UpdateEventStatus};
use crate::query::{from_row, from_rows, to_row, Select, Table};
use crate::store::DataStore;

pub struct EventRepo;

impl EventRepo {
    pub async fn create(store: &dyn DataStore, input: &CreateEvent) -> Result<Event, StoreError> {
        let row = store.insert(Table::Events, to_row(input)?).await?;
        from_row(row)
    }

    /// Events owned by a couple, soonest first.
    pub async fn list_for_couple(
        store: &dyn DataStore,
        couple_id: UserId,
    ) -> Result<Vec<Event>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::Events)
                    .eq("couple_id", couple_id)
                    .order_by("event_date", true),
            )
            .await?;
        from_rows(rows)
    }

    /// Events assigned to a planner, soonest first.
    pub async fn list_for_planner(
        store: &dyn DataStore,
        planner_id: UserId,
    ) -> Result<Vec<Event>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::Events)
                    .eq("planner_id", planner_id)
                    .order_by("event_date", true),
            )
            .await?;
        from_rows(rows)
    }

    /// Events a user can see as couple or planner, soonest first.
    pub async fn list_for_member(
        store: &dyn DataStore,
        user_id: UserId,
    ) -> Result<Vec<Event>, StoreError> {
        let (mut own, planned) = futures::try_join!(
            Self::list_for_couple(store, user_id),
            Self::list_for_planner(store, user_id)
        )?;
        for event in planned {
            if !own.iter().any(|e| e.id == event.id) {
                own.push(event);
            }
        }
        own.sort_by_key(|e| e.event_date);
        Ok(own)
    }

    /// Returns `None` if no event with the given `id` exists.
    pub async fn update_status(
        store: &dyn DataStore,
        id: RowId,
        status: EventStatus,
    ) -> Result<Option<Event>, StoreError> {
        let changes = to_row(&UpdateEventStatus { status })?;
        store
            .update(Table::Events, id, changes)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn count(store: &dyn DataStore) -> Result<i64, StoreError> {
        store.count(&Select::from(Table::Events)).await
    }
}
