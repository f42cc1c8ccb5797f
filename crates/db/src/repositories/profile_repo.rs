//! Repository for the `profiles` table.

use wedplan_core::types::UserId;

use crate::error::StoreError;
use crate::models::profile::{CreateProfile, Profile};
use crate::query::{from_row, from_rows, to_row, Select, Table};
use crate::store::DataStore;

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(
        store: &dyn DataStore,
        id: UserId,
    ) -> Result<Option<Profile>, StoreError> {
        let rows = store
            .select(&Select::from(Table::Profiles).eq("id", id).limit(1))
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    /// Return the profile for `input.id`, creating it on first sign-in.
    pub async fn ensure(store: &dyn DataStore, input: &CreateProfile) -> Result<Profile, StoreError> {
        if let Some(existing) = Self::find_by_id(store, input.id).await? {
            return Ok(existing);
        }
        let row = store.insert(Table::Profiles, to_row(input)?).await?;
        from_row(row)
    }

    /// All profiles, newest first.
    pub async fn list(store: &dyn DataStore) -> Result<Vec<Profile>, StoreError> {
        let rows = store
            .select(&Select::from(Table::Profiles).order_by("created_at", false))
            .await?;
        from_rows(rows)
    }

    pub async fn count(store: &dyn DataStore) -> Result<i64, StoreError> {
        store.count(&Select::from(Table::Profiles)).await
    }
}
