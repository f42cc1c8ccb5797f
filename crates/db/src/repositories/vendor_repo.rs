//! Repository for the `vendors` table.

use wedplan_core::status::ApprovalStatus;
use wedplan_core::types::{RowId, UserId};

use crate::error::StoreError;
use crate::models::approval::ApprovalChange;
use crate::models::vendor::{CreateVendor, UpdatePortfolio, Vendor, VendorProfileFields};
use crate::query::{from_row, from_rows, to_row, Select, Table};
use crate::store::DataStore;

pub struct VendorRepo;

impl VendorRepo {
    pub async fn create(store: &dyn DataStore, input: &CreateVendor) -> Result<Vendor, StoreError> {
        let row = store.insert(Table::Vendors, to_row(input)?).await?;
        from_row(row)
    }

    /// The listing owned by `user_id`, if the vendor has created one.
    pub async fn find_for_user(
        store: &dyn DataStore,
        user_id: UserId,
    ) -> Result<Option<Vendor>, StoreError> {
        let rows = store
            .select(&Select::from(Table::Vendors).eq("user_id", user_id).limit(1))
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    /// Approved listings for the public directory, best rated first.
    pub async fn list_directory(store: &dyn DataStore) -> Result<Vec<Vendor>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::Vendors)
                    .eq("approval_status", ApprovalStatus::Approved)
                    .order_by("rating", false)
                    .nulls_last(),
            )
            .await?;
        from_rows(rows)
    }

    /// Every listing regardless of review state, newest first.
    pub async fn list_all(store: &dyn DataStore) -> Result<Vec<Vendor>, StoreError> {
        let rows = store
            .select(&Select::from(Table::Vendors).order_by("created_at", false))
            .await?;
        from_rows(rows)
    }

    pub async fn update_profile(
        store: &dyn DataStore,
        id: RowId,
        fields: &VendorProfileFields,
    ) -> Result<Option<Vendor>, StoreError> {
        store
            .update(Table::Vendors, id, to_row(fields)?)
            .await?
            .map(from_row)
            .transpose()
    }

    /// Replace the portfolio image list.
    pub async fn set_portfolio(
        store: &dyn DataStore,
        id: RowId,
        images: Vec<String>,
    ) -> Result<Option<Vendor>, StoreError> {
        let changes = to_row(&UpdatePortfolio {
            portfolio_images: images,
        })?;
        store
            .update(Table::Vendors, id, changes)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn review(
        store: &dyn DataStore,
        id: RowId,
        change: &ApprovalChange,
    ) -> Result<Option<Vendor>, StoreError> {
        store
            .update(Table::Vendors, id, to_row(change)?)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn count(store: &dyn DataStore) -> Result<i64, StoreError> {
        store.count(&Select::from(Table::Vendors)).await
    }
}
