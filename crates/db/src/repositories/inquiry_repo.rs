//! Repository for the `vendor_inquiries` table.

use wedplan_core::status::InquiryStatus;
use wedplan_core::types::RowId;

use crate::error::StoreError;
use crate::models::inquiry::{CreateInquiry, UpdateInquiryStatus, VendorInquiry};
use crate::query::{from_row, from_rows, to_row, Select, Table};
use crate::store::DataStore;

pub struct InquiryRepo;

impl InquiryRepo {
    pub async fn create(
        store: &dyn DataStore,
        input: &CreateInquiry,
    ) -> Result<VendorInquiry, StoreError> {
        let row = store.insert(Table::VendorInquiries, to_row(input)?).await?;
        from_row(row)
    }

    /// Inquiries addressed to a vendor listing, newest first.
    pub async fn list_for_vendor(
        store: &dyn DataStore,
        vendor_id: RowId,
    ) -> Result<Vec<VendorInquiry>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::VendorInquiries)
                    .eq("vendor_id", vendor_id)
                    .order_by("created_at", false),
            )
            .await?;
        from_rows(rows)
    }

    /// Inquiries about any of `event_ids`, newest first.
    pub async fn list_for_events(
        store: &dyn DataStore,
        event_ids: &[RowId],
    ) -> Result<Vec<VendorInquiry>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::VendorInquiries)
                    .is_in("event_id", event_ids)
                    .order_by("created_at", false),
            )
            .await?;
        from_rows(rows)
    }

    pub async fn update_status(
        store: &dyn DataStore,
        id: RowId,
        status: InquiryStatus,
    ) -> Result<Option<VendorInquiry>, StoreError> {
        let changes = to_row(&UpdateInquiryStatus { status })?;
        store
            .update(Table::VendorInquiries, id, changes)
            .await?
            .map(from_row)
            .transpose()
    }
}
