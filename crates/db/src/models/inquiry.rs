//! Vendor inquiry model and DTOs.

use serde::{Deserialize, Serialize};
use wedplan_core::status::InquiryStatus;
use wedplan_core::types::{RowId, Timestamp, UserId};

/// A row from the `vendor_inquiries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorInquiry {
    pub id: RowId,
    pub vendor_id: RowId,
    pub event_id: RowId,
    pub inquirer_id: UserId,
    pub message: Option<String>,
    pub status: InquiryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for sending an inquiry to a vendor about an event. Starts pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInquiry {
    pub vendor_id: RowId,
    pub event_id: RowId,
    pub inquirer_id: UserId,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateInquiryStatus {
    pub status: InquiryStatus,
}
