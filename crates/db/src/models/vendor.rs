//! Vendor listing model and DTOs.

use serde::{Deserialize, Serialize};
use wedplan_core::directory::VendorListing;
use wedplan_core::status::{ApprovalStatus, VendorCategory};
use wedplan_core::types::{RowId, Timestamp, UserId};
use wedplan_core::validation::VendorProfile;

/// A row from the `vendors` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: RowId,
    pub user_id: UserId,
    pub business_name: String,
    pub category: VendorCategory,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<String>,
    pub portfolio_images: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub approval_status: Option<ApprovalStatus>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Vendor {
    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status.unwrap_or(ApprovalStatus::Pending)
    }

    pub fn portfolio(&self) -> &[String] {
        self.portfolio_images.as_deref().unwrap_or_default()
    }
}

impl VendorListing for Vendor {
    fn business_name(&self) -> &str {
        &self.business_name
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
    fn category(&self) -> VendorCategory {
        self.category
    }
}

/// Editable business profile fields, used for both create and update.
#[derive(Debug, Clone, Serialize)]
pub struct VendorProfileFields {
    pub business_name: String,
    pub category: VendorCategory,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<String>,
}

impl From<VendorProfile> for VendorProfileFields {
    fn from(p: VendorProfile) -> Self {
        Self {
            business_name: p.business_name,
            category: p.category,
            description: p.description,
            location: p.location,
            price_range: p.price_range,
        }
    }
}

/// DTO for creating a vendor listing. Starts pending review.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVendor {
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: VendorProfileFields,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePortfolio {
    pub portfolio_images: Vec<String>,
}
