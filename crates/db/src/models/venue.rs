//! Venue listing model and DTOs.

use serde::{Deserialize, Serialize};
use wedplan_core::directory::VenueListing;
use wedplan_core::status::ApprovalStatus;
use wedplan_core::types::{RowId, Timestamp, UserId};
use wedplan_core::validation::NewVenue;

/// A row from the `venues` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: RowId,
    pub manager_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub capacity: Option<i32>,
    pub price_per_day: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub approval_status: Option<ApprovalStatus>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Venue {
    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status.unwrap_or(ApprovalStatus::Pending)
    }
}

impl VenueListing for Venue {
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn capacity(&self) -> Option<i32> {
        self.capacity
    }
}

/// DTO for creating a venue. Starts pending review.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVenue {
    pub manager_id: UserId,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_day: Option<f64>,
    pub amenities: Option<Vec<String>>,
}

impl CreateVenue {
    pub fn from_form(manager_id: UserId, venue: NewVenue) -> Self {
        Self {
            manager_id,
            name: venue.name,
            location: venue.location,
            description: venue.description,
            capacity: venue.capacity,
            price_per_day: venue.price_per_day,
            amenities: venue.amenities,
        }
    }
}
