//! Venue availability entry model.

use serde::{Deserialize, Serialize};
use wedplan_core::types::{Date, RowId, Timestamp};

/// A row from the `venue_availability` table. At most one per venue and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub id: RowId,
    pub venue_id: RowId,
    pub date: Date,
    pub is_available: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAvailability {
    pub venue_id: RowId,
    pub date: Date,
    pub is_available: bool,
}
