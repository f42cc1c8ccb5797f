//! Booking request model and DTOs.

use serde::{Deserialize, Serialize};
use wedplan_core::status::BookingStatus;
use wedplan_core::types::{Date, RowId, Timestamp, UserId};

/// A row from the `booking_requests` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: RowId,
    pub venue_id: RowId,
    pub event_id: RowId,
    pub requester_id: UserId,
    pub request_date: Date,
    pub guest_count: Option<i32>,
    pub message: Option<String>,
    pub status: BookingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for requesting a venue for an event date. Starts pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub venue_id: RowId,
    pub event_id: RowId,
    pub requester_id: UserId,
    pub request_date: Date,
    pub guest_count: Option<i32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}
