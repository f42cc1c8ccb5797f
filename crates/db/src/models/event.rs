//! Event model and DTOs.

use serde::{Deserialize, Serialize};
use wedplan_core::analytics::EventFacts;
use wedplan_core::status::EventStatus;
use wedplan_core::types::{Date, RowId, Timestamp, UserId};
use wedplan_core::validation::NewEvent;

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: RowId,
    pub couple_id: UserId,
    pub planner_id: Option<UserId>,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Date,
    pub venue_location: Option<String>,
    pub budget: Option<f64>,
    pub guest_count: Option<i32>,
    pub status: Option<EventStatus>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// A null status is treated as the column default.
    pub fn status(&self) -> EventStatus {
        self.status.unwrap_or(EventStatus::Planning)
    }
}

impl EventFacts for Event {
    fn status(&self) -> EventStatus {
        Event::status(self)
    }
    fn couple_id(&self) -> UserId {
        self.couple_id
    }
    fn event_date(&self) -> Date {
        self.event_date
    }
    fn budget(&self) -> Option<f64> {
        self.budget
    }
    fn guest_count(&self) -> Option<i32> {
        self.guest_count
    }
}

/// DTO for inserting an event. New events always start in `planning`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEvent {
    pub couple_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner_id: Option<UserId>,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Date,
    pub venue_location: Option<String>,
    pub budget: Option<f64>,
    pub guest_count: i32,
    pub status: EventStatus,
}

impl CreateEvent {
    pub fn from_form(couple_id: UserId, event: NewEvent) -> Self {
        Self {
            couple_id,
            planner_id: None,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            venue_location: event.venue_location,
            budget: event.budget,
            guest_count: event.guest_count,
            status: EventStatus::Planning,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateEventStatus {
    pub status: EventStatus,
}
