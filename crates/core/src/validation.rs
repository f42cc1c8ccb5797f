//! Client-side form validation.
//!
//! These checks run before any store call is attempted. They are a
//! usability guard, not a data integrity guarantee: the hosted store does
//! not enforce them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::{ApprovalStatus, VendorCategory};
use crate::types::Date;

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Trim `value`, mapping an empty result to `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Require a non-blank text field.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    non_blank(value).ok_or_else(|| CoreError::validation(format!("{field} is required")))
}

/// Reject negative or non-finite amounts.
pub fn require_non_negative(field: &str, value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}

/// Reject negative counts.
pub fn require_non_negative_count(field: &str, value: i32) -> Result<i32, CoreError> {
    if value < 0 {
        return Err(CoreError::validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(value)
}

/// Split a comma-separated amenity list, dropping blank entries.
pub fn parse_amenities(raw: &str) -> Vec<String> {
    raw.split(',').filter_map(non_blank).collect()
}

// ---------------------------------------------------------------------------
// Event form
// ---------------------------------------------------------------------------

/// Raw input from the create-event form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: Option<Date>,
    #[serde(default)]
    pub venue_location: String,
    pub budget: Option<f64>,
    pub guest_count: Option<i32>,
}

/// A create-event form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: Date,
    pub venue_location: Option<String>,
    pub budget: Option<f64>,
    pub guest_count: i32,
}

impl EventForm {
    /// Check required fields. Guest count defaults to zero when left empty.
    pub fn validate(&self) -> Result<NewEvent, CoreError> {
        let event_date = self
            .event_date
            .ok_or_else(|| CoreError::validation("Please select an event date"))?;
        let title = require_text("Event title", &self.title)?;
        let budget = self
            .budget
            .map(|b| require_non_negative("Budget", b))
            .transpose()?;
        let guest_count = require_non_negative_count("Guest count", self.guest_count.unwrap_or(0))?;

        Ok(NewEvent {
            title,
            description: non_blank(&self.description),
            event_date,
            venue_location: non_blank(&self.venue_location),
            budget,
            guest_count,
        })
    }
}

// ---------------------------------------------------------------------------
// Venue form
// ---------------------------------------------------------------------------

/// Raw input from the add-venue dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub capacity: Option<i32>,
    pub price_per_day: Option<f64>,
    /// Comma-separated amenities, e.g. `"Parking, Catering kitchen"`.
    #[serde(default)]
    pub amenities: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_day: Option<f64>,
    pub amenities: Option<Vec<String>>,
}

impl VenueForm {
    pub fn validate(&self) -> Result<NewVenue, CoreError> {
        let name = require_text("Venue name", &self.name)?;
        let location = require_text("Location", &self.location)?;
        let capacity = self
            .capacity
            .map(|c| require_non_negative_count("Capacity", c))
            .transpose()?;
        let price_per_day = self
            .price_per_day
            .map(|p| require_non_negative("Price per day", p))
            .transpose()?;
        let amenities = parse_amenities(&self.amenities);

        Ok(NewVenue {
            name,
            location,
            description: non_blank(&self.description),
            capacity,
            price_per_day,
            amenities: (!amenities.is_empty()).then_some(amenities),
        })
    }
}

// ---------------------------------------------------------------------------
// Vendor profile form
// ---------------------------------------------------------------------------

/// Raw input from the business profile dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorProfileForm {
    #[serde(default)]
    pub business_name: String,
    pub category: VendorCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorProfile {
    pub business_name: String,
    pub category: VendorCategory,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<String>,
}

impl VendorProfileForm {
    pub fn validate(&self) -> Result<VendorProfile, CoreError> {
        Ok(VendorProfile {
            business_name: require_text("Business name", &self.business_name)?,
            category: self.category,
            description: non_blank(&self.description),
            location: non_blank(&self.location),
            price_range: non_blank(&self.price_range),
        })
    }
}

// ---------------------------------------------------------------------------
// Approval decisions
// ---------------------------------------------------------------------------

/// Decide which rejection reason to store alongside an approval change.
///
/// A rejection requires a non-blank reason and stores it trimmed. Any other
/// status clears the reason, so it is only ever set while rejected.
pub fn validate_rejection_reason(
    status: ApprovalStatus,
    reason: Option<&str>,
) -> Result<Option<String>, CoreError> {
    match status {
        ApprovalStatus::Rejected => reason
            .and_then(non_blank)
            .map(Some)
            .ok_or_else(|| CoreError::validation("A rejection reason is required")),
        ApprovalStatus::Pending | ApprovalStatus::Approved => Ok(None),
    }
}
