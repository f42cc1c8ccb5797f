//! Status enumerations for events, listings, bookings and inquiries.
//!
//! Each text value must match the column values written by
//! `db/migrations`. Transitions between statuses are user-triggered and are
//! not validated here; the only client-side rule is that a rejection must
//! carry a reason (see [`crate::validation::validate_rejection_reason`]).

define_text_enum! {
    /// Lifecycle of a planned event.
    EventStatus("event status") {
        Planning = "planning",
        Confirmed = "confirmed",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

impl EventStatus {
    /// Events still being worked on count as active on dashboards.
    pub fn is_active(self) -> bool {
        matches!(self, EventStatus::Planning | EventStatus::Confirmed)
    }
}

define_text_enum! {
    /// Admin review state of a vendor or venue listing.
    ApprovalStatus("approval status") {
        Pending = "pending",
        Approved = "approved",
        Rejected = "rejected",
    }
}

define_text_enum! {
    /// Venue manager decision on a booking request.
    BookingStatus("booking status") {
        Pending = "pending",
        Approved = "approved",
        Rejected = "rejected",
    }
}

define_text_enum! {
    /// Vendor response to an inquiry.
    InquiryStatus("inquiry status") {
        Pending = "pending",
        Accepted = "accepted",
        Declined = "declined",
        Responded = "responded",
    }
}

define_text_enum! {
    /// Closed set of vendor business categories.
    VendorCategory("vendor category") {
        Catering = "catering",
        Decoration = "decoration",
        Photography = "photography",
        Videography = "videography",
        Entertainment = "entertainment",
        CulturalPerformers = "cultural_performers",
        Florist = "florist",
        MakeupArtist = "makeup_artist",
        Transportation = "transportation",
    }
}

impl VendorCategory {
    /// Human-readable label shown on listings.
    pub fn label(self) -> &'static str {
        match self {
            VendorCategory::Catering => "Catering",
            VendorCategory::Decoration => "Decoration",
            VendorCategory::Photography => "Photography",
            VendorCategory::Videography => "Videography",
            VendorCategory::Entertainment => "Entertainment",
            VendorCategory::CulturalPerformers => "Cultural Performers",
            VendorCategory::Florist => "Florist",
            VendorCategory::MakeupArtist => "Makeup Artist",
            VendorCategory::Transportation => "Transportation",
        }
    }
}
