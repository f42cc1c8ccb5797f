//! Roles a user may hold.
//!
//! Must match the `user_role` enum in `db/migrations`.

define_text_enum! {
    /// A role assignment. A user may hold zero or more roles; the set held
    /// decides which screens are reachable and which rows a screen requests.
    Role("role") {
        Couple = "couple",
        Planner = "planner",
        Vendor = "vendor",
        VenueManager = "venue_manager",
        Admin = "admin",
    }
}

/// `true` when `held` and `required` share at least one role.
pub fn holds_any(held: &[Role], required: &[Role]) -> bool {
    required.iter().any(|role| held.contains(role))
}
