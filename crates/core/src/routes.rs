//! Client-side route table and the access policy that gates it.
//!
//! Every non-public route names the role set allowed to open it. Access is
//! granted when the caller's held roles intersect that set. A denied caller
//! is redirected to a screen they *can* open, never back to the route that
//! denied them.

use serde::Serialize;

use crate::roles::{holds_any, Role};

const COUPLE_OR_PLANNER: &[Role] = &[Role::Couple, Role::Planner];
const ADMIN: &[Role] = &[Role::Admin];
const PLANNER: &[Role] = &[Role::Planner];
const VENUE_MANAGER: &[Role] = &[Role::VenueManager];
const VENDOR: &[Role] = &[Role::Vendor];

/// A screen reachable through the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Auth,
    Dashboard,
    Events,
    CreateEvent,
    Vendors,
    Venues,
    Admin,
    Planner,
    VenueManager,
    VendorDashboard,
    Budget,
    Cultural,
    /// Catch-all for any path not in the table.
    NotFound,
}

impl Route {
    /// Every routable screen, excluding the catch-all.
    pub const ALL: &'static [Route] = &[
        Route::Home,
        Route::Auth,
        Route::Dashboard,
        Route::Events,
        Route::CreateEvent,
        Route::Vendors,
        Route::Venues,
        Route::Admin,
        Route::Planner,
        Route::VenueManager,
        Route::VendorDashboard,
        Route::Budget,
        Route::Cultural,
    ];

    /// The path this route is mounted at.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Auth => "/auth",
            Route::Dashboard => "/dashboard",
            Route::Events => "/events",
            Route::CreateEvent => "/events/create",
            Route::Vendors => "/vendors",
            Route::Venues => "/venues",
            Route::Admin => "/admin",
            Route::Planner => "/planner",
            Route::VenueManager => "/venue-manager",
            Route::VendorDashboard => "/vendor-dashboard",
            Route::Budget => "/budget",
            Route::Cultural => "/cultural",
            Route::NotFound => "*",
        }
    }

    /// Resolve a request path to a route. Unknown paths map to
    /// [`Route::NotFound`]. A single trailing slash is ignored.
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        Route::ALL
            .iter()
            .copied()
            .find(|route| route.path() == trimmed)
            .unwrap_or(Route::NotFound)
    }

    /// Roles allowed to open this route. `None` means the route is public.
    pub fn required_roles(self) -> Option<&'static [Role]> {
        match self {
            Route::Home | Route::Auth | Route::NotFound => None,
            Route::Dashboard
            | Route::Events
            | Route::CreateEvent
            | Route::Vendors
            | Route::Venues
            | Route::Budget
            | Route::Cultural => Some(COUPLE_OR_PLANNER),
            Route::Admin => Some(ADMIN),
            Route::Planner => Some(PLANNER),
            Route::VenueManager => Some(VENUE_MANAGER),
            Route::VendorDashboard => Some(VENDOR),
        }
    }

    pub fn is_public(self) -> bool {
        self.required_roles().is_none()
    }
}

/// Outcome of evaluating the access policy for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allowed,
    /// No signed-in identity; the caller must go through the sign-in flow.
    SignInRequired { redirect: Route },
    /// Signed in but holding none of the required roles.
    Denied { redirect: Route },
}

/// Evaluate the access policy.
///
/// `held` is `None` when no identity is signed in. Public routes are always
/// allowed.
pub fn check_access(route: Route, held: Option<&[Role]>) -> AccessDecision {
    let Some(required) = route.required_roles() else {
        return AccessDecision::Allowed;
    };
    match held {
        None => AccessDecision::SignInRequired {
            redirect: Route::Auth,
        },
        Some(held) if holds_any(held, required) => AccessDecision::Allowed,
        Some(held) => AccessDecision::Denied {
            redirect: home_route(held),
        },
    }
}

/// The screen a signed-in user lands on. First match wins.
pub fn home_route(held: &[Role]) -> Route {
    if held.contains(&Role::Admin) {
        Route::Admin
    } else if held.contains(&Role::VenueManager) {
        Route::VenueManager
    } else if held.contains(&Role::Vendor) {
        Route::VendorDashboard
    } else if holds_any(held, COUPLE_OR_PLANNER) {
        Route::Dashboard
    } else {
        Route::Home
    }
}
