pub mod health;
pub mod session;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use wedplan_core::error::CoreError;
use wedplan_core::routes::Route;

use crate::error::AppError;
use crate::screens::{
    admin, auth, budget, create_event, cultural, dashboard, events, home, planner,
    vendor_dashboard, vendors, venue_manager, venues,
};
use crate::state::AppState;

/// Build the screen route tree.
///
/// Every `GET` renders a screen. Other methods apply one mutation on that
/// screen and answer with the reloaded view.
///
/// ```text
/// /                                                home (public)
/// /auth                                            sign-in screen (public)
/// /auth/session                                    sign in with an access token (POST)
/// /auth/sign-out                                   sign out (POST)
///
/// /dashboard                                       couple / planner overview
/// /events                                          event list
/// /events/{id}/status                              change event status (POST)
/// /events/create                                   new event form (GET, POST)
/// /vendors                                         vendor directory
/// /vendors/{id}/inquiries                          send an inquiry (POST)
/// /venues                                          venue directory
/// /venues/{id}/bookings                            request a booking (POST)
/// /budget                                          budget tracker
/// /budget/total                                    set total budget (PUT)
/// /budget/categories                               add category (POST)
/// /budget/categories/{id}                          edit, remove (PUT, DELETE)
/// /budget/reset                                    restore defaults (POST)
/// /budget/storage-test                             check local storage (POST)
/// /budget/export                                   download as JSON
/// /cultural                                        cultural performances
///
/// /planner                                         planner dashboard
///
/// /admin                                           admin console
/// /admin/users/{id}/roles                          grant role (POST)
/// /admin/users/{id}/roles/{role}                   revoke role (DELETE)
/// /admin/vendors/{id}/approval                     review vendor (POST)
/// /admin/venues/{id}/approval                      review venue (POST)
///
/// /venue-manager                                   venue manager dashboard
/// /venue-manager/venues                            add venue (POST)
/// /venue-manager/venues/{id}/availability          toggle a date (POST)
/// /venue-manager/bookings/{id}/status              decide a booking (POST)
///
/// /vendor-dashboard                                vendor dashboard
/// /vendor-dashboard/profile                        save profile (PUT)
/// /vendor-dashboard/portfolio                      upload, remove image (POST, DELETE)
/// /vendor-dashboard/inquiries/{id}/status          respond to inquiry (POST)
/// ```
pub fn screen_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::show))
        .route("/auth", get(auth::show))
        .route("/auth/session", post(auth::sign_in))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/dashboard", get(dashboard::show))
        .route("/events", get(events::show))
        .route("/events/{id}/status", post(events::update_status))
        .route("/events/create", get(create_event::show).post(create_event::submit))
        .route("/vendors", get(vendors::show))
        .route("/vendors/{id}/inquiries", post(vendors::send_inquiry))
        .route("/venues", get(venues::show))
        .route("/venues/{id}/bookings", post(venues::request_booking))
        .route("/budget", get(budget::show))
        .route("/budget/total", put(budget::set_total))
        .route("/budget/categories", post(budget::add_category))
        .route(
            "/budget/categories/{id}",
            put(budget::update_category).delete(budget::remove_category),
        )
        .route("/budget/reset", post(budget::reset))
        .route("/budget/storage-test", post(budget::storage_test))
        .route("/budget/export", get(budget::export))
        .route("/cultural", get(cultural::show))
        .route("/planner", get(planner::show))
        .route("/admin", get(admin::show))
        .route("/admin/users/{id}/roles", post(admin::grant_role))
        .route("/admin/users/{id}/roles/{role}", delete(admin::revoke_role))
        .route("/admin/vendors/{id}/approval", post(admin::review_vendor))
        .route("/admin/venues/{id}/approval", post(admin::review_venue))
        .route("/venue-manager", get(venue_manager::show))
        .route("/venue-manager/venues", post(venue_manager::add_venue))
        .route(
            "/venue-manager/venues/{id}/availability",
            post(venue_manager::toggle_availability),
        )
        .route(
            "/venue-manager/bookings/{id}/status",
            post(venue_manager::decide_booking),
        )
        .route("/vendor-dashboard", get(vendor_dashboard::show))
        .route("/vendor-dashboard/profile", put(vendor_dashboard::save_profile))
        .route(
            "/vendor-dashboard/portfolio",
            post(vendor_dashboard::upload_portfolio).delete(vendor_dashboard::remove_portfolio_image),
        )
        .route(
            "/vendor-dashboard/inquiries/{id}/status",
            post(vendor_dashboard::respond_to_inquiry),
        )
}

/// Catch-all for paths outside the route table. A screen path with a
/// trailing slash is redirected to the screen itself.
pub async fn not_found(State(app): State<AppState>, uri: Uri) -> Response {
    let route = Route::from_path(uri.path());
    if route != Route::NotFound {
        tracing::debug!(path = %uri.path(), to = route.path(), "Normalising screen path");
        return Redirect::permanent(route.path()).into_response();
    }
    app.navigator.enter(Route::NotFound).await;
    tracing::debug!(path = %uri.path(), "No screen for path");
    AppError::from(CoreError::NotFound {
        entity: "Page",
        id: uri.path().to_string(),
    })
    .into_response()
}
