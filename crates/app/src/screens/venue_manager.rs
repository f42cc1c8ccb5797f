//! Venue manager dashboard: listings, booking requests and the
//! availability calendar of one selected venue.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::error::CoreError;
use wedplan_core::routes::Route;
use wedplan_core::status::BookingStatus;
use wedplan_core::types::{Date, RowId, UserId};
use wedplan_core::validation::VenueForm;
use wedplan_db::models::availability::AvailabilityEntry;
use wedplan_db::models::booking::BookingRequest;
use wedplan_db::models::venue::{CreateVenue, Venue};
use wedplan_db::repositories::{AvailabilityRepo, BookingRepo, VenueRepo};
use wedplan_db::DataStore;

use super::{retained_form, ScreenContext, ScreenView};
use crate::error::{AppError, AppResult};
use crate::loaders::Loaded;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VenueManagerView {
    pub venues: Loaded<Vec<Venue>>,
    pub booking_requests: Loaded<Vec<BookingRequest>>,
    /// Venue whose calendar is shown.
    pub selected_venue: Option<RowId>,
    pub unavailable_dates: Vec<Date>,
    pub booking_statuses: &'static [BookingStatus],
}

impl ScreenView for VenueManagerView {
    fn is_empty(&self) -> bool {
        self.venues.data.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectVenue {
    pub venue: Option<RowId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingDecision {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityToggle {
    pub date: Date,
}

pub async fn load(ctx: &mut ScreenContext, selected: Option<RowId>) -> AppResult<VenueManagerView> {
    let manager_id = ctx.user_id()?;
    let venues = VenueRepo::list_for_manager(ctx.store(), manager_id).await;
    let venues = ctx.settle("venues", venues).await;

    let ids: Vec<RowId> = venues.data.iter().map(|v| v.id).collect();
    let bookings = BookingRepo::list_for_venues(ctx.store(), &ids).await;
    let booking_requests = ctx.settle("booking_requests", bookings).await;

    let selected_venue = selected
        .filter(|id| ids.contains(id))
        .or_else(|| ids.first().copied());
    let unavailable_dates = match selected_venue {
        Some(venue_id) => {
            let entries = AvailabilityRepo::unavailable_for(ctx.store(), venue_id).await;
            let entries: Loaded<Vec<AvailabilityEntry>> = ctx.settle("availability", entries).await;
            entries.data.into_iter().map(|e| e.date).collect()
        }
        None => Vec::new(),
    };

    Ok(VenueManagerView {
        venues,
        booking_requests,
        selected_venue,
        unavailable_dates,
        booking_statuses: BookingStatus::ALL,
    })
}

/// Fail unless `venue_id` is one of the manager's venues.
async fn require_managed(
    store: &dyn DataStore,
    manager_id: UserId,
    venue_id: RowId,
) -> Result<(), AppError> {
    let venues = VenueRepo::list_for_manager(store, manager_id).await?;
    if venues.iter().any(|v| v.id == venue_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden("You can only manage your own venues".into()).into())
    }
}

/// GET /venue-manager?venue=
pub async fn show(
    State(app): State<AppState>,
    Query(select): Query<SelectVenue>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VenueManager);
    let view = load(&mut ctx, select.venue).await?;
    ctx.render(view).await
}

/// POST /venue-manager/venues
pub async fn add_venue(
    State(app): State<AppState>,
    Json(form): Json<VenueForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VenueManager);
    let store = ctx.store_handle();
    let manager_id = ctx.user_id()?;
    let validated = form.validate();

    let mutation = ctx
        .mutate("Venue added successfully! Awaiting admin approval.", async move {
            let venue = validated?;
            let created = VenueRepo::create(store.as_ref(), &CreateVenue::from_form(manager_id, venue)).await?;
            tracing::info!(venue_id = %created.id, manager_id = %manager_id, "Created venue");
            Ok::<_, AppError>(created)
        })
        .await;

    match mutation.into_applied() {
        Some(venue) => {
            let view = load(&mut ctx, Some(venue.id)).await?;
            ctx.render(view).await
        }
        None => ctx.unchanged(retained_form(&form)).await,
    }
}

/// POST /venue-manager/bookings/{id}/status
pub async fn decide_booking(
    State(app): State<AppState>,
    Path(id): Path<RowId>,
    Json(form): Json<BookingDecision>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VenueManager);
    let store = ctx.store_handle();
    let manager_id = ctx.user_id()?;
    let status = form.status;

    let mutation = ctx
        .mutate("Booking status updated", async move {
            let venues = VenueRepo::list_for_manager(store.as_ref(), manager_id).await?;
            let ids: Vec<RowId> = venues.iter().map(|v| v.id).collect();
            let requests = BookingRepo::list_for_venues(store.as_ref(), &ids).await?;
            if !requests.iter().any(|r| r.id == id) {
                return Err(CoreError::Forbidden("Booking request is not for one of your venues".into()).into());
            }
            let updated = BookingRepo::update_status(store.as_ref(), id, status)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Booking request",
                    id: id.to_string(),
                })?;
            Ok::<_, AppError>(updated)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx, None).await?;
    ctx.render(view).await
}

/// POST /venue-manager/venues/{id}/availability
///
/// Flips the date: an available date becomes unavailable and vice versa.
pub async fn toggle_availability(
    State(app): State<AppState>,
    Path(venue_id): Path<RowId>,
    Json(form): Json<AvailabilityToggle>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VenueManager);
    let store = ctx.store_handle();
    let manager_id = ctx.user_id()?;
    let date = form.date;

    let mutation = ctx
        .mutate("Availability updated", async move {
            require_managed(store.as_ref(), manager_id, venue_id).await?;
            let calendar = AvailabilityRepo::calendar(store.as_ref(), venue_id).await?;
            let change = calendar.toggle(date);
            AvailabilityRepo::apply(store.as_ref(), venue_id, change).await?;
            tracing::debug!(venue_id = %venue_id, ?change, "Toggled availability");
            Ok::<_, AppError>(change)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx, Some(venue_id)).await?;
    ctx.render(view).await
}
