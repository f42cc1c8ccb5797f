//! Venue directory and booking requests.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::directory::{filter_venues, VenueFilterParams, VenueQuery, CAPACITY_PRESETS};
use wedplan_core::error::CoreError;
use wedplan_core::routes::Route;
use wedplan_core::status::ApprovalStatus;
use wedplan_core::types::{Date, RowId};
use wedplan_core::validation::{non_blank, require_non_negative_count};
use wedplan_db::models::booking::CreateBookingRequest;
use wedplan_db::models::venue::Venue;
use wedplan_db::repositories::{BookingRepo, EventRepo, VenueRepo};

use super::{retained_form, ScreenContext, ScreenView};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CapacityPreset {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VenuesView {
    pub results: Vec<Venue>,
    /// Approved venues before filtering.
    pub total: usize,
    pub stale: bool,
    pub search: String,
    pub capacity: String,
    pub presets: Vec<CapacityPreset>,
}

impl ScreenView for VenuesView {
    fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingForm {
    pub event_id: RowId,
    /// Defaults to the event's date.
    #[serde(default)]
    pub request_date: Option<Date>,
    #[serde(default)]
    pub guest_count: Option<i32>,
    #[serde(default)]
    pub message: String,
}

pub async fn load(ctx: &mut ScreenContext, params: VenueFilterParams) -> AppResult<VenuesView> {
    let query = VenueQuery::try_from(&params).map_err(|e| match e {
        CoreError::Validation(msg) => AppError::BadRequest(msg),
        other => other.into(),
    })?;

    let venues = VenueRepo::list_directory(ctx.store()).await;
    let venues = ctx.settle("venues", venues).await;
    let results = filter_venues(&venues.data, &query)
        .into_iter()
        .cloned()
        .collect();

    Ok(VenuesView {
        results,
        total: venues.data.len(),
        stale: venues.stale,
        search: params.search,
        capacity: if params.capacity.is_empty() {
            "all".to_string()
        } else {
            params.capacity
        },
        presets: CAPACITY_PRESETS
            .iter()
            .map(|&(value, label)| CapacityPreset { value, label })
            .collect(),
    })
}

/// GET /venues?search=&capacity=
pub async fn show(
    State(app): State<AppState>,
    Query(params): Query<VenueFilterParams>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Venues);
    let view = load(&mut ctx, params).await?;
    ctx.render(view).await
}

/// POST /venues/{id}/bookings?search=&capacity=
///
/// Only approved venues take requests. The directory reloads with the
/// filters given in the query string.
pub async fn request_booking(
    State(app): State<AppState>,
    Path(venue_id): Path<RowId>,
    Query(params): Query<VenueFilterParams>,
    Json(form): Json<BookingForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Venues);
    let store = ctx.store_handle();
    let requester_id = ctx.user_id()?;
    let event_id = form.event_id;
    let request_date = form.request_date;
    let guest_count = form.guest_count;
    let message = non_blank(&form.message);

    let mutation = ctx
        .mutate("Booking request sent", async move {
            let guest_count = guest_count
                .map(|n| require_non_negative_count("Guest count", n))
                .transpose()?;
            let venue = VenueRepo::find_by_id(store.as_ref(), venue_id)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Venue",
                    id: venue_id.to_string(),
                })?;
            if venue.approval_status() != ApprovalStatus::Approved {
                return Err(CoreError::validation("This venue is not accepting bookings").into());
            }
            let own = EventRepo::list_for_member(store.as_ref(), requester_id).await?;
            let event = own.iter().find(|e| e.id == event_id).ok_or_else(|| {
                CoreError::Forbidden("Bookings must be requested for one of your events".into())
            })?;

            let booking = BookingRepo::create(
                store.as_ref(),
                &CreateBookingRequest {
                    venue_id,
                    event_id,
                    requester_id,
                    request_date: request_date.unwrap_or(event.event_date),
                    guest_count: guest_count.or(event.guest_count),
                    message,
                },
            )
            .await?;
            tracing::info!(booking_id = %booking.id, venue_id = %venue_id, "Created booking request");
            Ok::<_, AppError>(booking)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx, params).await?;
    ctx.render(view).await
}
