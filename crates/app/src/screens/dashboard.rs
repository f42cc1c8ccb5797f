//! Couple and planner dashboard.

use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use wedplan_core::analytics::CoupleSummary;
use wedplan_core::roles::Role;
use wedplan_core::routes::Route;
use wedplan_db::models::booking::BookingRequest;
use wedplan_db::models::event::Event;
use wedplan_db::repositories::{BookingRepo, EventRepo};

use super::{ScreenContext, ScreenView};
use crate::error::AppResult;
use crate::loaders::Loaded;
use crate::session::Identity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub identity: Identity,
    pub roles: Vec<Role>,
    pub summary: CoupleSummary,
    pub events: Loaded<Vec<Event>>,
    pub booking_requests: Loaded<Vec<BookingRequest>>,
}

impl ScreenView for DashboardView {
    fn is_empty(&self) -> bool {
        self.events.data.is_empty() && self.booking_requests.data.is_empty()
    }
}

pub async fn load(ctx: &mut ScreenContext) -> AppResult<DashboardView> {
    let identity = ctx.user()?.clone();
    let store = ctx.store_handle();
    let (events, bookings) = futures::join!(
        EventRepo::list_for_member(store.as_ref(), identity.id),
        BookingRepo::list_for_requester(store.as_ref(), identity.id),
    );
    let events = ctx.settle("events", events).await;
    let booking_requests = ctx.settle("booking_requests", bookings).await;

    Ok(DashboardView {
        summary: CoupleSummary::compute(&events.data, Utc::now().date_naive()),
        identity,
        roles: ctx.roles.clone(),
        events,
        booking_requests,
    })
}

/// GET /dashboard
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Dashboard);
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}
