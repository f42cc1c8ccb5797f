//! Planner dashboard.

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use wedplan_core::analytics::PlannerStats;
use wedplan_core::routes::Route;
use wedplan_core::types::RowId;
use wedplan_db::models::booking::BookingRequest;
use wedplan_db::models::event::Event;
use wedplan_db::models::inquiry::VendorInquiry;
use wedplan_db::repositories::{BookingRepo, EventRepo, InquiryRepo};

use super::{ScreenContext, ScreenView};
use crate::error::AppResult;
use crate::loaders::Loaded;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlannerView {
    pub stats: PlannerStats,
    pub events: Loaded<Vec<Event>>,
    pub booking_requests: Loaded<Vec<BookingRequest>>,
    pub inquiries: Loaded<Vec<VendorInquiry>>,
}

impl ScreenView for PlannerView {
    fn is_empty(&self) -> bool {
        self.events.data.is_empty()
    }
}

pub async fn load(ctx: &mut ScreenContext) -> AppResult<PlannerView> {
    let planner_id = ctx.user_id()?;
    let events = EventRepo::list_for_planner(ctx.store(), planner_id).await;
    let events = ctx.settle("events", events).await;

    let ids: Vec<RowId> = events.data.iter().map(|e| e.id).collect();
    let store = ctx.store_handle();
    let (bookings, inquiries) = futures::join!(
        BookingRepo::list_for_events(store.as_ref(), &ids),
        InquiryRepo::list_for_events(store.as_ref(), &ids),
    );
    let booking_requests = ctx.settle("booking_requests", bookings).await;
    let inquiries = ctx.settle("inquiries", inquiries).await;

    Ok(PlannerView {
        stats: PlannerStats::compute(&events.data),
        events,
        booking_requests,
        inquiries,
    })
}

/// GET /planner
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Planner);
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}
