//! Event list with status changes.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::error::CoreError;
use wedplan_core::routes::Route;
use wedplan_core::status::EventStatus;
use wedplan_core::types::RowId;
use wedplan_db::models::event::Event;
use wedplan_db::repositories::EventRepo;

use super::{retained_form, ScreenContext, ScreenView};
use crate::error::{AppError, AppResult};
use crate::loaders::Loaded;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EventsView {
    pub events: Loaded<Vec<Event>>,
    pub statuses: &'static [EventStatus],
}

impl ScreenView for EventsView {
    fn is_empty(&self) -> bool {
        self.events.data.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: EventStatus,
}

pub async fn load(ctx: &mut ScreenContext) -> AppResult<EventsView> {
    let user_id = ctx.user_id()?;
    let events = EventRepo::list_for_member(ctx.store(), user_id).await;
    Ok(EventsView {
        events: ctx.settle("events", events).await,
        statuses: EventStatus::ALL,
    })
}

/// GET /events
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Events);
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// POST /events/{id}/status
pub async fn update_status(
    State(app): State<AppState>,
    Path(id): Path<RowId>,
    Json(input): Json<StatusChange>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Events);
    let store = ctx.store_handle();
    let user_id = ctx.user_id()?;
    let status = input.status;

    let mutation = ctx
        .mutate("Event status updated", async move {
            let own = EventRepo::list_for_member(store.as_ref(), user_id).await?;
            if !own.iter().any(|e| e.id == id) {
                return Err(CoreError::Forbidden("You can only update your own events".into()).into());
            }
            EventRepo::update_status(store.as_ref(), id, status)
                .await?
                .ok_or_else(|| {
                    AppError::from(CoreError::NotFound {
                        entity: "Event",
                        id: id.to_string(),
                    })
                })
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&input)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}
