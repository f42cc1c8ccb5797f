//! New event form.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use wedplan_core::routes::Route;
use wedplan_core::types::Date;
use wedplan_core::validation::EventForm;
use wedplan_db::models::event::CreateEvent;
use wedplan_db::repositories::EventRepo;

use super::{retained_form, ScreenView};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateEventView {
    pub form: EventForm,
    /// Earliest selectable event date.
    pub today: Date,
}

impl ScreenView for CreateEventView {
    fn is_empty(&self) -> bool {
        false
    }
}

/// GET /events/create
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let ctx = mount!(app, Route::CreateEvent);
    ctx.render(CreateEventView {
        form: EventForm::default(),
        today: Utc::now().date_naive(),
    })
    .await
}

/// POST /events/create
///
/// On success the new event belongs to the signed-in couple and the user is
/// sent to the event list. Otherwise the submitted form comes back as-is.
pub async fn submit(
    State(app): State<AppState>,
    Json(form): Json<EventForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::CreateEvent);
    let store = ctx.store_handle();
    let couple_id = ctx.user_id()?;
    let validated = form.validate();

    let mutation = ctx
        .mutate("Event created successfully!", async move {
            let event = validated?;
            let created = EventRepo::create(store.as_ref(), &CreateEvent::from_form(couple_id, event)).await?;
            tracing::info!(event_id = %created.id, couple_id = %couple_id, "Created event");
            Ok::<_, AppError>(created)
        })
        .await;

    if mutation.is_applied() {
        Ok(ctx.redirect(Route::Events))
    } else {
        ctx.unchanged(retained_form(&form)).await
    }
}
