use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use wedplan_core::content::{Performance, SuggestionGroup, PERFORMANCES, SUGGESTIONS};
use wedplan_core::routes::Route;

use super::ScreenView;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CulturalView {
    pub performances: &'static [Performance],
    pub suggestions: &'static [SuggestionGroup],
}

impl ScreenView for CulturalView {
    fn is_empty(&self) -> bool {
        self.performances.is_empty()
    }
}

/// GET /cultural
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let ctx = mount!(app, Route::Cultural);
    ctx.render(CulturalView {
        performances: PERFORMANCES,
        suggestions: SUGGESTIONS,
    })
    .await
}
