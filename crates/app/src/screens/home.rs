//! Landing page.

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use wedplan_core::content::{Audience, Feature, AUDIENCES, FEATURES};
use wedplan_core::routes::{home_route, Route};

use super::ScreenView;
use crate::error::AppResult;
use crate::guard::RoleResolver;
use crate::session::Identity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub features: &'static [Feature],
    pub audiences: &'static [Audience],
    pub signed_in: Option<Identity>,
    /// Where "Go to dashboard" leads for the signed-in user.
    pub home: Option<&'static str>,
}

impl ScreenView for HomeView {
    fn is_empty(&self) -> bool {
        false
    }
}

/// GET /
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let ctx = mount!(app, Route::Home);

    let home = match &ctx.identity {
        Some(identity) => match RoleResolver::new(ctx.store()).roles_for(identity.id).await {
            Ok(roles) => Some(home_route(&roles).path()),
            Err(e) => {
                tracing::warn!(user_id = %identity.id, error = %e, "Could not resolve home screen");
                None
            }
        },
        None => None,
    };

    let view = HomeView {
        features: FEATURES,
        audiences: AUDIENCES,
        signed_in: ctx.identity.clone(),
        home,
    };
    ctx.render(view).await
}
