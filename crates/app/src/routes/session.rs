//! Read-only view of the session store for the navigation bar.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use wedplan_core::roles::Role;
use wedplan_core::routes::home_route;

use crate::error::AppResult;
use crate::guard::RoleResolver;
use crate::response::DataResponse;
use crate::session::Identity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub identity: Option<Identity>,
    pub roles: Vec<Role>,
    /// Where the signed-in user lands after sign-in.
    pub home: Option<&'static str>,
}

/// GET /session
async fn current(State(state): State<AppState>) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let identity = state.session.current();
    let roles = match &identity {
        Some(identity) => RoleResolver::new(state.store.as_ref()).roles_for(identity.id).await?,
        None => Vec::new(),
    };
    let home = identity.as_ref().map(|_| home_route(&roles).path());
    Ok(Json(DataResponse {
        data: SessionInfo {
            identity,
            roles,
            home,
        },
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/session", get(current))
}
