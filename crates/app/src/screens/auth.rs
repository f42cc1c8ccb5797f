//! Sign-in and sign-out.
//!
//! The hosted auth provider performs the actual sign-in and hands the
//! client an access token. Posting that token here verifies it, makes sure
//! the user has a profile (and the role they picked at sign-up), and
//! publishes the identity to the session store.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::error::CoreError;
use wedplan_core::roles::Role;
use wedplan_core::routes::{home_route, Route};
use wedplan_db::models::profile::CreateProfile;
use wedplan_db::repositories::{ProfileRepo, RoleRepo};
use wedplan_db::DataStore;

use super::ScreenView;
use crate::error::{AppError, AppResult};
use crate::guard::RoleResolver;
use crate::loaders::Mutation;
use crate::session::{validate_token, AuthEvent, Identity};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthView {
    pub signed_in: Option<Identity>,
    /// Roles a new account may pick.
    pub roles: &'static [Role],
}

impl ScreenView for AuthView {
    fn is_empty(&self) -> bool {
        false
    }
}

const SIGN_UP_ROLES: &[Role] = &[Role::Couple, Role::Planner, Role::Vendor, Role::VenueManager];

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub access_token: String,
}

/// GET /auth
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let ctx = mount!(app, Route::Auth);
    let view = AuthView {
        signed_in: ctx.identity.clone(),
        roles: SIGN_UP_ROLES,
    };
    ctx.render(view).await
}

/// Make sure a freshly signed-in user has a profile, and the role requested
/// at sign-up when they hold none yet.
pub async fn establish(
    store: &dyn DataStore,
    identity: &Identity,
    requested: Option<Role>,
) -> Result<Vec<Role>, AppError> {
    ProfileRepo::ensure(
        store,
        &CreateProfile {
            id: identity.id,
            email: identity.email.clone(),
            full_name: identity.full_name.clone(),
        },
    )
    .await?;

    let resolver = RoleResolver::new(store);
    if let Some(role) = requested.filter(|r| SIGN_UP_ROLES.contains(r)) {
        let held_any = resolver.holds_any(identity.id, Role::ALL).await?;
        if !held_any {
            RoleRepo::assign(store, identity.id, role).await?;
            tracing::info!(user_id = %identity.id, role = %role, "Assigned sign-up role");
        }
    }
    Ok(resolver.roles_for(identity.id).await?)
}

/// POST /auth/session
pub async fn sign_in(
    State(app): State<AppState>,
    Json(input): Json<SessionRequest>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Auth);
    let store = ctx.store_handle();
    let session = Arc::clone(&app.session);
    let navigator = Arc::clone(&app.navigator);
    let jwt = app.config.jwt.clone();

    let mutation = ctx
        .mutate("Signed in successfully", async move {
            let claims = validate_token(&input.access_token, &jwt).map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                CoreError::Unauthorized("Invalid or expired token".into())
            })?;
            let identity = Identity::from(&claims);
            let roles = establish(store.as_ref(), &identity, claims.requested_role()).await?;
            session.apply(AuthEvent::SignedIn(identity));
            navigator.forget().await;
            Ok::<_, AppError>(home_route(&roles))
        })
        .await;

    match mutation {
        Mutation::Applied(home) => Ok(ctx.redirect(home)),
        _ => ctx.unchanged(None).await,
    }
}

/// POST /auth/sign-out
pub async fn sign_out(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Auth);
    let session = Arc::clone(&app.session);
    let navigator = Arc::clone(&app.navigator);
    let mutation = ctx
        .mutate("Signed out", async move {
            session.apply(AuthEvent::SignedOut);
            navigator.forget().await;
            Ok::<_, AppError>(())
        })
        .await;
    if mutation.is_applied() {
        Ok(ctx.redirect(Route::Home))
    } else {
        ctx.unchanged(None).await
    }
}
