//! View controllers, one module per screen.
//!
//! Every screen request runs the same machine:
//!
//! ```text
//! loading -> empty | populated -> mutating -> loading -> empty | populated
//! loading -> unauthorized -> redirected
//! ```
//!
//! [`ScreenContext::mount`] registers the navigation and runs the guard
//! before anything is loaded. Handlers then load their sections, apply at
//! most one mutation, and finish with [`ScreenContext::render`],
//! [`ScreenContext::unchanged`] or [`ScreenContext::redirect`].

use std::future::Future;
use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wedplan_core::error::CoreError;
use wedplan_core::roles::Role;
use wedplan_core::routes::Route;
use wedplan_core::types::UserId;
use wedplan_db::{DataStore, StoreError};

use crate::error::{AppError, AppResult};
use crate::guard::{guard, Access, RoleResolver};
use crate::loaders::{self, Loaded, Mutation, MutationKind};
use crate::navigator::ScreenTicket;
use crate::notify::Toasts;
use crate::session::Identity;
use crate::state::AppState;

/// Mount a screen inside a handler, returning early with the redirect
/// response when the guard denies access.
macro_rules! mount {
    ($app:expr, $route:expr) => {
        match $crate::screens::ScreenContext::mount(&$app, $route).await {
            $crate::screens::Mount::Ready(ctx) => ctx,
            $crate::screens::Mount::Redirect(response) => return Ok(response),
        }
    };
}

pub mod admin;
pub mod auth;
pub mod budget;
pub mod create_event;
pub mod cultural;
pub mod dashboard;
pub mod events;
pub mod home;
pub mod planner;
pub mod vendor_dashboard;
pub mod vendors;
pub mod venue_manager;
pub mod venues;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    Loading,
    Empty,
    Populated,
    Mutating,
    Unauthorized,
    Redirected,
}

impl ScreenState {
    pub fn can_become(self, next: ScreenState) -> bool {
        use ScreenState::*;
        matches!(
            (self, next),
            (Loading, Empty | Populated | Mutating | Unauthorized)
                | (Empty | Populated, Mutating | Loading)
                | (Mutating, Loading | Empty | Populated | Redirected)
                | (Unauthorized, Redirected)
        )
    }
}

/// A rendered screen view.
pub trait ScreenView: Serialize {
    /// Whether the screen has nothing to show.
    fn is_empty(&self) -> bool;
}

/// Body of every screen response.
#[derive(Debug, Serialize)]
pub struct ScreenResponse<V: Serialize> {
    pub route: &'static str,
    pub state: ScreenState,
    pub transitions: Vec<ScreenState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MutationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<V>,
    /// Submitted form values, returned when a mutation did not apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
    pub toasts: Toasts,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

pub enum Mount {
    Ready(ScreenContext),
    Redirect(Response),
}

/// Everything one screen instance works with.
pub struct ScreenContext {
    app: AppState,
    pub ticket: ScreenTicket,
    pub identity: Option<Identity>,
    /// Roles of the signed-in user. Empty on public screens.
    pub roles: Vec<Role>,
    pub toasts: Toasts,
    transitions: Vec<ScreenState>,
    outcome: Option<MutationKind>,
}

impl ScreenContext {
    /// Enter `route` and run its guard.
    pub async fn mount(app: &AppState, route: Route) -> Mount {
        let ticket = app.navigator.enter(route).await;
        let identity = app.session.current();
        let mut toasts = Toasts::default();
        let access = guard(
            route,
            identity.as_ref(),
            &RoleResolver::new(app.store.as_ref()),
            &mut toasts,
        )
        .await;

        let mut ctx = ScreenContext {
            app: app.clone(),
            ticket,
            identity,
            roles: Vec::new(),
            toasts,
            transitions: vec![ScreenState::Loading],
            outcome: None,
        };
        match access {
            Access::Allowed { roles } => {
                ctx.roles = roles;
                Mount::Ready(ctx)
            }
            Access::Denied { redirect } => {
                ctx.enter(ScreenState::Unauthorized);
                Mount::Redirect(ctx.redirect(redirect))
            }
            Access::Pending => {
                ctx.enter(ScreenState::Unauthorized);
                Mount::Redirect(ctx.redirect(Route::Home))
            }
        }
    }

    fn enter(&mut self, next: ScreenState) {
        let current = self.state();
        if !current.can_become(next) {
            tracing::warn!(from = ?current, to = ?next, route = self.ticket.route.path(), "Unexpected screen transition");
        }
        self.transitions.push(next);
    }

    pub fn state(&self) -> ScreenState {
        self.transitions
            .last()
            .copied()
            .unwrap_or(ScreenState::Loading)
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn store(&self) -> &dyn DataStore {
        self.app.store.as_ref()
    }

    /// Owned store handle for use inside mutation futures.
    pub fn store_handle(&self) -> Arc<dyn DataStore> {
        Arc::clone(&self.app.store)
    }

    pub fn user(&self) -> AppResult<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| CoreError::Unauthorized("Sign in required".into()).into())
    }

    pub fn user_id(&self) -> AppResult<UserId> {
        self.user().map(|identity| identity.id)
    }

    pub async fn settle<T>(&mut self, section: &'static str, result: Result<T, StoreError>) -> Loaded<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        loaders::settle(
            &self.app.navigator,
            &self.ticket,
            &mut self.toasts,
            section,
            result,
        )
        .await
    }

    pub async fn mutate<T, Fut>(&mut self, success: &str, call: Fut) -> Mutation<T>
    where
        Fut: Future<Output = Result<T, AppError>>,
    {
        self.enter(ScreenState::Mutating);
        let mutation = loaders::mutate(&mut self.toasts, success, call).await;
        self.outcome = Some(mutation.kind());
        mutation
    }

    fn check_current(&self) -> AppResult<()> {
        if self.app.navigator.is_current(&self.ticket) {
            Ok(())
        } else {
            tracing::debug!(route = self.ticket.route.path(), generation = self.ticket.generation, "Dropping superseded screen result");
            Err(AppError::Superseded)
        }
    }

    /// Finish with a freshly loaded view.
    pub async fn render<V: ScreenView>(mut self, view: V) -> AppResult<Response> {
        self.check_current()?;
        if self.state() == ScreenState::Mutating {
            self.enter(ScreenState::Loading);
        }
        let state = if view.is_empty() {
            ScreenState::Empty
        } else {
            ScreenState::Populated
        };
        self.enter(state);
        self.app.navigator.record_rendered(&self.ticket, state).await;
        Ok(self.respond(StatusCode::OK, Some(view), None, None))
    }

    /// Finish after a mutation that did not apply. Nothing is reloaded and
    /// the submitted form is echoed back.
    pub async fn unchanged(mut self, form: Option<Value>) -> AppResult<Response> {
        self.check_current()?;
        let status = self
            .outcome
            .map(MutationKind::status_code)
            .unwrap_or(StatusCode::OK);
        let previous = self
            .app
            .navigator
            .last_rendered(&self.ticket)
            .await
            .unwrap_or(ScreenState::Empty);
        self.enter(previous);
        Ok(self.respond::<()>(status, None, form, None))
    }

    /// Finish by sending the user to `to`.
    pub fn redirect(mut self, to: Route) -> Response {
        self.enter(ScreenState::Redirected);
        self.respond::<()>(StatusCode::SEE_OTHER, None, None, Some(to))
    }

    fn respond<V: Serialize>(
        self,
        status: StatusCode,
        view: Option<V>,
        form: Option<Value>,
        redirect: Option<Route>,
    ) -> Response {
        let body = ScreenResponse {
            route: self.ticket.route.path(),
            state: self.state(),
            transitions: self.transitions,
            outcome: self.outcome,
            view,
            form,
            redirect: redirect.map(Route::path),
            toasts: self.toasts,
        };
        let mut response = (status, Json(body)).into_response();
        if let Some(to) = redirect {
            response
                .headers_mut()
                .insert(LOCATION, HeaderValue::from_static(to.path()));
        }
        response
    }
}

/// Form values to echo back, when they serialize.
pub fn retained_form<F: Serialize>(form: &F) -> Option<Value> {
    serde_json::to_value(form).ok()
}
