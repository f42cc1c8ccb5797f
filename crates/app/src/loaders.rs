//! Load and mutation helpers shared by every screen.
//!
//! Loads never fail a screen: an error becomes a toast and the section keeps
//! whatever the screen last loaded successfully. Mutations report one of
//! three outcomes and only an applied mutation triggers a reload.

use std::future::Future;

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wedplan_db::StoreError;

use crate::error::AppError;
use crate::navigator::{Navigator, ScreenTicket};
use crate::notify::Toasts;

// ---------------------------------------------------------------------------
// Loads
// ---------------------------------------------------------------------------

/// One loaded section of a screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loaded<T> {
    pub data: T,
    /// The latest load failed and `data` is the previous copy.
    pub stale: bool,
}

impl<T> Loaded<T> {
    pub fn fresh(data: T) -> Self {
        Self { data, stale: false }
    }
}

/// Turn a load result into a section, falling back to the retained copy.
pub async fn settle<T>(
    navigator: &Navigator,
    ticket: &ScreenTicket,
    toasts: &mut Toasts,
    section: &'static str,
    result: Result<T, StoreError>,
) -> Loaded<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    match result {
        Ok(data) => {
            match serde_json::to_value(&data) {
                Ok(value) => navigator.retain(ticket, section, value).await,
                Err(e) => tracing::debug!(section, error = %e, "Section not retained"),
            }
            Loaded::fresh(data)
        }
        Err(e) => {
            tracing::warn!(section, route = ticket.route.path(), error = %e, "Load failed");
            toasts.error("Error", format!("Failed to load {}", section.replace('_', " ")));
            let data = navigator
                .recall(ticket, section)
                .await
                .and_then(|value| serde_json::from_value(value).ok())
                .unwrap_or_default();
            Loaded { data, stale: true }
        }
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Applied,
    /// Blocked before the store was called.
    Rejected,
    /// The store call failed.
    Failed,
}

impl MutationKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            MutationKind::Applied => StatusCode::OK,
            MutationKind::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
            MutationKind::Failed => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug)]
pub enum Mutation<T> {
    Applied(T),
    Rejected(String),
    Failed(String),
}

impl<T> Mutation<T> {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Applied(_) => MutationKind::Applied,
            Mutation::Rejected(_) => MutationKind::Rejected,
            Mutation::Failed(_) => MutationKind::Failed,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }

    pub fn into_applied(self) -> Option<T> {
        match self {
            Mutation::Applied(value) => Some(value),
            _ => None,
        }
    }
}

/// Run a mutation and record its toast.
///
/// `call` performs any client-side validation before its first store call,
/// so a validation error means nothing was written.
pub async fn mutate<T, Fut>(toasts: &mut Toasts, success: &str, call: Fut) -> Mutation<T>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    match call.await {
        Ok(value) => {
            toasts.success("Success", success);
            Mutation::Applied(value)
        }
        Err(e) if e.is_rejection() => {
            let message = e.user_message();
            toasts.error("Error", message.clone());
            Mutation::Rejected(message)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Mutation failed");
            let message = e.user_message();
            toasts.error("Error", message.clone());
            Mutation::Failed(message)
        }
    }
}
