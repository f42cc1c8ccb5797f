//! Role resolution and route guarding.
//!
//! [`guard`] runs before a screen builds any state. Until it resolves the
//! screen is [`Access::Pending`] and renders nothing protected.

use serde::Serialize;
use wedplan_core::roles::Role;
use wedplan_core::routes::{check_access, AccessDecision, Route};
use wedplan_core::types::UserId;
use wedplan_db::repositories::RoleRepo;
use wedplan_db::{DataStore, StoreError};

use crate::notify::Toasts;
use crate::session::Identity;

/// Looks up the roles a user holds.
pub struct RoleResolver<'a> {
    store: &'a dyn DataStore,
}

impl<'a> RoleResolver<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self { store }
    }

    pub async fn roles_for(&self, user_id: UserId) -> Result<Vec<Role>, StoreError> {
        RoleRepo::roles_for(self.store, user_id).await
    }

    /// Whether `user_id` holds at least one of `required`.
    pub async fn holds_any(&self, user_id: UserId, required: &[Role]) -> Result<bool, StoreError> {
        let held = self.roles_for(user_id).await?;
        Ok(wedplan_core::roles::holds_any(&held, required))
    }
}

/// Outcome of guarding a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    /// The role check has not resolved yet.
    #[default]
    Pending,
    Allowed { roles: Vec<Role> },
    Denied { redirect: Route },
}

/// Decide whether `identity` may open `route`.
///
/// No identity sends the user to sign in. A failed role lookup is treated
/// as a denial. Denials raise a toast unless the user simply needs to sign in.
pub async fn guard(
    route: Route,
    identity: Option<&Identity>,
    resolver: &RoleResolver<'_>,
    toasts: &mut Toasts,
) -> Access {
    if route.is_public() {
        return Access::Allowed { roles: Vec::new() };
    }
    let Some(identity) = identity else {
        return match check_access(route, None) {
            AccessDecision::SignInRequired { redirect } | AccessDecision::Denied { redirect } => {
                Access::Denied { redirect }
            }
            AccessDecision::Allowed => Access::Allowed { roles: Vec::new() },
        };
    };

    let roles = match resolver.roles_for(identity.id).await {
        Ok(roles) => roles,
        Err(e) => {
            tracing::warn!(user_id = %identity.id, route = route.path(), error = %e, "Role lookup failed");
            toasts.error("Error", "Failed to verify access");
            return Access::Denied {
                redirect: Route::Home,
            };
        }
    };

    match check_access(route, Some(&roles)) {
        AccessDecision::Allowed => Access::Allowed { roles },
        AccessDecision::Denied { redirect } | AccessDecision::SignInRequired { redirect } => {
            tracing::info!(user_id = %identity.id, route = route.path(), "Access denied");
            toasts.error("Access denied", "You don't have permission to access this page");
            Access::Denied { redirect }
        }
    }
}
