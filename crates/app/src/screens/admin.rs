//! Admin console: users and roles, listing approval, platform analytics.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::analytics::{AdminAnalytics, PlatformCounts};
use wedplan_core::error::CoreError;
use wedplan_core::roles::Role;
use wedplan_core::routes::Route;
use wedplan_core::status::ApprovalStatus;
use wedplan_core::types::{RowId, UserId};
use wedplan_db::models::approval::ApprovalChange;
use wedplan_db::models::role::UserWithRoles;
use wedplan_db::models::vendor::Vendor;
use wedplan_db::models::venue::Venue;
use wedplan_db::repositories::{
    BookingRepo, EventRepo, ProfileRepo, RoleRepo, VendorRepo, VenueRepo,
};
use wedplan_db::DataStore;

use super::{retained_form, ScreenContext, ScreenView};
use crate::error::{AppError, AppResult};
use crate::loaders::Loaded;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub analytics: AdminAnalytics,
    pub users: Loaded<Vec<UserWithRoles>>,
    pub vendors: Loaded<Vec<Vendor>>,
    pub venues: Loaded<Vec<Venue>>,
    /// Roles an admin may grant.
    pub roles: &'static [Role],
    pub approval_statuses: &'static [ApprovalStatus],
}

impl ScreenView for AdminView {
    fn is_empty(&self) -> bool {
        self.users.data.is_empty() && self.vendors.data.is_empty() && self.venues.data.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewForm {
    pub status: ApprovalStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

type Counts = (i64, i64, i64, i64, i64);

async fn platform_counts(store: &dyn DataStore) -> Result<Counts, wedplan_db::StoreError> {
    futures::try_join!(
        ProfileRepo::count(store),
        EventRepo::count(store),
        VendorRepo::count(store),
        VenueRepo::count(store),
        BookingRepo::count_pending(store),
    )
}

pub async fn load(ctx: &mut ScreenContext) -> AppResult<AdminView> {
    let store = ctx.store_handle();
    let (users, vendors, venues, counts) = futures::join!(
        RoleRepo::users_with_roles(store.as_ref()),
        VendorRepo::list_all(store.as_ref()),
        VenueRepo::list_all(store.as_ref()),
        platform_counts(store.as_ref()),
    );
    let users = ctx.settle("users", users).await;
    let vendors = ctx.settle("vendors", vendors).await;
    let venues = ctx.settle("venues", venues).await;
    let (users_n, events_n, vendors_n, venues_n, pending_bookings) =
        ctx.settle("analytics", counts).await.data;

    let analytics = AdminAnalytics::compute(
        PlatformCounts {
            users: users_n,
            events: events_n,
            vendors: vendors_n,
            venues: venues_n,
            pending_bookings,
        },
        vendors.data.iter().map(Vendor::approval_status),
        venues.data.iter().map(Venue::approval_status),
    );

    Ok(AdminView {
        analytics,
        users,
        vendors,
        venues,
        roles: Role::ALL,
        approval_statuses: ApprovalStatus::ALL,
    })
}

/// GET /admin
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Admin);
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// POST /admin/users/{id}/roles
pub async fn grant_role(
    State(app): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(form): Json<RoleGrant>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Admin);
    let store = ctx.store_handle();
    let requested = form.role.clone();

    let mutation = ctx
        .mutate("Role added successfully", async move {
            let role: Role = requested.parse()?;
            let assignment = RoleRepo::assign(store.as_ref(), user_id, role).await?;
            tracing::info!(user_id = %user_id, role = %role, "Granted role");
            Ok::<_, AppError>(assignment)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// DELETE /admin/users/{id}/roles/{role}
pub async fn revoke_role(
    State(app): State<AppState>,
    Path((user_id, role)): Path<(UserId, String)>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Admin);
    let store = ctx.store_handle();

    let mutation = ctx
        .mutate("Role removed successfully", async move {
            let role: Role = role.parse()?;
            if !RoleRepo::revoke(store.as_ref(), user_id, role).await? {
                return Err(CoreError::NotFound {
                    entity: "Role assignment",
                    id: format!("{user_id}/{role}"),
                }
                .into());
            }
            tracing::info!(user_id = %user_id, role = %role, "Revoked role");
            Ok::<_, AppError>(())
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(None).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// POST /admin/vendors/{id}/approval
pub async fn review_vendor(
    State(app): State<AppState>,
    Path(id): Path<RowId>,
    Json(form): Json<ReviewForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Admin);
    let store = ctx.store_handle();
    let change = ApprovalChange::new(form.status, form.rejection_reason.as_deref());

    let mutation = ctx
        .mutate(review_message(form.status), async move {
            let change = change?;
            let vendor = VendorRepo::review(store.as_ref(), id, &change)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Vendor",
                    id: id.to_string(),
                })?;
            Ok::<_, AppError>(vendor)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// POST /admin/venues/{id}/approval
pub async fn review_venue(
    State(app): State<AppState>,
    Path(id): Path<RowId>,
    Json(form): Json<ReviewForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Admin);
    let store = ctx.store_handle();
    let change = ApprovalChange::new(form.status, form.rejection_reason.as_deref());

    let mutation = ctx
        .mutate(review_message(form.status), async move {
            let change = change?;
            let venue = VenueRepo::review(store.as_ref(), id, &change)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Venue",
                    id: id.to_string(),
                })?;
            Ok::<_, AppError>(venue)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

fn review_message(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::Approved => "Listing approved",
        ApprovalStatus::Rejected => "Listing rejected",
        ApprovalStatus::Pending => "Listing returned to pending",
    }
}
