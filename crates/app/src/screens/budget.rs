//! Budget tracker.
//!
//! The budget lives only in local storage. Every edit loads the saved
//! document, applies the change and writes it back, so a failed save leaves
//! the stored budget as it was. An edit is refused when the saved document
//! cannot be read.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use wedplan_core::budget::{export_filename, random_color, BudgetData, BudgetSummary, CategoryDraft};
use wedplan_core::routes::Route;
use wedplan_db::StoreError;

use super::{retained_form, ScreenContext, ScreenView};
use crate::budget_store::StorageInfo;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BudgetView {
    pub data: BudgetData,
    /// Reading local storage failed and `data` is the last copy shown.
    pub stale: bool,
    pub summary: BudgetSummary,
    pub storage: StorageInfo,
}

impl ScreenView for BudgetView {
    fn is_empty(&self) -> bool {
        self.data.categories.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalBudget {
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryAmounts {
    pub budget: f64,
    pub spent: f64,
}

pub async fn load(ctx: &mut ScreenContext) -> AppResult<BudgetView> {
    let budget = ctx.app().budget.clone();
    let loaded = ctx.settle("budget", budget.load().await).await;
    Ok(BudgetView {
        summary: loaded.data.summary(),
        storage: budget.info().await,
        stale: loaded.stale,
        data: loaded.data,
    })
}

/// GET /budget
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// PUT /budget/total
pub async fn set_total(
    State(app): State<AppState>,
    Json(form): Json<TotalBudget>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let budget = app.budget.clone();
    let amount = form.amount;

    let mutation = ctx
        .mutate("Total budget updated", async move {
            let mut data = budget.load().await?;
            data.set_total_budget(amount)?;
            budget.save(&data).await?;
            Ok::<_, AppError>(())
        })
        .await;

    finish(ctx, mutation.is_applied(), retained_form(&form)).await
}

/// POST /budget/categories
pub async fn add_category(
    State(app): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let budget = app.budget.clone();
    let name = draft.name.trim().to_string();

    let mutation = ctx
        .mutate(&format!("{name} category added"), async move {
            let mut data = budget.load().await?;
            let id = data
                .add_category(&draft, Utc::now().timestamp_millis(), random_color())?
                .id;
            budget.save(&data).await?;
            Ok::<_, AppError>(id)
        })
        .await;

    finish(ctx, mutation.is_applied(), None).await
}

/// PUT /budget/categories/{id}
pub async fn update_category(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<CategoryAmounts>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let budget = app.budget.clone();
    let (amount, spent) = (form.budget, form.spent);

    let mutation = ctx
        .mutate("Category updated", async move {
            let mut data = budget.load().await?;
            data.update_category(id, amount, spent)?;
            budget.save(&data).await?;
            Ok::<_, AppError>(())
        })
        .await;

    finish(ctx, mutation.is_applied(), retained_form(&form)).await
}

/// DELETE /budget/categories/{id}
pub async fn remove_category(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let budget = app.budget.clone();

    let mutation = ctx
        .mutate("Category removed", async move {
            let mut data = budget.load().await?;
            let removed = data.remove_category(id)?;
            budget.save(&data).await?;
            tracing::debug!(category = %removed.name, "Removed budget category");
            Ok::<_, AppError>(())
        })
        .await;

    finish(ctx, mutation.is_applied(), None).await
}

/// POST /budget/reset
pub async fn reset(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let budget = app.budget.clone();

    let mutation = ctx
        .mutate("Budget reset to defaults", async move {
            budget.reset().await?;
            Ok::<_, AppError>(())
        })
        .await;

    finish(ctx, mutation.is_applied(), None).await
}

/// POST /budget/storage-test
pub async fn storage_test(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Budget);
    let budget = app.budget.clone();

    let mutation = ctx
        .mutate("Local storage is working", async move {
            if budget.self_test().await? {
                Ok::<_, AppError>(())
            } else {
                Err(AppError::from(StoreError::Unavailable(
                    "local storage returned a different value".into(),
                )))
            }
        })
        .await;

    finish(ctx, mutation.is_applied(), None).await
}

/// GET /budget/export
///
/// Downloads the saved budget as `budget-tracker-YYYY-MM-DD.json`.
pub async fn export(State(app): State<AppState>) -> AppResult<Response> {
    let _ctx = mount!(app, Route::Budget);
    let now = Utc::now();
    let export = app.budget.load().await?.export(now);
    let disposition = format!("attachment; filename=\"{}\"", export_filename(now.date_naive()));
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::InternalError(format!("Invalid export filename: {e}")))?;

    let mut response = (StatusCode::OK, Json(export)).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_DISPOSITION, disposition);
    tracing::info!("Exported budget");
    Ok(response)
}

async fn finish(mut ctx: ScreenContext, applied: bool, form: Option<serde_json::Value>) -> AppResult<Response> {
    if !applied {
        return ctx.unchanged(form).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}
