//! Vendor directory and inquiries.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::directory::{filter_vendors, VendorQuery};
use wedplan_core::error::CoreError;
use wedplan_core::routes::Route;
use wedplan_core::status::VendorCategory;
use wedplan_core::types::RowId;
use wedplan_core::validation::non_blank;
use wedplan_db::models::inquiry::CreateInquiry;
use wedplan_db::models::vendor::Vendor;
use wedplan_db::repositories::{EventRepo, InquiryRepo, VendorRepo};

use super::{retained_form, ScreenContext, ScreenView};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// One entry of a category picker.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryOption {
    pub value: VendorCategory,
    pub label: &'static str,
}

pub fn category_options() -> Vec<CategoryOption> {
    VendorCategory::ALL
        .iter()
        .map(|&value| CategoryOption {
            value,
            label: value.label(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct VendorsView {
    pub results: Vec<Vendor>,
    /// Approved vendors before filtering.
    pub total: usize,
    pub stale: bool,
    pub query: VendorQuery,
    pub categories: Vec<CategoryOption>,
}

impl ScreenView for VendorsView {
    fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InquiryForm {
    pub event_id: RowId,
    #[serde(default)]
    pub message: String,
}

pub async fn load(ctx: &mut ScreenContext, query: VendorQuery) -> AppResult<VendorsView> {
    let vendors = VendorRepo::list_directory(ctx.store()).await;
    let vendors = ctx.settle("vendors", vendors).await;
    let results = filter_vendors(&vendors.data, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(VendorsView {
        results,
        total: vendors.data.len(),
        stale: vendors.stale,
        query,
        categories: category_options(),
    })
}

/// GET /vendors?search=&category=
pub async fn show(
    State(app): State<AppState>,
    Query(query): Query<VendorQuery>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Vendors);
    let view = load(&mut ctx, query).await?;
    ctx.render(view).await
}

/// POST /vendors/{id}/inquiries?search=&category=
///
/// Only vendors listed in the directory take inquiries. The directory
/// reloads with the filters given in the query string.
pub async fn send_inquiry(
    State(app): State<AppState>,
    Path(vendor_id): Path<RowId>,
    Query(query): Query<VendorQuery>,
    Json(form): Json<InquiryForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::Vendors);
    let store = ctx.store_handle();
    let inquirer_id = ctx.user_id()?;
    let event_id = form.event_id;
    let message = non_blank(&form.message);

    let mutation = ctx
        .mutate("Inquiry sent", async move {
            let listed = VendorRepo::list_directory(store.as_ref()).await?;
            if !listed.iter().any(|v| v.id == vendor_id) {
                return Err(CoreError::validation("This vendor is not accepting inquiries").into());
            }
            let own = EventRepo::list_for_member(store.as_ref(), inquirer_id).await?;
            if !own.iter().any(|e| e.id == event_id) {
                return Err(CoreError::Forbidden("Inquiries must be sent for one of your events".into()).into());
            }
            let inquiry = InquiryRepo::create(
                store.as_ref(),
                &CreateInquiry {
                    vendor_id,
                    event_id,
                    inquirer_id,
                    message,
                },
            )
            .await?;
            Ok::<_, AppError>(inquiry)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx, query).await?;
    ctx.render(view).await
}
