//! Vendor dashboard: business profile, portfolio images and inquiries.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use wedplan_core::error::CoreError;
use wedplan_core::routes::Route;
use wedplan_core::status::InquiryStatus;
use wedplan_core::types::{RowId, UserId};
use wedplan_core::validation::VendorProfileForm;
use wedplan_db::models::inquiry::VendorInquiry;
use wedplan_db::models::vendor::{CreateVendor, Vendor, VendorProfileFields};
use wedplan_db::repositories::{InquiryRepo, VendorRepo};
use wedplan_db::storage::{key_from_public_url, portfolio_key, BlobStore, PORTFOLIO_BUCKET};
use wedplan_db::DataStore;

use super::vendors::{category_options, CategoryOption};
use super::{retained_form, ScreenContext, ScreenView};
use crate::error::{AppError, AppResult};
use crate::loaders::Loaded;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VendorDashboardView {
    /// `None` until the vendor saves a profile.
    pub vendor: Option<Vendor>,
    pub inquiries: Loaded<Vec<VendorInquiry>>,
    pub inquiry_statuses: &'static [InquiryStatus],
    pub categories: Vec<CategoryOption>,
}

impl ScreenView for VendorDashboardView {
    fn is_empty(&self) -> bool {
        self.vendor.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveImage {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InquiryDecision {
    pub status: InquiryStatus,
}

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

pub async fn load(ctx: &mut ScreenContext) -> AppResult<VendorDashboardView> {
    let user_id = ctx.user_id()?;
    let vendor = VendorRepo::find_for_user(ctx.store(), user_id).await;
    let vendor = ctx.settle("vendor_profile", vendor).await.data;

    let inquiries = match &vendor {
        Some(v) => {
            let inquiries = InquiryRepo::list_for_vendor(ctx.store(), v.id).await;
            ctx.settle("inquiries", inquiries).await
        }
        None => Loaded::fresh(Vec::new()),
    };

    Ok(VendorDashboardView {
        vendor,
        inquiries,
        inquiry_statuses: InquiryStatus::ALL,
        categories: category_options(),
    })
}

async fn own_vendor(store: &dyn DataStore, user_id: UserId) -> Result<Vendor, AppError> {
    VendorRepo::find_for_user(store, user_id)
        .await?
        .ok_or_else(|| CoreError::validation("Create your vendor profile first").into())
}

/// GET /vendor-dashboard
pub async fn show(State(app): State<AppState>) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VendorDashboard);
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// PUT /vendor-dashboard/profile
///
/// Creates the vendor listing on first save (pending review), updates it
/// afterwards.
pub async fn save_profile(
    State(app): State<AppState>,
    Json(form): Json<VendorProfileForm>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VendorDashboard);
    let store = ctx.store_handle();
    let user_id = ctx.user_id()?;
    let validated = form.validate();

    let mutation = ctx
        .mutate("Profile saved successfully", async move {
            let fields = VendorProfileFields::from(validated?);
            let vendor = match VendorRepo::find_for_user(store.as_ref(), user_id).await? {
                Some(existing) => VendorRepo::update_profile(store.as_ref(), existing.id, &fields)
                    .await?
                    .ok_or_else(|| CoreError::NotFound {
                        entity: "Vendor",
                        id: existing.id.to_string(),
                    })?,
                None => {
                    let created = VendorRepo::create(store.as_ref(), &CreateVendor { user_id, fields }).await?;
                    tracing::info!(vendor_id = %created.id, user_id = %user_id, "Created vendor profile");
                    created
                }
            };
            Ok::<_, AppError>(vendor)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// POST /vendor-dashboard/portfolio (multipart)
///
/// Every file part must be an image. Uploaded images are appended to the
/// portfolio in the order received. If the listing cannot be updated the
/// objects stored by this request are removed again.
pub async fn upload_portfolio(
    State(app): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VendorDashboard);
    let store = ctx.store_handle();
    let blobs: Arc<dyn BlobStore> = Arc::clone(&app.blobs);
    let user_id = ctx.user_id()?;

    let mutation = ctx
        .mutate("Images uploaded successfully", async move {
            let mut uploads = Vec::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
            {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let is_image = field
                    .content_type()
                    .is_some_and(|ct| ct.starts_with("image/"));
                if !is_image {
                    return Err(CoreError::validation(format!("{file_name} is not an image")).into());
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                uploads.push(Upload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            if uploads.is_empty() {
                return Err(AppError::BadRequest("No images received".to_string()));
            }

            let vendor = own_vendor(store.as_ref(), user_id).await?;
            let mut stored = Vec::new();
            let result = store_portfolio(store.as_ref(), blobs.as_ref(), &vendor, uploads, &mut stored).await;
            if result.is_err() && !stored.is_empty() {
                if let Err(e) = blobs.remove(PORTFOLIO_BUCKET, &stored).await {
                    tracing::warn!(vendor_id = %vendor.id, error = %e, "Could not remove orphaned uploads");
                }
            }
            result
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(None).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// Upload each image and point the listing at them. Keys written so far are
/// pushed to `stored`.
async fn store_portfolio(
    store: &dyn DataStore,
    blobs: &dyn BlobStore,
    vendor: &Vendor,
    uploads: Vec<Upload>,
    stored: &mut Vec<String>,
) -> Result<Vendor, AppError> {
    let mut images = vendor.portfolio().to_vec();
    for upload in uploads {
        let key = portfolio_key(vendor.user_id, &upload.file_name);
        blobs.upload(PORTFOLIO_BUCKET, &key, upload.bytes).await?;
        images.push(blobs.public_url(PORTFOLIO_BUCKET, &key));
        stored.push(key);
    }
    let count = images.len();
    let updated = VendorRepo::set_portfolio(store, vendor.id, images)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Vendor",
            id: vendor.id.to_string(),
        })?;
    tracing::info!(vendor_id = %updated.id, images = count, "Updated portfolio");
    Ok(updated)
}

/// DELETE /vendor-dashboard/portfolio
///
/// The listing is updated first; the stored object is removed afterwards.
pub async fn remove_portfolio_image(
    State(app): State<AppState>,
    Json(form): Json<RemoveImage>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VendorDashboard);
    let store = ctx.store_handle();
    let blobs: Arc<dyn BlobStore> = Arc::clone(&app.blobs);
    let user_id = ctx.user_id()?;
    let url = form.url.clone();

    let mutation = ctx
        .mutate("Image removed", async move {
            let vendor = own_vendor(store.as_ref(), user_id).await?;
            if !vendor.portfolio().contains(&url) {
                return Err(CoreError::validation("Image is not in your portfolio").into());
            }
            let images: Vec<String> = vendor
                .portfolio()
                .iter()
                .filter(|u| **u != url)
                .cloned()
                .collect();
            let vendor = VendorRepo::set_portfolio(store.as_ref(), vendor.id, images)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Vendor",
                    id: vendor.id.to_string(),
                })?;
            if let Some(key) = key_from_public_url(&url, PORTFOLIO_BUCKET) {
                if let Err(e) = blobs.remove(PORTFOLIO_BUCKET, &[key]).await {
                    tracing::warn!(vendor_id = %vendor.id, error = %e, "Could not remove portfolio object");
                }
            }
            Ok::<_, AppError>(vendor)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}

/// POST /vendor-dashboard/inquiries/{id}/status
pub async fn respond_to_inquiry(
    State(app): State<AppState>,
    Path(id): Path<RowId>,
    Json(form): Json<InquiryDecision>,
) -> AppResult<Response> {
    let mut ctx = mount!(app, Route::VendorDashboard);
    let store = ctx.store_handle();
    let user_id = ctx.user_id()?;
    let status = form.status;

    let mutation = ctx
        .mutate("Inquiry updated", async move {
            let vendor = own_vendor(store.as_ref(), user_id).await?;
            let inquiries = InquiryRepo::list_for_vendor(store.as_ref(), vendor.id).await?;
            if !inquiries.iter().any(|i| i.id == id) {
                return Err(CoreError::Forbidden("Inquiry is not addressed to you".into()).into());
            }
            let updated = InquiryRepo::update_status(store.as_ref(), id, status)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Inquiry",
                    id: id.to_string(),
                })?;
            Ok::<_, AppError>(updated)
        })
        .await;

    if !mutation.is_applied() {
        return ctx.unchanged(retained_form(&form)).await;
    }
    let view = load(&mut ctx).await?;
    ctx.render(view).await
}
