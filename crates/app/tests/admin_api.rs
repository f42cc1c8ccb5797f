//! Integration tests for the admin console.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, toast_messages};
use serde_json::json;
use uuid::Uuid;
use wedplan_core::roles::Role;
use wedplan_core::status::{ApprovalStatus, VendorCategory};
use wedplan_db::models::vendor::{CreateVendor, Vendor, VendorProfileFields};
use wedplan_db::models::venue::CreateVenue;
use wedplan_db::repositories::{RoleRepo, VendorRepo, VenueRepo};
use wedplan_db::MemoryStore;

async fn seed_vendor(store: &MemoryStore, name: &str) -> Vendor {
    VendorRepo::create(
        store,
        &CreateVendor {
            user_id: Uuid::new_v4(),
            fields: VendorProfileFields {
                business_name: name.to_string(),
                category: VendorCategory::Florist,
                description: None,
                location: Some("Austin".to_string()),
                price_range: None,
            },
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn rejection_requires_reason_and_is_recorded() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Admin]).await;
    let vendor = seed_vendor(&app.store, "Petal & Stem").await;
    let uri = format!("/admin/vendors/{}/approval", vendor.id);

    // Blank reason: blocked before the store is touched.
    let response = post_json(
        app.router(),
        &uri,
        json!({ "status": "rejected", "rejection_reason": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "rejected");
    assert_eq!(json["form"]["status"], "rejected");
    assert_eq!(toast_messages(&json), vec!["A rejection reason is required"]);

    let unchanged = VendorRepo::list_all(app.store.as_ref()).await.unwrap();
    assert_eq!(unchanged[0].approval_status(), ApprovalStatus::Pending);
    assert_eq!(unchanged[0].rejection_reason, None);

    // With a reason the review applies and the console reloads.
    let response = post_json(
        app.router(),
        &uri,
        json!({ "status": "rejected", "rejection_reason": " Incomplete portfolio " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "applied");
    let listed = &json["view"]["vendors"]["data"][0];
    assert_eq!(listed["approval_status"], "rejected");
    assert_eq!(listed["rejection_reason"], "Incomplete portfolio");
}

#[tokio::test]
async fn approving_clears_previous_rejection_reason() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Admin]).await;
    let vendor = seed_vendor(&app.store, "Lens Co").await;
    let uri = format!("/admin/vendors/{}/approval", vendor.id);

    post_json(app.router(), &uri, json!({ "status": "rejected", "rejection_reason": "Blurry" })).await;
    let response = post_json(app.router(), &uri, json!({ "status": "approved" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = VendorRepo::list_all(app.store.as_ref()).await.unwrap();
    assert_eq!(stored[0].approval_status(), ApprovalStatus::Approved);
    assert_eq!(stored[0].rejection_reason, None);
}

#[tokio::test]
async fn analytics_count_pending_listings() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Admin]).await;
    seed_vendor(&app.store, "One").await;
    let approved = seed_vendor(&app.store, "Two").await;
    post_json(
        app.router(),
        &format!("/admin/vendors/{}/approval", approved.id),
        json!({ "status": "approved" }),
    )
    .await;
    VenueRepo::create(
        app.store.as_ref(),
        &CreateVenue {
            manager_id: Uuid::new_v4(),
            name: "Grand Hall".into(),
            location: "Dallas".into(),
            description: None,
            capacity: Some(300),
            price_per_day: None,
            amenities: None,
        },
    )
    .await
    .unwrap();

    let json = body_json(get(app.router(), "/admin").await).await;
    let analytics = &json["view"]["analytics"];
    assert_eq!(analytics["total_users"], 1);
    assert_eq!(analytics["total_vendors"], 2);
    assert_eq!(analytics["pending_vendors"], 1);
    assert_eq!(analytics["total_venues"], 1);
    assert_eq!(analytics["pending_venues"], 1);
    assert_eq!(analytics["pending_bookings"], 0);
}

#[tokio::test]
async fn roles_are_granted_and_revoked() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Admin]).await;
    let target = Uuid::new_v4();

    let response = post_json(
        app.router(),
        &format!("/admin/users/{target}/roles"),
        json!({ "role": "planner" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Role added successfully"]);
    assert_eq!(
        RoleRepo::roles_for(app.store.as_ref(), target).await.unwrap(),
        vec![Role::Planner]
    );

    // Granting it again is a store conflict, not a new row.
    let response = post_json(
        app.router(),
        &format!("/admin/users/{target}/roles"),
        json!({ "role": "planner" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["That record already exists"]);

    let response = delete(app.router(), &format!("/admin/users/{target}/roles/planner")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(RoleRepo::roles_for(app.store.as_ref(), target).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Admin]).await;

    let response = post_json(
        app.router(),
        &format!("/admin/users/{}/roles", Uuid::new_v4()),
        json!({ "role": "superuser" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["form"]["role"], "superuser");
}
