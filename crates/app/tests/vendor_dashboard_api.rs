//! Integration tests for the vendor dashboard.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use common::{body_json, delete_json, get, post_json, put_json, toast_messages};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;
use wedplan_core::roles::Role;
use wedplan_core::status::{EventStatus, InquiryStatus};
use wedplan_db::models::event::CreateEvent;
use wedplan_db::models::inquiry::CreateInquiry;
use wedplan_db::repositories::{EventRepo, InquiryRepo, VendorRepo};
use wedplan_db::Table;

const BOUNDARY: &str = "wedplan-test-boundary";

/// Multipart body with one file part per `(file name, content type, contents)`.
async fn upload(app: Router, files: &[(&str, &str, &str)]) -> axum::http::Response<Body> {
    let mut body = Vec::new();
    for (name, content_type, contents) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/vendor-dashboard/portfolio")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn profile() -> serde_json::Value {
    json!({
        "business_name": "Golden Hour Studio",
        "category": "photography",
        "location": "Portland",
        "price_range": "$$$"
    })
}

#[tokio::test]
async fn first_save_creates_pending_listing() {
    let app = common::build_test_app();
    let user = app.sign_in_as(&[Role::Vendor]).await;

    let json = body_json(get(app.router(), "/vendor-dashboard").await).await;
    assert_eq!(json["state"], "empty");
    assert_eq!(json["view"]["vendor"], serde_json::Value::Null);

    let response = put_json(app.router(), "/vendor-dashboard/profile", profile()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Profile saved successfully"]);
    assert_eq!(json["view"]["vendor"]["approval_status"], "pending");

    // A second save updates the same listing.
    let mut edited = profile();
    edited["business_name"] = json!("Golden Hour Photo");
    put_json(app.router(), "/vendor-dashboard/profile", edited).await;
    let all = VendorRepo::list_all(app.store.as_ref()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].business_name, "Golden Hour Photo");
    assert_eq!(all[0].user_id, user);
}

#[tokio::test]
async fn portfolio_requires_a_profile() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Vendor]).await;

    let response = upload(app.router(), &[("a.png", "image/png", "png")]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Create your vendor profile first"]);
}

#[tokio::test]
async fn portfolio_upload_and_removal() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Vendor]).await;
    put_json(app.router(), "/vendor-dashboard/profile", profile()).await;

    let response = upload(
        app.router(),
        &[("first.PNG", "image/png", "one"), ("second.jpg", "image/jpeg", "two")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let images: Vec<String> = json["view"]["vendor"]["portfolio_images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u.as_str().unwrap().to_string())
        .collect();
    assert_eq!(images.len(), 2);
    assert!(images[0].starts_with("http://localhost:3000/storage/vendor-portfolios/"));
    assert!(images[0].ends_with(".png"));

    // Uploaded files are served back from /storage.
    let path = images[1].trim_start_matches("http://localhost:3000");
    let served = get(app.router(), path).await;
    assert_eq!(served.status(), StatusCode::OK);

    let response = delete_json(
        app.router(),
        "/vendor-dashboard/portfolio",
        json!({ "url": images[0] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"]["vendor"]["portfolio_images"], json!([images[1]]));
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Vendor]).await;
    put_json(app.router(), "/vendor-dashboard/profile", profile()).await;

    let response = upload(app.router(), &[("notes.txt", "text/plain", "hello")]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["notes.txt is not an image"]);

    let vendor = VendorRepo::list_all(app.store.as_ref()).await.unwrap().remove(0);
    assert!(vendor.portfolio().is_empty());
}

#[tokio::test]
async fn vendor_answers_own_inquiries() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Vendor]).await;
    put_json(app.router(), "/vendor-dashboard/profile", profile()).await;
    let vendor = VendorRepo::list_all(app.store.as_ref()).await.unwrap().remove(0);

    let couple = Uuid::new_v4();
    let event = EventRepo::create(
        app.store.as_ref(),
        &CreateEvent {
            couple_id: couple,
            planner_id: None,
            title: "Garden party".into(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2027, 7, 3).unwrap(),
            venue_location: None,
            budget: None,
            guest_count: 60,
            status: EventStatus::Planning,
        },
    )
    .await
    .unwrap();
    let inquiry = InquiryRepo::create(
        app.store.as_ref(),
        &CreateInquiry {
            vendor_id: vendor.id,
            event_id: event.id,
            inquirer_id: couple,
            message: Some("Available in July?".into()),
        },
    )
    .await
    .unwrap();

    let response = post_json(
        app.router(),
        &format!("/vendor-dashboard/inquiries/{}/status", inquiry.id),
        json!({ "status": "accepted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"]["inquiries"]["data"][0]["status"], "accepted");

    let stored = InquiryRepo::list_for_vendor(app.store.as_ref(), vendor.id).await.unwrap();
    assert_eq!(stored[0].status, InquiryStatus::Accepted);

    let response = post_json(
        app.router(),
        &format!("/vendor-dashboard/inquiries/{}/status", Uuid::new_v4()),
        json!({ "status": "declined" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn failed_listing_update_keeps_image_file() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Vendor]).await;
    put_json(app.router(), "/vendor-dashboard/profile", profile()).await;
    let json = body_json(upload(app.router(), &[("cake.png", "image/png", "cake")]).await).await;
    let url = json["view"]["vendor"]["portfolio_images"][0]
        .as_str()
        .unwrap()
        .to_string();
    let path = url.trim_start_matches("http://localhost:3000").to_string();

    app.store.fail_writes(Table::Vendors).await;
    let response = delete_json(app.router(), "/vendor-dashboard/portfolio", json!({ "url": url })).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(get(app.router(), &path).await.status(), StatusCode::OK);
    let vendor = VendorRepo::list_all(app.store.as_ref()).await.unwrap().remove(0);
    assert_eq!(vendor.portfolio(), [url.clone()].as_slice());

    app.store.recover(Table::Vendors).await;
    let response = delete_json(app.router(), "/vendor-dashboard/portfolio", json!({ "url": url })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get(app.router(), &path).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_upload_leaves_no_stored_objects() {
    let app = common::build_test_app();
    let user = app.sign_in_as(&[Role::Vendor]).await;
    put_json(app.router(), "/vendor-dashboard/profile", profile()).await;

    app.store.fail_writes(Table::Vendors).await;
    let response = upload(
        app.router(),
        &[("first.png", "image/png", "one"), ("second.png", "image/png", "two")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "failed");

    let folder = app
        .state
        .config
        .storage_root
        .join("vendor-portfolios")
        .join(user.to_string());
    let leftovers = std::fs::read_dir(&folder)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}
