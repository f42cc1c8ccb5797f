//! Integration tests for the budget tracker.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json, put_json, toast_messages};
use serde_json::json;
use wedplan_core::budget::BUDGET_STORAGE_KEY;
use wedplan_core::roles::Role;

#[tokio::test]
async fn fresh_budget_shows_default_figures() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let json = body_json(get(app.router(), "/budget").await).await;
    assert_eq!(json["state"], "populated");
    let summary = &json["view"]["summary"];
    assert_eq!(summary["total_budget"], 60000.0);
    assert_eq!(summary["total_spent"], 47300.0);
    assert_eq!(summary["remaining"], 12700.0);
    assert_eq!(summary["percent_used"], 78.8);
    assert_eq!(json["view"]["data"]["categories"].as_array().unwrap().len(), 8);
    assert_eq!(json["view"]["storage"]["save_status"], serde_json::Value::Null);
}

#[tokio::test]
async fn category_lifecycle_persists_between_visits() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Planner]).await;

    let response = post_json(
        app.router(),
        "/budget/categories",
        json!({ "name": " Cake ", "budget": 900.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Cake category added"]);
    assert_eq!(json["view"]["storage"]["save_status"], "success");

    let categories = json["view"]["data"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 9);
    let cake = &categories[8];
    assert_eq!(cake["name"], "Cake");
    assert_eq!(cake["spent"], 0.0);
    let cake_id = cake["id"].as_i64().unwrap();

    let response = put_json(
        app.router(),
        &format!("/budget/categories/{cake_id}"),
        json!({ "budget": 900.0, "spent": 1000.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let usage = &json["view"]["summary"]["categories"][8];
    assert_eq!(usage["remaining"], -100.0);
    assert_eq!(usage["over_budget"], true);

    // Venue is id 1 in the default document.
    let response = delete(app.router(), "/budget/categories/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.router(), "/budget").await).await;
    let names: Vec<&str> = json["view"]["data"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 8);
    assert!(!names.contains(&"Venue"));
    assert!(names.contains(&"Cake"));
}

#[tokio::test]
async fn incomplete_category_is_rejected() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let response = post_json(app.router(), "/budget/categories", json!({ "name": "Favors" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        toast_messages(&json),
        vec!["Please enter a category name and budget"]
    );

    let json = body_json(get(app.router(), "/budget").await).await;
    assert_eq!(json["view"]["data"]["categories"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn total_budget_must_be_positive() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let response = put_json(app.router(), "/budget/total", json!({ "amount": 0.0 })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["form"]["amount"], 0.0);

    let response = put_json(app.router(), "/budget/total", json!({ "amount": 80000.0 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"]["summary"]["remaining"], 32700.0);
}

#[tokio::test]
async fn reset_restores_defaults() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;
    put_json(app.router(), "/budget/total", json!({ "amount": 1000.0 })).await;

    let response = post_empty(app.router(), "/budget/reset").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"]["data"]["totalBudget"], 60000.0);
    assert_eq!(json["view"]["storage"]["last_saved"], serde_json::Value::Null);
}

#[tokio::test]
async fn storage_self_test_reports_success() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let response = post_empty(app.router(), "/budget/storage-test").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Local storage is working"]);
}

#[tokio::test]
async fn export_downloads_dated_json() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let response = get(app.router(), "/budget/export").await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"budget-tracker-"));
    assert!(disposition.ends_with(".json\""));

    let json = body_json(response).await;
    assert_eq!(json["totalBudget"], 60000.0);
    assert_eq!(json["categories"].as_array().unwrap().len(), 8);
    assert!(json["exportedAt"].is_string());
}

#[tokio::test]
async fn unreadable_storage_keeps_last_budget_and_blocks_edits() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;
    post_json(
        app.router(),
        "/budget/categories",
        json!({ "name": "Cake", "budget": 900.0 }),
    )
    .await;

    let document = app
        .state
        .config
        .local_state_dir
        .join(format!("{BUDGET_STORAGE_KEY}.json"));
    std::fs::remove_file(&document).unwrap();
    std::fs::create_dir(&document).unwrap();

    let response = get(app.router(), "/budget").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Failed to load budget"]);
    assert_eq!(json["view"]["stale"], true);
    assert_eq!(json["view"]["data"]["categories"].as_array().unwrap().len(), 9);

    let response = put_json(app.router(), "/budget/total", json!({ "amount": 75000.0 })).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "failed");
    assert!(document.is_dir());

    let response = get(app.router(), "/budget/export").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
