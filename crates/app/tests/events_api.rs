//! Integration tests for creating and listing events.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, toast_messages};
use serde_json::json;
use uuid::Uuid;
use wedplan_core::roles::Role;
use wedplan_core::status::EventStatus;
use wedplan_db::repositories::EventRepo;
use wedplan_db::Table;

fn wedding() -> serde_json::Value {
    json!({
        "title": "Maya & Theo",
        "event_date": "2027-08-21",
        "venue_location": "Napa",
        "budget": 45000.0,
        "guest_count": 150
    })
}

#[tokio::test]
async fn create_event_redirects_to_events() {
    let app = common::build_test_app();
    let couple = app.sign_in_as(&[Role::Couple]).await;

    let response = post_json(app.router(), "/events/create", wedding()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/events");
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["Event created successfully!"]);

    let events = EventRepo::list_for_member(app.store.as_ref(), couple).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Maya & Theo");
    assert_eq!(events[0].status, Some(EventStatus::Planning));

    let json = body_json(get(app.router(), "/events").await).await;
    assert_eq!(json["state"], "populated");
    assert_eq!(json["view"]["events"]["data"][0]["guest_count"], 150);
}

#[tokio::test]
async fn missing_date_keeps_the_form() {
    let app = common::build_test_app();
    let couple = app.sign_in_as(&[Role::Couple]).await;

    let response = post_json(
        app.router(),
        "/events/create",
        json!({ "title": "Maya & Theo", "guest_count": 150 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["form"]["title"], "Maya & Theo");
    assert_eq!(json["form"]["guest_count"], 150);
    assert_eq!(toast_messages(&json), vec!["Please select an event date"]);
    assert!(EventRepo::list_for_member(app.store.as_ref(), couple)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn empty_guest_count_defaults_to_zero() {
    let app = common::build_test_app();
    let couple = app.sign_in_as(&[Role::Planner]).await;

    let response = post_json(
        app.router(),
        "/events/create",
        json!({ "title": "Elopement", "event_date": "2027-02-14" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let events = EventRepo::list_for_member(app.store.as_ref(), couple).await.unwrap();
    assert_eq!(events[0].guest_count, Some(0));
}

#[tokio::test]
async fn status_change_applies_to_own_event_only() {
    let app = common::build_test_app();
    let couple = app.sign_in_as(&[Role::Couple]).await;
    post_json(app.router(), "/events/create", wedding()).await;
    let event = EventRepo::list_for_member(app.store.as_ref(), couple)
        .await
        .unwrap()
        .remove(0);

    let response = post_json(
        app.router(),
        &format!("/events/{}/status", event.id),
        json!({ "status": "confirmed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["outcome"], "applied");
    assert_eq!(json["view"]["events"]["data"][0]["status"], "confirmed");

    let response = post_json(
        app.router(),
        &format!("/events/{}/status", Uuid::new_v4()),
        json!({ "status": "cancelled" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(toast_messages(&json), vec!["You can only update your own events"]);
}

#[tokio::test]
async fn failed_reload_keeps_previous_rows() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;
    post_json(app.router(), "/events/create", wedding()).await;

    let json = body_json(get(app.router(), "/events").await).await;
    assert_eq!(json["view"]["events"]["stale"], false);

    app.store.fail(Table::Events).await;
    let response = get(app.router(), "/events").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"], "populated");
    assert_eq!(json["view"]["events"]["stale"], true);
    assert_eq!(json["view"]["events"]["data"][0]["title"], "Maya & Theo");
    assert_eq!(toast_messages(&json), vec!["Failed to load events"]);

    app.store.recover(Table::Events).await;
    let json = body_json(get(app.router(), "/events").await).await;
    assert_eq!(json["view"]["events"]["stale"], false);
}

#[tokio::test]
async fn dashboard_lists_members_events() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;
    post_json(app.router(), "/events/create", wedding()).await;

    let json = body_json(get(app.router(), "/dashboard").await).await;
    assert_eq!(json["state"], "populated");
    assert_eq!(json["view"]["events"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["view"]["roles"], json!(["couple"]));
}
