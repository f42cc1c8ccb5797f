//! Integration tests for results that arrive after the user navigated away.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, get};
use wedplan_app::error::AppError;
use wedplan_app::screens::{events, Mount, ScreenContext};
use wedplan_core::roles::Role;
use wedplan_core::routes::Route;

async fn mount(app: &common::TestApp, route: Route) -> ScreenContext {
    match ScreenContext::mount(&app.state, route).await {
        Mount::Ready(ctx) => ctx,
        Mount::Redirect(_) => panic!("{} should be reachable", route.path()),
    }
}

#[tokio::test]
async fn render_after_navigating_away_is_dropped() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let mut ctx = mount(&app, Route::Events).await;
    let view = events::load(&mut ctx).await.unwrap();

    // The user moves on before the events screen finishes.
    let response = get(app.router(), "/venues").await;
    assert_eq!(response.status(), StatusCode::OK);

    let err = ctx.render(view).await.unwrap_err();
    assert!(matches!(err, AppError::Superseded));
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SUPERSEDED");
}

#[tokio::test]
async fn unchanged_after_navigating_away_is_dropped() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let ctx = mount(&app, Route::Budget).await;
    app.state.navigator.enter(Route::Dashboard).await;

    let response = ctx.unchanged(None).await.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SUPERSEDED");
}

#[tokio::test]
async fn current_screen_still_renders() {
    let app = common::build_test_app();
    app.sign_in_as(&[Role::Couple]).await;

    let mut ctx = mount(&app, Route::Events).await;
    let view = events::load(&mut ctx).await.unwrap();
    let response = ctx.render(view).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"], "empty");
}
