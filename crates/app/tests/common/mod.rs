#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use wedplan_app::budget_store::{BudgetStore, LocalStorage};
use wedplan_app::config::AppConfig;
use wedplan_app::navigator::Navigator;
use wedplan_app::router::build_app_router;
use wedplan_app::session::{
    encode_token, AuthEvent, Claims, Identity, JwtConfig, SessionStore, UserMetadata,
};
use wedplan_app::state::AppState;
use wedplan_core::roles::Role;
use wedplan_core::types::UserId;
use wedplan_db::models::profile::CreateProfile;
use wedplan_db::repositories::{ProfileRepo, RoleRepo};
use wedplan_db::storage::LocalBlobStore;
use wedplan_db::MemoryStore;

pub const TEST_SECRET: &str = "test-secret";

/// Build a test `AppConfig` with safe defaults, keeping files under `dir`.
pub fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            audience: "authenticated".to_string(),
        },
        storage_root: dir.path().join("storage"),
        storage_public_url: "http://localhost:3000/storage".to_string(),
        local_state_dir: dir.path().join("local-state"),
    }
}

/// A running application over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    _dir: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Create a profile holding `roles` and make it the signed-in identity.
    pub async fn sign_in_as(&self, roles: &[Role]) -> UserId {
        let id = Uuid::new_v4();
        let identity = Identity {
            id,
            email: format!("{id}@example.com"),
            full_name: "Test User".to_string(),
        };
        self.seed_user(&identity, roles).await;
        self.state.session.apply(AuthEvent::SignedIn(identity));
        id
    }

    pub async fn seed_user(&self, identity: &Identity, roles: &[Role]) {
        ProfileRepo::ensure(
            self.store.as_ref(),
            &CreateProfile {
                id: identity.id,
                email: identity.email.clone(),
                full_name: identity.full_name.clone(),
            },
        )
        .await
        .unwrap();
        for role in roles {
            RoleRepo::assign(self.store.as_ref(), identity.id, *role)
                .await
                .unwrap();
        }
    }

    pub fn sign_out(&self) {
        self.state.session.apply(AuthEvent::SignedOut);
    }
}

/// Build the full application router with all middleware layers over a
/// fresh in-memory store.
pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        store: store.clone(),
        blobs: Arc::new(LocalBlobStore::new(
            config.storage_root.clone(),
            config.storage_public_url.clone(),
        )),
        session: Arc::new(SessionStore::new()),
        navigator: Arc::new(Navigator::new()),
        budget: Arc::new(BudgetStore::new(LocalStorage::new(
            config.local_state_dir.clone(),
        ))),
        config: Arc::new(config),
    };

    TestApp {
        router: build_app_router(state.clone()).unwrap(),
        state,
        store,
        _dir: dir,
    }
}

/// Sign claims for `user_id` with the test secret.
pub fn mint_token(user_id: UserId, email: &str, full_name: &str, role: Option<&str>) -> String {
    let claims = Claims {
        sub: user_id,
        email: Some(email.to_string()),
        exp: chrono::Utc::now().timestamp() + 3600,
        aud: "authenticated".to_string(),
        user_metadata: UserMetadata {
            full_name: Some(full_name.to_string()),
            role: role.map(str::to_string),
        },
    };
    let config = JwtConfig {
        secret: TEST_SECRET.to_string(),
        audience: "authenticated".to_string(),
    };
    encode_token(&claims, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, &body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, &body).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::DELETE, uri, &body).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Toast messages in a screen response body.
pub fn toast_messages(json: &Value) -> Vec<String> {
    json["toasts"]
        .as_array()
        .map(|toasts| {
            toasts
                .iter()
                .filter_map(|t| t["message"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
