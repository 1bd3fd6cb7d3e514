//! Shared helpers for the API integration suites
//!
//! Builds the full application stack over the in-memory document store
//! and object storage so tests exercise the real router, extractors, and
//! services without external dependencies.
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use estate_inventory::config::Config;
use estate_inventory::database::Database;
use estate_inventory::models::{UserCreateRequest, UserRole};
use estate_inventory::storage::MemoryObjectStorage;
use estate_inventory::web::{AppState, create_router};

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub storage: Arc<MemoryObjectStorage>,
    pub database: Database,
}

pub async fn spawn_app() -> TestApp {
    let config = Config::default();
    let database = Database::new_in_memory();
    database.ensure_collections().await.expect("collections");
    let storage = Arc::new(MemoryObjectStorage::new());
    let state = AppState::new(config, database.clone(), storage.clone());
    let server = TestServer::new(create_router(state.clone())).expect("test server");

    TestApp {
        server,
        state,
        storage,
        database,
    }
}

/// Create an ADMIN account directly through the service layer and log it
/// in through the API, returning its bearer token.
pub async fn admin_token(app: &TestApp) -> String {
    app.state
        .user_service
        .create(UserCreateRequest {
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
            role: Some(UserRole::Admin),
            enabled: Some(true),
        })
        .await
        .expect("admin user");

    login(app, "admin@example.com", "admin123").await
}

/// Register a regular USER account through the API and return its token
pub async fn user_token(app: &TestApp, email: &str) -> String {
    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": "pass123" }))
        .await;
    response.assert_status_ok();
    data(&response.json::<Value>())["token"]
        .as_str()
        .expect("token")
        .to_string()
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    data(&response.json::<Value>())["token"]
        .as_str()
        .expect("token")
        .to_string()
}

/// Unwrap the `data` field of the standard response envelope
pub fn data(body: &Value) -> Value {
    assert_eq!(body["success"], true, "expected success envelope: {body}");
    body["data"].clone()
}
