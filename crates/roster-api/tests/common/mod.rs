//! Shared fixtures for API integration tests: a seeded in-memory store and
//! request helpers for driving the router with `tower::ServiceExt`.
#![allow(dead_code)] // each test binary uses a different subset

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use roster_api::{app, AppState, SessionKey};
use roster_core::{ConfigStore, RecordStore};
use roster_sheets::InMemoryStore;

pub const TEST_SECRET: &str = "test-secret";
pub const ADMIN_PASSWORD: &str = "rahasia123";

/// Live + trash tables with a small, varied roster and the admin password
/// in the config blob.
pub fn seeded_store() -> Arc<InMemoryStore> {
    Arc::new(
        InMemoryStore::new()
            .with_table(
                "Generus",
                vec![
                    "Nama",
                    "Desa",
                    "Kelompok",
                    "Gender",
                    "Tanggal Lahir",
                    "Hobi",
                    "Skill",
                    "Timestamp",
                ],
                vec![
                    vec!["Budi", "Gayungan", "Menanggal", "L", "15/08/2015", "membaca", "", "01/01/2024 10:00:00"],
                    vec!["Siti", "Ketintang", "Karah", "P", "10/02/2010", "", "masak", "02/01/2024 10:00:00"],
                    vec!["Agus", "Gayungan", "Gayungan 1", "L", "", "futsal", "", "03/01/2024 10:00:00"],
                    vec!["Budi", "Gayungan", "Menanggal", "L", "15/08/2015", "", "", "04/01/2024 10:00:00"],
                    vec!["Dewi", "Luar Kota", "Entah", "P", "01/06/2005", "", "", "05/01/2024 10:00:00"],
                ],
            )
            .with_table(
                "Trash",
                vec![
                    "Nama",
                    "Desa",
                    "Kelompok",
                    "Gender",
                    "Tanggal Lahir",
                    "Hobi",
                    "Skill",
                    "Timestamp",
                    "Menikah",
                    "Pindah",
                    "Alasan",
                    "Dihapus Pada",
                ],
                vec![],
            )
            .with_config(
                "admin_password",
                serde_json::Value::String(ADMIN_PASSWORD.to_string()),
            ),
    )
}

/// State over the seeded store with the test signing key.
pub fn test_state(store: Arc<InMemoryStore>) -> AppState {
    let records: Arc<dyn RecordStore> = store.clone();
    let config: Arc<dyn ConfigStore> = store;
    AppState::new(records, config, SessionKey::from_secret(TEST_SECRET))
}

/// Router over a freshly seeded store.
pub fn test_app() -> (Router, Arc<InMemoryStore>) {
    let store = seeded_store();
    (app(test_state(store.clone())), store)
}

/// A valid session cookie header value.
pub fn session_cookie() -> String {
    let token = SessionKey::from_secret(TEST_SECRET)
        .mint(chrono::Utc::now().timestamp())
        .expect("mint test token");
    format!("roster_session={}", token)
}

/// GET helper.
pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// GET with the admin session cookie.
pub async fn get_admin(router: &Router, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, session_cookie())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// JSON-body request, optionally authenticated.
pub async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    authenticated: bool,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if authenticated {
        builder = builder.header(header::COOKIE, session_cookie());
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
