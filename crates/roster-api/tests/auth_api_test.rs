//! Integration tests for the admin auth gate.

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use roster_api::app;
use roster_sheets::InMemoryStore;
use serde_json::json;

use common::{body_json, get, get_admin, send_json, test_app, test_state, ADMIN_PASSWORD};

#[tokio::test]
async fn login_with_correct_password_sets_session_cookie() {
    let (router, _) = test_app();
    let response = send_json(
        &router,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": ADMIN_PASSWORD}),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("roster_session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn login_failure_is_generic() {
    let (router, _) = test_app();
    let response = send_json(
        &router,
        "POST",
        "/api/auth/login",
        json!({"username": "admin", "password": "salah"}),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // One generic message, no hint about which credential was wrong.
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn login_with_unset_password_is_rejected_not_crashed() {
    // A store with no admin_password key must still answer 401.
    let store = Arc::new(
        InMemoryStore::new().with_table("Generus", vec!["Nama"], vec![]),
    );
    let router = app(test_state(store));

    let response = send_json(
        &router,
        "POST",
        "/api/auth/login",
        json!({"password": ""}),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_endpoint_requires_valid_cookie() {
    let (router, _) = test_app();

    let response = get(&router, "/api/auth/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_admin(&router, "/api/auth/session").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sub"], "admin");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let (router, _) = test_app();
    let response = send_json(&router, "POST", "/api/auth/logout", json!({}), false).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_attempts_are_rate_limited() {
    let store = common::seeded_store();
    let state = test_state(store).with_login_rate_limit(2);
    let router = app(state);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let response = send_json(
            &router,
            "POST",
            "/api/auth/login",
            json!({"password": "salah"}),
            false,
        )
        .await;
        statuses.push(response.status());
    }
    assert_eq!(statuses[0], StatusCode::UNAUTHORIZED);
    assert_eq!(statuses[1], StatusCode::UNAUTHORIZED);
    assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
}
