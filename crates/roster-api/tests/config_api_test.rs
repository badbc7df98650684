//! Integration tests for the shared config endpoints.

mod common;

use axum::http::StatusCode;
use roster_api::app;
use serde_json::json;

use common::{body_json, get, send_json, test_app, test_state};

#[tokio::test]
async fn column_preferences_round_trip() {
    let (router, _) = test_app();

    let body = body_json(get(&router, "/api/config/columns/records").await).await;
    assert_eq!(body, json!([]));

    let response = send_json(
        &router,
        "PUT",
        "/api/config/columns/records",
        json!(["Nama", "Desa", "Jenjang Kelas"]),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(get(&router, "/api/config/columns/records").await).await;
    assert_eq!(body, json!(["Nama", "Desa", "Jenjang Kelas"]));
}

#[tokio::test]
async fn config_writes_require_session() {
    let (router, _) = test_app();
    let response = send_json(
        &router,
        "PUT",
        "/api/config/columns/records",
        json!(["Nama"]),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn keyword_map_round_trip_and_field_validation() {
    let (router, _) = test_app();

    let response = send_json(
        &router,
        "PUT",
        "/api/config/keywords/hobi",
        json!({"Olahraga": ["futsal", "renang"]}),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(get(&router, "/api/config/keywords/hobi").await).await;
    assert_eq!(body["Olahraga"], json!(["futsal", "renang"]));

    // Only hobi/skill carry keyword maps.
    let response = get(&router, "/api/config/keywords/warna").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn discovery_surfaces_uncategorized_terms_only() {
    let store = common::seeded_store();
    let state = test_state(store);
    let router = app(state);

    send_json(
        &router,
        "PUT",
        "/api/config/keywords/hobi",
        json!({"Olahraga": ["futsal"]}),
        true,
    )
    .await;

    let body = body_json(get(&router, "/api/config/keywords/hobi/discover").await).await;
    let terms = body.as_array().unwrap();
    // "membaca" is uncategorized hobby text; "futsal" is claimed and its
    // record is categorized, so it must not surface.
    assert!(terms.iter().any(|t| t["term"] == "membaca"));
    assert!(terms.iter().all(|t| t["term"] != "futsal"));
}

#[tokio::test]
async fn discovery_respects_limit() {
    let (router, _) = test_app();
    let body = body_json(get(&router, "/api/config/keywords/hobi/discover?limit=1").await).await;
    assert!(body.as_array().unwrap().len() <= 1);
}
