//! # roster-api
//!
//! HTTP API server for the generus roster dashboard.
//!
//! Exposes the dashboard's server operations as JSON endpoints over the
//! spreadsheet-backed stores: filtered record listings, CRUD with the trash
//! flow, location analytics, shared config, CSV export, and the cookie-
//! session admin gate.

pub mod error;
pub mod handlers;
pub mod query;
pub mod session;
pub mod state;

use axum::http::Request;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use error::ApiError;
pub use query::ListRecordsQuery;
pub use session::{AdminSession, SessionKey};
pub use state::{AppState, FeatureFlags};

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when debugging production incidents.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Assemble the application router over the given state.
pub fn app(state: AppState) -> Router {
    use handlers::{analytics, auth, config, records, trash};

    Router::new()
        .route("/health", get(health_check))
        // Records
        .route(
            "/api/records",
            get(records::list_records).post(records::create_record),
        )
        .route("/api/records/duplicates", get(records::list_duplicates))
        .route("/api/records/mismatches", get(records::list_mismatches))
        .route("/api/records/export", get(records::export_csv))
        .route(
            "/api/records/:row",
            put(records::update_record).delete(records::delete_record),
        )
        // Trash
        .route("/api/trash", get(trash::list_trash))
        .route("/api/trash/:row/restore", post(trash::restore_record))
        // Analytics
        .route("/api/analytics/desa", get(analytics::desa_summary))
        .route("/api/analytics/desa/:desa", get(analytics::kelompok_summary))
        .route(
            "/api/analytics/keywords/:field",
            get(analytics::keyword_summary),
        )
        // Shared config
        .route(
            "/api/config/columns/:view",
            get(config::get_columns).put(config::put_columns),
        )
        .route(
            "/api/config/keywords/:field",
            get(config::get_keywords).put(config::put_keywords),
        )
        .route(
            "/api/config/keywords/:field/discover",
            get(config::discover_terms),
        )
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session_info))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}
