//! Admin authentication: login, logout, session introspection.
//!
//! The gate checks a single submitted password against the value stored in
//! the shared config blob. Failures are reported with one generic message —
//! the gate never says which part was wrong, and the username is accepted
//! but not checked (it is decorative in the admin gate).

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info, warn};

use roster_core::defaults::CONFIG_KEY_ADMIN_PASSWORD;

use crate::error::ApiError;
use crate::session::{clear_session_cookie, session_cookie, AdminSession, SessionClaims};
use crate::state::AppState;

const GENERIC_FAILURE: &str = "invalid credentials";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    pub password: String,
}

/// Exchange the admin password for a session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(limiter) = &state.login_limiter {
        if limiter.check().is_err() {
            warn!(
                subsystem = "api",
                component = "session",
                op = "login",
                "Login rate limit hit"
            );
            return Err(ApiError::RateLimited);
        }
    }

    debug!(
        subsystem = "api",
        component = "session",
        op = "login",
        username = %body.username,
        "Login attempt"
    );

    let expected = state
        .config
        .get(CONFIG_KEY_ADMIN_PASSWORD)
        .await?
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default();

    if expected.is_empty() || body.password != expected {
        warn!(
            subsystem = "api",
            component = "session",
            op = "login",
            success = false,
            "Login rejected"
        );
        return Err(ApiError::Unauthorized(GENERIC_FAILURE.to_string()));
    }

    let token = state.session_key.mint(chrono::Utc::now().timestamp())?;

    info!(
        subsystem = "api",
        component = "session",
        op = "login",
        success = true,
        "Admin session opened"
    );
    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(serde_json::json!({ "authenticated": true })),
    ))
}

/// Drop the session cookie.
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "authenticated": false })),
    )
}

/// Introspect the current session; 401 without a valid cookie.
pub async fn session_info(session: AdminSession) -> Json<SessionClaims> {
    Json(session.0)
}
