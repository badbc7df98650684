//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the conversion from the
//! core error keeps the store boundary's single user-facing message string
//! (no structured error codes, no retry guidance).

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// API-level error, rendered as a JSON `{"error": ...}` envelope.
#[derive(Debug)]
pub enum ApiError {
    Store(roster_core::Error),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    RateLimited,
}

impl From<roster_core::Error> for ApiError {
    fn from(err: roster_core::Error) -> Self {
        match &err {
            roster_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            roster_core::Error::RowOutOfRange { .. } => ApiError::NotFound(err.to_string()),
            roster_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            roster_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg.clone()),
            roster_core::Error::Forbidden(msg) => ApiError::Forbidden(msg.clone()),
            _ => ApiError::Store(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Store(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many attempts, try again later".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_out_of_range_maps_to_not_found() {
        let err: ApiError = roster_core::Error::RowOutOfRange {
            table: "Generus".to_string(),
            position: 42,
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_sheets_error_maps_to_store() {
        let err: ApiError = roster_core::Error::Sheets("status 500".to_string()).into();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
