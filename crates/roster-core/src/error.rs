//! Error types for the roster system.

use thiserror::Error;

/// Result type alias using the roster Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for roster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Spreadsheet backend call failed (HTTP status, malformed response, auth).
    #[error("Sheets error: {0}")]
    Sheets(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row position outside the data range of a table
    #[error("Row {position} out of range in table '{table}'")]
    RowOutOfRange { table: String, position: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (authenticated but not allowed)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_sheets() {
        let err = Error::Sheets("status 403".to_string());
        assert_eq!(err.to_string(), "Sheets error: status 403");
    }

    #[test]
    fn test_error_display_row_out_of_range() {
        let err = Error::RowOutOfRange {
            table: "Generus".to_string(),
            position: 99,
        };
        assert_eq!(err.to_string(), "Row 99 out of range in table 'Generus'");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("invalid credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid credentials");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
