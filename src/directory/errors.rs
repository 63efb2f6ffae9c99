//! # Directory Errors
//!
//! Error types for the user directory module.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// User directory errors
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    // ==================
    // Validation Errors (400)
    // ==================
    /// One or more required fields is absent or empty
    #[error("Missing required fields: name, email, role")]
    MissingFields,

    /// Email does not match the accepted pattern
    #[error("Invalid email format")]
    InvalidEmail,

    /// Search requested without a search term
    #[error("Search term must not be empty")]
    EmptySearchTerm,

    /// Limit parameter is not a positive integer
    #[error("Limit must be a positive integer")]
    InvalidLimit(String),

    // ==================
    // Not Found (404)
    // ==================
    /// No record carries the requested id
    #[error("User not found")]
    UserNotFound,

    // ==================
    // Conflict (409)
    // ==================
    /// Email already belongs to a record
    #[error("Email already in use")]
    EmailTaken(String),

    // ==================
    // Server Errors (500)
    // ==================
    /// Storage operation failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DirectoryError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            DirectoryError::MissingFields => StatusCode::BAD_REQUEST,
            DirectoryError::InvalidEmail => StatusCode::BAD_REQUEST,
            DirectoryError::EmptySearchTerm => StatusCode::BAD_REQUEST,
            DirectoryError::InvalidLimit(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            DirectoryError::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            DirectoryError::EmailTaken(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            DirectoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns whether this error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
