//! # Centralized Error Handling
//!
//! [`AppError`] is the single error type every operation returns. Each variant maps
//! to one HTTP status and one user-facing message; the detailed text stays in the
//! server log.
//!
//! | Variant | Status | Body `error` |
//! |---|---|---|
//! | [`Validation`](AppError::Validation) | 400 | the validation message |
//! | [`Authentication`](AppError::Authentication) | 403 | `please login` |
//! | [`Authorization`](AppError::Authorization) | 403 | `please login` |
//! | [`NotFound`](AppError::NotFound) | 404 | the message |
//! | [`Conflict`](AppError::Conflict) | 409 | the message |
//! | [`Internal`](AppError::Internal) / [`Config`](AppError::Config) | 500 | `something went wrong` |
//!
//! Authentication and authorization failures are indistinguishable to the caller.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_todo_id(raw: &str) -> Result<i64> {
//!     raw.parse()
//!         .map_err(|_| AppError::Validation("todo id must be an integer".to_string()))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::dto::ErrorResponse;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Message shown for every denied request.
pub const PERMISSION_DENIED_MESSAGE: &str = "please login";

/// Message shown for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "something went wrong";

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration. Fatal at startup.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing request fields.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, invalid or expired session, or a session for an unknown account.
    ///
    /// **HTTP Status**: 403 Forbidden
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authenticated caller does not own the resource.
    ///
    /// **HTTP Status**: 403 Forbidden
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Requested resource or account does not exist.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique email or username already registered.
    ///
    /// **HTTP Status**: 409 Conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store, hashing or signing failure.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) | AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message exposed to the caller.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::Authentication(_) | AppError::Authorization(_) => {
                PERMISSION_DENIED_MESSAGE.to_string()
            }
            AppError::Config(_) | AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        // Full error text goes to the server log only
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!("Server error: {}", self),
            StatusCode::FORBIDDEN => tracing::warn!("Denied: {}", self),
            _ => tracing::debug!("Client error: {}", self),
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("user already exists, please login".to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration error: {}", err))
    }
}

impl From<lib_auth::pwd::Error> for AppError {
    fn from(err: lib_auth::pwd::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<lib_auth::token::Error> for AppError {
    fn from(err: lib_auth::token::Error) -> Self {
        use lib_auth::token::Error as TokenError;

        match err {
            TokenError::MissingSecret | TokenError::Signing(_) => AppError::Internal(err.to_string()),
            TokenError::InvalidSignature | TokenError::Expired | TokenError::Malformed(_) => {
                AppError::Authentication(err.to_string())
            }
        }
    }
}
