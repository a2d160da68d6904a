//! # Data Transfer Objects (DTOs)
//!
//! JSON request and response bodies for the REST API. Every response carries a
//! `success` flag; failures carry `error` instead of a payload.

pub mod auth;
pub mod todo;

pub use auth::*;
pub use todo::*;

use serde::{Deserialize, Serialize};

/// `{ "success": true, "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{ "success": false, "error": ... }`, the shape every `AppError` renders to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
