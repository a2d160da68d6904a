//! # Extractors
//!
//! - [`CurrentUser`]: the identity resolved by the auth gate, taken as a handler parameter
//! - [`JsonBody`]: `Json<T>` whose rejection renders as a validation error envelope
//! - [`parse_todo_id`]: path segment to todo id

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;
use lib_core::{AppError, Result};
use serde::de::DeserializeOwned;

/// Authenticated caller, inserted into request extensions by
/// [`require_auth`](crate::middleware::require_auth).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Authentication("route is not behind the auth gate".to_string()))
    }
}

/// JSON request body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        Ok(JsonBody(value))
    }
}

/// Parse a todo id from its path segment.
pub fn parse_todo_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("todoID must be an integer, got {:?}", raw)))
}
