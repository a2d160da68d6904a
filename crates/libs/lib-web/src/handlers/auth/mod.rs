//! # Authentication Handlers
//!
//! HTTP request handlers for account and session endpoints.
//!
//! ## Overview
//!
//! - Registration with first/last name, username, email and password
//! - Login with email or username
//! - Session token issuing into the `token` cookie
//! - Logout (cookie cleared, token not revoked)
//! - Profile of the authenticated caller
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//!
//! let app = Router::new()
//!     .route("/register", post(register))
//!     .route("/login", post(login))
//!     .with_state(state);
//! ```

use crate::extract::{CurrentUser, JsonBody};
use crate::session::{clear_session_cookie, set_session_cookie};
use axum::{extract::State, http::StatusCode, Json};
use lib_auth::{encode_token, hash_password, verify_password};
use lib_core::dto::{LoginRequest, MessageResponse, ProfileResponse, RegisterRequest};
use lib_core::model::store::{DynUserStore, UserForCreate};
use lib_core::{AppError, Config, Result};
use lib_utils::{validate_email, validate_length_range, validate_not_empty};
use tower_cookies::Cookies;
use tracing::{debug, info, instrument, warn};

const PASSWORD_MIN_LEN: usize = 6;
const PASSWORD_MAX_LEN: usize = 12;

/// Welcome message served on `/register-root`.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::ok("welcome to the todo api"))
}

fn validate_register(req: &RegisterRequest) -> std::result::Result<(), String> {
    validate_not_empty(&req.first_name, "first_name")?;
    validate_not_empty(&req.last_name, "last_name")?;
    validate_not_empty(&req.username, "username")?;
    validate_not_empty(&req.email, "email")?;
    validate_not_empty(&req.password, "password")?;
    validate_email(&req.email)?;
    validate_length_range(&req.password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN, "password")
}

/// Register handler - creates a new account and starts a session.
///
/// # Returns
///
/// * `201` with `"user created successfully"` and the session cookie set
/// * `400` for missing fields, a malformed email or a password outside 6-12 characters
/// * `409` when the email or username is already registered
///
/// Uniqueness is checked up front for a clear log line; the unique indexes still
/// decide when two registrations race.
#[instrument(skip_all, fields(username = %req.username, email = %req.email))]
pub async fn register(
    State(users): State<DynUserStore>,
    State(config): State<Config>,
    cookies: Cookies,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    info!("[REGISTER] New registration request");

    validate_register(&req).map_err(|msg| {
        warn!("[REGISTER] Rejected: {}", msg);
        AppError::Validation(msg)
    })?;

    if users.find_by_email(&req.email).await?.is_some()
        || users.find_by_username(&req.username).await?.is_some()
    {
        warn!("[REGISTER] Email or username already registered");
        return Err(AppError::Conflict("user already exists, please login".to_string()));
    }

    debug!("[REGISTER] Hashing password...");
    let password_hash = hash_password(&req.password)?;

    let user = users
        .create(UserForCreate::new(req.username, req.email, password_hash).names(req.first_name, req.last_name))
        .await?;

    let token = encode_token(user.id, &config.jwt_secret, config.token_ttl())?;
    set_session_cookie(&cookies, token, &config);

    info!("[REGISTER] User created: {} (id: {})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(MessageResponse::ok("user created successfully"))))
}

/// Login handler - verifies credentials and starts a session.
///
/// `email_or_username` is matched against both columns.
///
/// # Returns
///
/// * `200` with `"welcome back <username>"` and the session cookie set
/// * `400` for missing fields or a wrong password
/// * `404` when no account matches
#[instrument(skip_all, fields(login = %req.email_or_username))]
pub async fn login(
    State(users): State<DynUserStore>,
    State(config): State<Config>,
    cookies: Cookies,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<MessageResponse>> {
    info!("[LOGIN] Login attempt");

    validate_not_empty(&req.email_or_username, "email_or_username")
        .and_then(|_| validate_not_empty(&req.password, "password"))
        .map_err(AppError::Validation)?;

    let user = users.find_by_login(&req.email_or_username).await?.ok_or_else(|| {
        warn!("[LOGIN] No account for: {}", req.email_or_username);
        AppError::NotFound("user not found, please register".to_string())
    })?;

    if !verify_password(&req.password, &user.password_hash)? {
        warn!("[LOGIN] Invalid password for user: {}", user.username);
        return Err(AppError::Validation("invalid password".to_string()));
    }

    let token = encode_token(user.id, &config.jwt_secret, config.token_ttl())?;
    set_session_cookie(&cookies, token, &config);

    info!("[LOGIN] Login successful: {} (id: {})", user.username, user.id);
    Ok(Json(MessageResponse::ok(format!("welcome back {}", user.username))))
}

/// Logout handler - expires the session cookie.
///
/// The token is stateless; a copy captured before logout stays valid until it
/// expires on its own.
pub async fn logout(State(config): State<Config>, cookies: Cookies) -> Json<MessageResponse> {
    clear_session_cookie(&cookies, &config);
    debug!("[LOGOUT] Session cookie cleared");
    Json(MessageResponse::ok("successfully logged out"))
}

/// Profile of the authenticated caller.
pub async fn me(
    State(users): State<DynUserStore>,
    current: CurrentUser,
) -> Result<Json<ProfileResponse>> {
    let user = users
        .find_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests;
