//! # Authentication Middleware
//!
//! The gate in front of every protected route. It runs these steps and stops at
//! the first failure:
//!
//! 1. read the `token` session cookie
//! 2. verify the token signature (HS256 only) and expiry
//! 3. resolve the user id to a live account in the [`UserStore`](lib_core::UserStore)
//! 4. insert [`CurrentUser`] into the request extensions
//!
//! Every failure renders the same 403 `please login` response; the concrete reason
//! is only logged. Ownership of individual todos is checked later, in
//! [`services::todos`](crate::services::todos), once the todo is loaded.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/me", get(handlers::auth::me))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use crate::extract::CurrentUser;
use crate::server::AppState;
use crate::session::session_token;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use lib_auth::verify_session;
use lib_core::{AppError, Result};
use tower_cookies::Cookies;
use tracing::{debug, warn};

/// Authentication middleware that validates the session cookie.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = session_token(&cookies).ok_or_else(|| {
        warn!("[AUTH] Missing session cookie");
        AppError::Authentication("missing session cookie".to_string())
    })?;

    let user_id = verify_session(&token, &state.config.jwt_secret).map_err(|e| {
        warn!("[AUTH] Token rejected: {}", e);
        AppError::from(e)
    })?;

    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        warn!("[AUTH] Token for unknown account: {}", user_id);
        AppError::Authentication(format!("no account with id {}", user_id))
    })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", user.username, user.id);

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}
