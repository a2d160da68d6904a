//! # Session Cookie
//!
//! The session token travels in an HTTP-only cookie named `token`.
//!
//! | Mode | `Secure` | `SameSite` |
//! |---|---|---|
//! | development | no | `Lax` |
//! | production | yes | `None` |
//!
//! Logging out overwrites the cookie with an empty, already-expired one. The
//! token itself is not revoked and stays valid until its own expiry.

use lib_core::Config;
use time::{Duration, OffsetDateTime};
use tower_cookies::cookie::{CookieBuilder, SameSite};
use tower_cookies::{Cookie, Cookies};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

fn base_cookie(value: String, config: &Config) -> CookieBuilder<'static> {
    let builder = Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .path("/");

    if config.env_mode.is_development() {
        builder.secure(false).same_site(SameSite::Lax)
    } else {
        builder.secure(true).same_site(SameSite::None)
    }
}

/// Store a freshly issued token in the session cookie for the token lifetime.
pub fn set_session_cookie(cookies: &Cookies, token: String, config: &Config) {
    let lifetime = Duration::minutes(config.token_ttl_minutes);
    let cookie = base_cookie(token, config)
        .max_age(lifetime)
        .expires(OffsetDateTime::now_utc() + lifetime)
        .build();

    cookies.add(cookie);
}

/// Overwrite the session cookie with an empty value that expired at the epoch.
pub fn clear_session_cookie(cookies: &Cookies, config: &Config) {
    let cookie = base_cookie(String::new(), config)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build();

    cookies.add(cookie);
}

/// Session token from the request cookie. An empty value counts as absent.
pub fn session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
