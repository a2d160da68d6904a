//! # Account Data Transfer Objects
//!
//! Bodies for `/register`, `/login` and `/me`.
//!
//! ```text
//! POST /api/v1/register
//! {
//!   "first_name": "Alice",
//!   "last_name": "Liddell",
//!   "username": "alice",
//!   "email": "a@x.com",
//!   "password": "secret1"
//! }
//!
//! POST /api/v1/login
//! { "email_or_username": "alice", "password": "secret1" }
//! ```
//!
//! Request fields default to empty so that a missing field surfaces as a
//! validation message (`"username is required"`) rather than a JSON parse error.

use crate::model::store::User;
use lib_utils::format_time;
use serde::{Deserialize, Serialize};

/// Registration request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request with email or username.
///
/// `text` is accepted as an alias of `email_or_username` for older clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(alias = "text")]
    pub email_or_username: String,
    pub password: String,
}

/// Public profile. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            created_at: format_time(user.created_at),
        }
    }
}

/// Response for `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserInfo,
}
