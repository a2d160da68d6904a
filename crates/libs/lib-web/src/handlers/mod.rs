//! # Handlers
//!
//! - **[`auth`]**: register, login, logout, profile and the welcome route
//! - **[`todos`]**: owner-scoped todo CRUD

pub mod auth;
pub mod todos;
