//! # Web Library
//!
//! HTTP surface of the todo backend: session cookies, the authentication gate,
//! handlers, the ownership-checking todo service and server startup.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use server::{create_router, start_server, AppState, ServerConfig};
