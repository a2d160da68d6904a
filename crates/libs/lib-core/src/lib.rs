//! # Core Library
//!
//! Configuration, error taxonomy, data model, store contracts and DTOs.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::{Config, EnvMode};
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool, TodoStore, UserStore};
