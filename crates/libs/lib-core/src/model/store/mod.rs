//! # Stores
//!
//! Capability traits for the credential and todo stores, with a SQLite
//! implementation for production and an in-memory one for tests.
//!
//! Single-item lookups return `Option`. An id that matches no row is `None`
//! everywhere; callers turn that into a not-found or permission error.

// region: --- Modules
pub mod memory;
pub mod models;
pub mod todo_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use memory::{MemoryTodoStore, MemoryUserStore};
pub use models::{Todo, TodoForCreate, TodoStatus, User, UserForCreate};
pub use todo_repository::TodoRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Shared handle to any user store.
pub type DynUserStore = Arc<dyn UserStore>;

/// Shared handle to any todo store.
pub type DynTodoStore = Arc<dyn TodoStore>;

/// Credential store. Owns identity generation and email/username uniqueness.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up by email or username, whichever matches.
    async fn find_by_login(&self, email_or_username: &str) -> Result<Option<User>>;

    /// Insert a user. A duplicate email or username is `AppError::Conflict`.
    async fn create(&self, user: UserForCreate) -> Result<User>;
}

/// Todo store. Performs no ownership checks of its own.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a `pending` todo.
    async fn create(&self, todo: TodoForCreate) -> Result<Todo>;

    /// All todos owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Todo>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>>;

    /// Flip the status and return the updated todo. Unknown id is `AppError::NotFound`.
    ///
    /// Reads the current status and writes its opposite in two steps; concurrent
    /// toggles of the same todo are not serialized.
    async fn toggle_status(&self, id: i64) -> Result<Todo>;

    /// Delete a todo. Unknown id is `AppError::NotFound`.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Create a SQLite connection pool, creating the database file if missing.
///
/// In-memory databases are per-connection in SQLite, so they get a single
/// connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_options.connect_with(options).await?;

    Ok(pool)
}

/// Apply all pending migrations found in `migrations_path`.
pub async fn run_migrations(pool: &DbPool, migrations_path: &Path) -> Result<()> {
    let migrator = Migrator::new(migrations_path).await?;
    migrator.run(pool).await?;
    Ok(())
}
// endregion: --- Types and Functions
