//! # User Repository
//!
//! SQLite implementation of [`UserStore`].
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, UserForCreate, UserRepository, UserStore};
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite:data/todo.db").await?;
//! let users = UserRepository::new(pool);
//!
//! let user = users
//!     .create(UserForCreate::new(
//!         "alice".to_string(),
//!         "alice@example.com".to_string(),
//!         "argon2-hash".to_string(),
//!     ))
//!     .await?;
//!
//! let found = users.find_by_login("alice@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::{DbPool, UserStore};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::query_as;

/// User repository backed by the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// An email match wins over a username match.
    async fn find_by_login(&self, email_or_username: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>(
            "SELECT * FROM users WHERE email = ?1 OR username = ?1 ORDER BY (email = ?1) DESC LIMIT 1",
        )
        .bind(email_or_username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// # Errors
    ///
    /// - `AppError::Conflict` if the email or username is taken (UNIQUE constraint)
    /// - `AppError::Internal` on any other database failure
    async fn create(&self, user: UserForCreate) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, username, email, password_hash) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::model::store::test_support::migrated_pool;

    fn alice() -> UserForCreate {
        UserForCreate::new("alice".into(), "a@x.com".into(), "hash".into())
            .names("Alice".into(), "Liddell".into())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let users = UserRepository::new(migrated_pool().await);

        let created = users.create(alice()).await.expect("User creation should succeed");

        assert!(created.id > 0);
        assert_eq!(created.first_name, "Alice");
        assert_eq!(users.find_by_id(created.id).await.unwrap().unwrap().email, "a@x.com");
        assert_eq!(users.find_by_email("a@x.com").await.unwrap().unwrap().id, created.id);
        assert_eq!(users.find_by_username("alice").await.unwrap().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_login_accepts_email_or_username() {
        let users = UserRepository::new(migrated_pool().await);
        let created = users.create(alice()).await.unwrap();

        assert_eq!(users.find_by_login("a@x.com").await.unwrap().map(|u| u.id), Some(created.id));
        assert_eq!(users.find_by_login("alice").await.unwrap().map(|u| u.id), Some(created.id));
        assert!(users.find_by_login("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let users = UserRepository::new(migrated_pool().await);

        assert!(users.find_by_id(0).await.unwrap().is_none());
        assert!(users.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_or_username_is_conflict() {
        let users = UserRepository::new(migrated_pool().await);
        users.create(alice()).await.unwrap();

        let same_email = UserForCreate::new("alice2".into(), "a@x.com".into(), "hash".into());
        let same_username = UserForCreate::new("alice".into(), "other@x.com".into(), "hash".into());

        assert!(matches!(users.create(same_email).await, Err(AppError::Conflict(_))));
        assert!(matches!(users.create(same_username).await, Err(AppError::Conflict(_))));
        assert!(users.find_by_username("alice2").await.unwrap().is_none());
    }
}
