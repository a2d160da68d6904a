//! # Todo Repository
//!
//! SQLite implementation of [`TodoStore`] over the `todos` table.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, TodoForCreate, TodoRepository, TodoStore};
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite:data/todo.db").await?;
//! let todos = TodoRepository::new(pool);
//!
//! let todo = todos
//!     .create(TodoForCreate::new("buy milk".to_string(), String::new(), 1))
//!     .await?;
//! let toggled = todos.toggle_status(todo.id).await?;
//! println!("{} is now {}", toggled.title, toggled.status);
//! # Ok(())
//! # }
//! ```

use super::models::{Todo, TodoForCreate, TodoStatus};
use super::{DbPool, TodoStore};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::query_as;

/// Todo repository backed by the `todos` table.
#[derive(Clone)]
pub struct TodoRepository {
    pool: DbPool,
}

impl TodoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<Option<Todo>> {
        let todo = query_as::<_, Todo>("SELECT * FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(todo)
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn create(&self, todo: TodoForCreate) -> Result<Todo> {
        let result = sqlx::query(
            "INSERT INTO todos (title, description, status, user_id) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(todo.title)
        .bind(todo.description)
        .bind(TodoStatus::Pending.to_string())
        .bind(todo.user_id)
        .execute(&self.pool)
        .await?;

        let todo = query_as::<_, Todo>("SELECT * FROM todos WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Todo>> {
        let todos = query_as::<_, Todo>(
            "SELECT * FROM todos WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>> {
        self.fetch(id).await
    }

    async fn toggle_status(&self, id: i64) -> Result<Todo> {
        let current: Option<(String,)> = query_as("SELECT status FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let current = match current {
            Some((status,)) => status.parse::<TodoStatus>().map_err(AppError::Internal)?,
            None => return Err(AppError::NotFound("todo not found".to_string())),
        };

        // Not atomic with the read above: a concurrent toggle can interleave.
        sqlx::query("UPDATE todos SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(current.toggle().to_string())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound("todo not found".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("todo not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::test_support::migrated_pool;
    use crate::model::store::{UserForCreate, UserRepository, UserStore};

    async fn setup() -> (TodoRepository, i64, i64) {
        let pool = migrated_pool().await;
        let users = UserRepository::new(pool.clone());
        let alice = users
            .create(UserForCreate::new("alice".into(), "a@x.com".into(), "hash".into()))
            .await
            .unwrap();
        let bob = users
            .create(UserForCreate::new("bob".into(), "b@x.com".into(), "hash".into()))
            .await
            .unwrap();
        (TodoRepository::new(pool), alice.id, bob.id)
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let (todos, alice, _) = setup().await;

        let todo = todos
            .create(TodoForCreate::new("buy milk".into(), "2 litres".into(), alice))
            .await
            .expect("Todo creation should succeed");

        assert_eq!(todo.status, TodoStatus::Pending);
        assert_eq!(todo.user_id, alice);
        assert_eq!(todo.description, "2 litres");
        assert_eq!(todos.find_by_id(todo.id).await.unwrap(), Some(todo));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let (todos, alice, bob) = setup().await;
        todos.create(TodoForCreate::new("a1".into(), String::new(), alice)).await.unwrap();
        todos.create(TodoForCreate::new("a2".into(), String::new(), alice)).await.unwrap();
        todos.create(TodoForCreate::new("b1".into(), String::new(), bob)).await.unwrap();

        let alice_todos = todos.list_by_owner(alice).await.unwrap();

        assert_eq!(alice_todos.len(), 2);
        assert!(alice_todos.iter().all(|t| t.user_id == alice));
        assert_eq!(alice_todos[0].title, "a2");
        assert_eq!(todos.list_by_owner(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_twice_returns_to_pending() {
        let (todos, alice, _) = setup().await;
        let todo = todos.create(TodoForCreate::new("t".into(), String::new(), alice)).await.unwrap();

        let once = todos.toggle_status(todo.id).await.unwrap();
        let twice = todos.toggle_status(todo.id).await.unwrap();

        assert_eq!(once.status, TodoStatus::Completed);
        assert_eq!(twice.status, TodoStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_id_is_explicitly_not_found() {
        let (todos, _, _) = setup().await;

        assert_eq!(todos.find_by_id(0).await.unwrap(), None);
        assert!(matches!(todos.toggle_status(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(todos.delete(42).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (todos, alice, _) = setup().await;
        let todo = todos.create(TodoForCreate::new("t".into(), String::new(), alice)).await.unwrap();

        todos.delete(todo.id).await.unwrap();

        assert_eq!(todos.find_by_id(todo.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_todo_requires_existing_owner() {
        let (todos, _, _) = setup().await;

        let orphan = todos.create(TodoForCreate::new("t".into(), String::new(), 999)).await;

        assert!(orphan.is_err());
    }
}
