//! # In-Memory Stores
//!
//! `UserStore` and `TodoStore` over maps behind an async `RwLock`. Same contract
//! as the SQLite repositories, including uniqueness and not-found behavior.

use super::models::{Todo, TodoForCreate, TodoStatus, User, UserForCreate};
use super::{TodoStore, UserStore};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Table<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_login(&self, email_or_username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        let by_email = users.rows.values().find(|u| u.email == email_or_username);
        let found = by_email.or_else(|| users.rows.values().find(|u| u.username == email_or_username));
        Ok(found.cloned())
    }

    async fn create(&self, user: UserForCreate) -> Result<User> {
        let mut users = self.users.write().await;

        let taken = users
            .rows
            .values()
            .any(|u| u.email == user.email || u.username == user.username);
        if taken {
            return Err(AppError::Conflict("user already exists, please login".to_string()));
        }

        let now = Utc::now();
        let record = User {
            id: users.allocate_id(),
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.rows.insert(record.id, record.clone());

        Ok(record)
    }
}

/// In-memory todo store.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Table<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, todo: TodoForCreate) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        let now = Utc::now();
        let record = Todo {
            id: todos.allocate_id(),
            title: todo.title,
            description: todo.description,
            status: TodoStatus::Pending,
            user_id: todo.user_id,
            created_at: now,
            updated_at: now,
        };
        todos.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Todo>> {
        let todos = self.todos.read().await;
        // Ids grow monotonically, so reverse id order is newest first.
        Ok(todos
            .rows
            .values()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>> {
        Ok(self.todos.read().await.rows.get(&id).cloned())
    }

    async fn toggle_status(&self, id: i64) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("todo not found".to_string()))?;

        todo.status = todo.status.toggle();
        todo.updated_at = Utc::now();

        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.todos
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("todo not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_uniqueness() {
        let users = MemoryUserStore::new();
        let alice = users
            .create(UserForCreate::new("alice".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();

        let dup = users
            .create(UserForCreate::new("other".into(), "a@x.com".into(), "h".into()))
            .await;

        assert_eq!(alice.id, 1);
        assert!(matches!(dup, Err(AppError::Conflict(_))));
        assert_eq!(users.find_by_login("alice").await.unwrap().map(|u| u.id), Some(1));
        assert!(users.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let todos = MemoryTodoStore::new();
        let first = todos.create(TodoForCreate::new("first".into(), String::new(), 1)).await.unwrap();
        let second = todos.create(TodoForCreate::new("second".into(), String::new(), 1)).await.unwrap();
        todos.create(TodoForCreate::new("theirs".into(), String::new(), 2)).await.unwrap();

        let listed = todos.list_by_owner(1).await.unwrap();
        assert_eq!(listed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        assert_eq!(todos.toggle_status(first.id).await.unwrap().status, TodoStatus::Completed);
        assert_eq!(todos.toggle_status(first.id).await.unwrap().status, TodoStatus::Pending);

        todos.delete(first.id).await.unwrap();
        assert!(todos.find_by_id(first.id).await.unwrap().is_none());
        assert!(matches!(todos.delete(first.id).await, Err(AppError::NotFound(_))));
    }
}
