use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must already be hashed.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            username,
            email,
            password_hash,
        }
    }

    /// Set first and last name.
    pub fn names(mut self, first_name: String, last_name: String) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }
}

/// Todo completion state. The only transition is [`TodoStatus::toggle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
}

impl TodoStatus {
    /// The opposite state.
    pub fn toggle(self) -> Self {
        match self {
            TodoStatus::Pending => TodoStatus::Completed,
            TodoStatus::Completed => TodoStatus::Pending,
        }
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoStatus::Pending => write!(f, "pending"),
            TodoStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TodoStatus::Pending),
            "completed" => Ok(TodoStatus::Completed),
            _ => Err(format!("Invalid todo status: {}", s)),
        }
    }
}

impl TryFrom<String> for TodoStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Todo entity. `user_id` is the owner of record.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TodoStatus,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Whether `user_id` is the owner of this todo.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Data structure for creating a new todo. New todos always start `pending`.
#[derive(Debug, Clone)]
pub struct TodoForCreate {
    pub title: String,
    pub description: String,
    pub user_id: i64,
}

impl TodoForCreate {
    pub fn new(title: String, description: String, user_id: i64) -> Self {
        Self {
            title,
            description,
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_status() {
        for status in [TodoStatus::Pending, TodoStatus::Completed] {
            assert_ne!(status.toggle(), status);
            assert_eq!(status.toggle().toggle(), status);
        }
    }

    #[test]
    fn test_status_text_form() {
        assert_eq!(TodoStatus::Pending.to_string(), "pending");
        assert_eq!("COMPLETED".parse::<TodoStatus>(), Ok(TodoStatus::Completed));
        assert!(TodoStatus::try_from("done".to_string()).is_err());
        assert_eq!(TodoStatus::default(), TodoStatus::Pending);
    }
}
