//! # Todo Data Transfer Objects

use crate::model::store::{Todo, TodoStatus};
use lib_utils::format_time;
use serde::{Deserialize, Serialize};

/// Body of `POST /todos/new`. Only `title` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
}

/// Todo as returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInfo {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub created_at: String,
}

impl From<Todo> for TodoInfo {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            status: todo.status,
            user_id: todo.user_id,
            created_at: format_time(todo.created_at),
        }
    }
}

/// Response for `GET /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListResponse {
    pub success: bool,
    pub todos: Vec<TodoInfo>,
}

/// Response for `GET /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    pub success: bool,
    pub todo: TodoInfo,
}

/// Create/update acknowledgement carrying the resulting todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoMessageResponse {
    pub success: bool,
    pub message: String,
    pub todo: TodoInfo,
}

impl TodoMessageResponse {
    pub fn ok(message: impl Into<String>, todo: impl Into<TodoInfo>) -> Self {
        Self {
            success: true,
            message: message.into(),
            todo: todo.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_todo_info_uses_wire_field_names() {
        let now = Utc::now();
        let todo = Todo {
            id: 7,
            title: "buy milk".into(),
            description: String::new(),
            status: TodoStatus::Completed,
            user_id: 2,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(TodoMessageResponse::ok("todo updated successfully", todo)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["todo"]["_id"], 7);
        assert_eq!(json["todo"]["userID"], 2);
        assert_eq!(json["todo"]["status"], "completed");
    }
}
