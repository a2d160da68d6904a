//! # Todo Ownership
//!
//! Every single-todo operation goes through [`load_owned`]: the todo is looked up
//! first (unknown id is `NotFound`), then its owner is compared with the caller
//! (mismatch is `Authorization`). A todo that fails the check is never modified.

use lib_core::model::store::{Todo, TodoForCreate};
use lib_core::{AppError, Result, TodoStore};
use tracing::{debug, warn};

/// Load a todo the caller owns.
pub async fn load_owned(todos: &dyn TodoStore, todo_id: i64, user_id: i64) -> Result<Todo> {
    let todo = todos
        .find_by_id(todo_id)
        .await?
        .ok_or_else(|| AppError::NotFound("todo not found".to_string()))?;

    if !todo.is_owned_by(user_id) {
        warn!(
            "[TODO] User {} denied access to todo {} (owner {})",
            user_id, todo_id, todo.user_id
        );
        return Err(AppError::Authorization(format!(
            "user {} does not own todo {}",
            user_id, todo_id
        )));
    }

    Ok(todo)
}

/// Create a todo owned by `user_id`.
pub async fn create_for(todos: &dyn TodoStore, title: String, description: String, user_id: i64) -> Result<Todo> {
    let todo = todos.create(TodoForCreate::new(title, description, user_id)).await?;
    debug!("[TODO] Created todo {} for user {}", todo.id, user_id);
    Ok(todo)
}

/// Flip the status of a todo the caller owns.
pub async fn toggle_owned(todos: &dyn TodoStore, todo_id: i64, user_id: i64) -> Result<Todo> {
    load_owned(todos, todo_id, user_id).await?;
    let todo = todos.toggle_status(todo_id).await?;
    debug!("[TODO] Todo {} is now {}", todo.id, todo.status);
    Ok(todo)
}

/// Delete a todo the caller owns.
pub async fn delete_owned(todos: &dyn TodoStore, todo_id: i64, user_id: i64) -> Result<()> {
    load_owned(todos, todo_id, user_id).await?;
    todos.delete(todo_id).await?;
    debug!("[TODO] Deleted todo {}", todo_id);
    Ok(())
}
