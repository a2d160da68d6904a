//! # Todo Handlers
//!
//! Every route here sits behind the auth gate and receives the caller as a
//! [`CurrentUser`]. Listing and creating are scoped to the caller directly;
//! single-todo routes go through [`services::todos`](crate::services::todos),
//! which answers 404 for an unknown id and 403 for someone else's todo.

use crate::extract::{parse_todo_id, CurrentUser, JsonBody};
use crate::services::todos;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lib_core::dto::{CreateTodoRequest, MessageResponse, TodoListResponse, TodoMessageResponse, TodoResponse};
use lib_core::model::store::DynTodoStore;
use lib_core::{AppError, Result};
use lib_utils::validate_not_empty;
use tracing::{info, instrument};

/// List the caller's todos, newest first.
#[instrument(skip_all, fields(user_id = current.id))]
pub async fn list_todos(
    State(store): State<DynTodoStore>,
    current: CurrentUser,
) -> Result<Json<TodoListResponse>> {
    let items = store.list_by_owner(current.id).await?;

    Ok(Json(TodoListResponse {
        success: true,
        todos: items.into_iter().map(Into::into).collect(),
    }))
}

/// Create a todo owned by the caller. Title is required, description is optional.
#[instrument(skip_all, fields(user_id = current.id))]
pub async fn create_todo(
    State(store): State<DynTodoStore>,
    current: CurrentUser,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoMessageResponse>)> {
    validate_not_empty(&req.title, "title").map_err(AppError::Validation)?;

    let todo = todos::create_for(store.as_ref(), req.title, req.description, current.id).await?;
    info!("[TODO] {} created todo {}", current.username, todo.id);

    Ok((
        StatusCode::CREATED,
        Json(TodoMessageResponse::ok("todo created successfully", todo)),
    ))
}

/// Fetch one todo the caller owns.
#[instrument(skip_all, fields(user_id = current.id, todo_id = %raw_id))]
pub async fn get_todo(
    State(store): State<DynTodoStore>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<TodoResponse>> {
    let todo_id = parse_todo_id(&raw_id)?;
    let todo = todos::load_owned(store.as_ref(), todo_id, current.id).await?;

    Ok(Json(TodoResponse {
        success: true,
        todo: todo.into(),
    }))
}

/// Toggle the status of a todo the caller owns.
#[instrument(skip_all, fields(user_id = current.id, todo_id = %raw_id))]
pub async fn update_todo(
    State(store): State<DynTodoStore>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<TodoMessageResponse>> {
    let todo_id = parse_todo_id(&raw_id)?;
    let todo = todos::toggle_owned(store.as_ref(), todo_id, current.id).await?;
    info!("[TODO] {} set todo {} to {}", current.username, todo.id, todo.status);

    Ok(Json(TodoMessageResponse::ok("todo updated successfully", todo)))
}

/// Delete a todo the caller owns.
#[instrument(skip_all, fields(user_id = current.id, todo_id = %raw_id))]
pub async fn delete_todo(
    State(store): State<DynTodoStore>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let todo_id = parse_todo_id(&raw_id)?;
    todos::delete_owned(store.as_ref(), todo_id, current.id).await?;
    info!("[TODO] {} deleted todo {}", current.username, todo_id);

    Ok(Json(MessageResponse::ok("todo deleted successfully")))
}
