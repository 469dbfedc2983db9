//! Request handlers for the `/todos` routes.
//!
//! Each handler validates its input, performs exactly one store operation
//! (plus the read-back for create/update) and serializes the result.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::request::{CreateTodoRequest, InvalidInput, UpdateTodoRequest};
use crate::store::{Store, Todo};

/// Response of `GET /todos`. No pagination is applied; `skip` is always 0
/// and `limit` equals `total`.
#[derive(Debug, Serialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

impl From<Vec<Todo>> for TodoList {
    fn from(todos: Vec<Todo>) -> Self {
        let total = todos.len();
        Self {
            todos,
            total,
            skip: 0,
            limit: total,
        }
    }
}

/// Response of `DELETE /todos/{id}`.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Option<i64>,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

/// Parses the integer prefix of `raw`: optional leading whitespace, an
/// optional sign, then digits. `"12abc"` gives 12; `"abc"` gives `None`.
pub fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected request body");
            Err(InvalidInput::InvalidData.into())
        }
    }
}

pub async fn list_todos(State(store): State<Store>) -> Result<Json<TodoList>, ApiError> {
    let todos = store
        .list()
        .await
        .map_err(ApiError::store("Failed to fetch todos."))?;
    Ok(Json(todos.into()))
}

pub async fn get_todo(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = store
        .get(&id)
        .await
        .map_err(ApiError::store(format!("Failed to fetch todo {id}.")))?;
    todo.map(Json).ok_or(ApiError::NotFound(id))
}

/// `POST /todos/add`. Answers 200 with the persisted row.
pub async fn create_todo(
    State(store): State<Store>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Option<Todo>>, ApiError> {
    let input = CreateTodoRequest::try_from(json_body(body)?)?;

    let todo = store
        .create(input.into())
        .await
        .map_err(ApiError::store("Failed to create todo."))?;
    if let Some(todo) = &todo {
        tracing::debug!(id = todo.id, "created todo");
    }
    Ok(Json(todo))
}

/// `PUT /todos/{id}`. An id matching no row still answers 200, with the
/// JSON body `null` (the `None` arm of `Option<Todo>`) rather than an empty
/// body.
pub async fn update_todo(
    State(store): State<Store>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Option<Todo>>, ApiError> {
    let input = UpdateTodoRequest::try_from(json_body(body)?)?;

    let todo = store
        .update(&id, input.into())
        .await
        .map_err(ApiError::store(format!("Failed to update todo {id}.")))?;
    Ok(Json(todo))
}

/// `DELETE /todos/{id}`. Reports success whether or not a row matched.
pub async fn delete_todo(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let removed = store
        .delete(&id)
        .await
        .map_err(ApiError::store(format!("Failed to delete todo {id}.")))?;
    tracing::debug!(%id, removed, "deleted todo");

    Ok(Json(Deleted {
        id: leading_integer(&id),
        is_deleted: true,
    }))
}
