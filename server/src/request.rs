//! Typed request bodies.
//!
//! Bodies are accepted as raw JSON and converted here, before any store
//! access, into the exact shapes the handlers need. Conversion failures are
//! reported as an [`InvalidInput`] variant, which maps onto a 400 response.

use serde_json::{Map, Value};

use crate::store::{NewTodo, TodoChanges};

const DEFAULT_USER_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("Invalid data provided.")]
    InvalidData,

    #[error("No fields to update provided.")]
    NoFields,
}

/// Body of `POST /todos/add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoRequest {
    pub todo: String,
    pub completed: bool,
    pub user_id: i64,
}

/// Body of `PUT /todos/{id}`. At least one field is present; `todo` may be
/// any string, empty included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    pub todo: Option<String>,
    pub completed: Option<bool>,
}

fn non_empty_text(value: &Value) -> Result<String, InvalidInput> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        _ => Err(InvalidInput::InvalidData),
    }
}

fn text(value: &Value) -> Result<String, InvalidInput> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(InvalidInput::InvalidData),
    }
}

/// Reads a JSON number holding an exact integer in i64 range, so `2.0` is
/// accepted as 2 while `1.5` is rejected.
fn integral_number(value: &Value) -> Result<i64, InvalidInput> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(InvalidInput::InvalidData),
    }
}

/// Converts an update's `completed` value to a boolean.
///
/// Accepts JSON booleans, the integers `0`/`1` and the strings
/// `"false"`/`"true"`. Every other value is rejected.
pub fn coerce_completed(value: &Value) -> Result<bool, InvalidInput> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(InvalidInput::InvalidData),
        },
        Value::String(s) => match s.as_str() {
            "false" => Ok(false),
            "true" => Ok(true),
            _ => Err(InvalidInput::InvalidData),
        },
        Value::Null | Value::Array(_) | Value::Object(_) => Err(InvalidInput::InvalidData),
    }
}

impl TryFrom<Value> for CreateTodoRequest {
    type Error = InvalidInput;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let Some(fields) = body.as_object() else {
            return Err(InvalidInput::InvalidData);
        };

        let todo = fields
            .get("todo")
            .ok_or(InvalidInput::InvalidData)
            .and_then(non_empty_text)?;

        let completed = match fields.get("completed") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err(InvalidInput::InvalidData),
        };

        let user_id = match fields.get("userId") {
            None => DEFAULT_USER_ID,
            Some(v) => integral_number(v)?,
        };

        Ok(Self {
            todo,
            completed,
            user_id,
        })
    }
}

impl TryFrom<Value> for UpdateTodoRequest {
    type Error = InvalidInput;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        let todo = fields.get("todo").map(text).transpose()?;
        let completed = fields.get("completed").map(coerce_completed).transpose()?;

        if todo.is_none() && completed.is_none() {
            return Err(InvalidInput::NoFields);
        }

        Ok(Self { todo, completed })
    }
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            todo: req.todo,
            completed: req.completed,
            user_id: req.user_id,
        }
    }
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            todo: req.todo,
            completed: req.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: Value) -> Result<CreateTodoRequest, InvalidInput> {
        CreateTodoRequest::try_from(body)
    }

    fn update(body: Value) -> Result<UpdateTodoRequest, InvalidInput> {
        UpdateTodoRequest::try_from(body)
    }

    #[test]
    fn create_applies_defaults() {
        let req = create(json!({"todo": "buy milk"})).unwrap();
        assert_eq!(
            req,
            CreateTodoRequest {
                todo: "buy milk".to_string(),
                completed: false,
                user_id: 1,
            }
        );
    }

    #[test]
    fn create_accepts_explicit_fields() {
        let req = create(json!({"todo": "x", "completed": true, "userId": 5})).unwrap();
        assert!(req.completed);
        assert_eq!(req.user_id, 5);

        let req = create(json!({"todo": "x", "userId": 2.0})).unwrap();
        assert_eq!(req.user_id, 2);
    }

    #[test]
    fn create_rejects_missing_or_empty_todo() {
        assert_eq!(create(json!({})), Err(InvalidInput::InvalidData));
        assert_eq!(create(json!({"todo": ""})), Err(InvalidInput::InvalidData));
        assert_eq!(create(json!({"todo": null})), Err(InvalidInput::InvalidData));
        assert_eq!(create(json!({"todo": 42})), Err(InvalidInput::InvalidData));
    }

    #[test]
    fn create_rejects_non_boolean_completed() {
        for completed in [json!("true"), json!(1), json!(null)] {
            let body = json!({"todo": "x", "completed": completed});
            assert_eq!(create(body), Err(InvalidInput::InvalidData));
        }
    }

    #[test]
    fn create_rejects_non_integer_user_id() {
        for user_id in [json!("1"), json!(1.5), json!(1e300), json!(null), json!([1])] {
            let body = json!({"todo": "x", "userId": user_id});
            assert_eq!(create(body), Err(InvalidInput::InvalidData));
        }
    }

    #[test]
    fn create_rejects_non_object_body() {
        assert_eq!(create(json!(["todo"])), Err(InvalidInput::InvalidData));
    }

    #[test]
    fn update_requires_a_field() {
        assert_eq!(update(json!({})), Err(InvalidInput::NoFields));
        assert_eq!(update(json!({"userId": 3})), Err(InvalidInput::NoFields));
        assert_eq!(update(json!("text")), Err(InvalidInput::NoFields));
    }

    #[test]
    fn update_keeps_partial_fields() {
        let req = update(json!({"completed": true})).unwrap();
        assert_eq!(req.todo, None);
        assert_eq!(req.completed, Some(true));

        let req = update(json!({"todo": "renamed"})).unwrap();
        assert_eq!(req.todo.as_deref(), Some("renamed"));
        assert_eq!(req.completed, None);
    }

    #[test]
    fn update_accepts_any_string_todo() {
        let req = update(json!({"todo": ""})).unwrap();
        assert_eq!(req.todo.as_deref(), Some(""));

        assert_eq!(update(json!({"todo": null})), Err(InvalidInput::InvalidData));
        assert_eq!(update(json!({"todo": 42})), Err(InvalidInput::InvalidData));
    }

    #[test]
    fn completed_coercion_table() {
        assert_eq!(coerce_completed(&json!(true)), Ok(true));
        assert_eq!(coerce_completed(&json!(false)), Ok(false));
        assert_eq!(coerce_completed(&json!(1)), Ok(true));
        assert_eq!(coerce_completed(&json!(0)), Ok(false));
        assert_eq!(coerce_completed(&json!("true")), Ok(true));
        assert_eq!(coerce_completed(&json!("false")), Ok(false));

        for rejected in [
            json!(null),
            json!(2),
            json!(0.5),
            json!("yes"),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert_eq!(
                coerce_completed(&rejected),
                Err(InvalidInput::InvalidData),
                "{rejected}"
            );
        }
    }

    #[test]
    fn messages_match_response_text() {
        assert_eq!(InvalidInput::InvalidData.to_string(), "Invalid data provided.");
        assert_eq!(
            InvalidInput::NoFields.to_string(),
            "No fields to update provided."
        );
    }
}
