//! SQLite-backed storage for todo items.
//!
//! # Design
//! A `Store` wraps a single `tokio_rusqlite::Connection` opened at startup:
//! one background thread owns the `rusqlite` connection and every request
//! is funneled through it. Conflicting writes are serialized by SQLite, not
//! by this crate.
//!
//! Identifiers coming from request paths are bound as text. The `id` column
//! is an `INTEGER PRIMARY KEY`, so SQLite's affinity rules coerce `'7'` to
//! `7` during comparison and anything non-numeric simply matches no row.

use std::{path::Path, sync::Arc};

use rusqlite::{params, params_from_iter, types::Value, OptionalExtension, Row};
use serde::Serialize;
use tokio_rusqlite::Connection;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    todo TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    userId INTEGER NOT NULL DEFAULT 1
);
"#;

const SELECT_ALL: &str = "SELECT id, todo, completed, userId FROM todos ORDER BY id DESC";

const SELECT_BY_ID: &str = "SELECT id, todo, completed, userId FROM todos WHERE id = ?1";

const INSERT: &str = "INSERT INTO todos (todo, completed, userId) VALUES (?1, ?2, ?3)";

const DELETE_BY_ID: &str = "DELETE FROM todos WHERE id = ?1";

/// A persisted todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Fields for a row about to be inserted. The id is assigned by SQLite.
#[derive(Clone, Debug)]
pub struct NewTodo {
    pub todo: String,
    pub completed: bool,
    pub user_id: i64,
}

/// A partial update. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct TodoChanges {
    pub todo: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] tokio_rusqlite::Error),

    /// The database could not be opened at startup.
    #[error("database unavailable: {0}")]
    Unavailable(Arc<str>),

    #[error("no fields to update")]
    EmptyUpdate,
}

/// Cloneable handle to the todo table.
#[derive(Clone)]
pub struct Store {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Sqlite(Connection),
    Unavailable(Arc<str>),
}

fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        todo: row.get(1)?,
        completed: row.get(2)?,
        user_id: row.get(3)?,
    })
}

fn select_by_id(
    conn: &rusqlite::Connection,
    id: Value,
) -> Result<Option<Todo>, tokio_rusqlite::Error> {
    conn.query_row(SELECT_BY_ID, [id], row_to_todo)
        .optional()
        .map_err(wrap_err)
}

impl Store {
    /// Opens (creating if needed) the database file and ensures the schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).await?;
        Self::init(conn).await
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    /// A store whose every operation fails with [`StoreError::Unavailable`].
    ///
    /// Lets the server keep listening after the database failed to open, so
    /// the failure surfaces as a 500 on each request.
    pub fn unavailable(reason: impl Into<Arc<str>>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    async fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| conn.execute_batch(CREATE_TABLE).map_err(wrap_err))
            .await?;
        Ok(Self {
            backend: Backend::Sqlite(conn),
        })
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        match &self.backend {
            Backend::Sqlite(conn) => Ok(conn),
            Backend::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    /// All rows, newest id first.
    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = self
            .conn()?
            .call(|conn| {
                let mut stmt = conn.prepare(SELECT_ALL).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_todo).map_err(wrap_err)?;

                let mut todos = Vec::new();
                for row in rows {
                    todos.push(row.map_err(wrap_err)?);
                }
                Ok(todos)
            })
            .await?;
        Ok(todos)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let id = Value::Text(id.to_owned());
        let todo = self
            .conn()?
            .call(move |conn| select_by_id(conn, id))
            .await?;
        Ok(todo)
    }

    /// Inserts a row and reads it back.
    ///
    /// The insert and the read are two separate store calls, so a delete
    /// landing in between makes this return `Ok(None)`.
    pub async fn create(&self, new: NewTodo) -> Result<Option<Todo>, StoreError> {
        let conn = self.conn()?;
        let id = conn
            .call(move |conn| {
                conn.execute(INSERT, params![new.todo, new.completed, new.user_id])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        let todo = conn
            .call(move |conn| select_by_id(conn, Value::Integer(id)))
            .await?;
        Ok(todo)
    }

    /// Applies the present fields of `changes` and reads the row back.
    ///
    /// Returns `Ok(None)` when `id` matches no row; the update itself is not
    /// an error in that case.
    pub async fn update(&self, id: &str, changes: TodoChanges) -> Result<Option<Todo>, StoreError> {
        let mut assignments = Vec::new();
        let mut values = Vec::new();

        if let Some(todo) = changes.todo {
            assignments.push("todo = ?");
            values.push(Value::Text(todo));
        }
        if let Some(completed) = changes.completed {
            assignments.push("completed = ?");
            values.push(Value::Integer(i64::from(completed)));
        }
        if assignments.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }

        let sql = format!("UPDATE todos SET {} WHERE id = ?", assignments.join(", "));
        values.push(Value::Text(id.to_owned()));

        let conn = self.conn()?;
        conn.call(move |conn| {
            conn.execute(&sql, params_from_iter(values.iter()))
                .map_err(wrap_err)?;
            Ok(())
        })
        .await?;

        let id = Value::Text(id.to_owned());
        let todo = conn.call(move |conn| select_by_id(conn, id)).await?;
        Ok(todo)
    }

    /// Deletes the row if it exists. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let id = Value::Text(id.to_owned());
        let removed = self
            .conn()?
            .call(move |conn| conn.execute(DELETE_BY_ID, [id]).map_err(wrap_err))
            .await?;
        Ok(removed)
    }
}
