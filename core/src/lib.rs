//! Sans-IO client for the todo HTTP API.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. The caller executes the round-trip, which
//! keeps the client deterministic and lets tests drive it against any
//! transport.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Deleted, ErrorBody, Todo, TodoList, UpdateTodo};
