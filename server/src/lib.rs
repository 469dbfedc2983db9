//! HTTP todo service over a single SQLite table.
//!
//! `app` builds the router around an explicitly constructed [`Store`];
//! `run` serves it on a listener until the future is dropped.

pub mod config;
pub mod error;
pub mod handlers;
pub mod request;
pub mod store;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::ApiError;
pub use store::{Store, StoreError, Todo};

use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};

pub fn app(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/add", post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
