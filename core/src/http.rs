//! HTTP requests and responses as plain data.
//!
//! The client never performs I/O; the caller executes an [`HttpRequest`] with
//! whatever transport it has and hands back an [`HttpResponse`].

/// The four verbs the todo routes use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Built by `TodoClient::build_*`. `path` is the full URL.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// What the caller got back from the server, handed to `TodoClient::parse_*`.
/// Only `status` and `body` are inspected.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
