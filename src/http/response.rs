//! Response helpers shared by the router's fallbacks.
//!
//! # Responsibilities
//! - Build the default plain-text error responses (404, 405)
//! - Render the `Allow` header value for 405 responses
//!
//! # Design Decisions
//! - Error bodies are the canonical reason phrase of the status
//! - `X-Content-Type-Options: nosniff` on every plain-text error

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

/// Plain-text response whose body is the reason phrase of `status`.
pub fn plain_error(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or_default();
    let mut response = (status, reason).into_response();
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

/// Join methods as `GET, POST`, keeping order and duplicates.
pub fn allow_header(methods: &[Method]) -> Option<HeaderValue> {
    let joined = methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    HeaderValue::from_str(&joined).ok()
}
