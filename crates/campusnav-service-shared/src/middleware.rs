//! Request correlation for campus navigation services.
//!
//! [`propagate_request_id`] takes the `X-Request-ID` header when the caller
//! sent one (otherwise a fresh UUID v7), stores it as a [`RequestId`]
//! extension for handlers, runs the request inside a tracing span carrying
//! the id, and echoes the id back on the response.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Header used to carry the correlation id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new time-sortable UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read `X-Request-ID`, generating a UUID v7 when it is absent, empty or not
/// valid UTF-8.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| RequestId(s.to_string()))
        .unwrap_or_else(RequestId::generate)
}

/// axum middleware attaching a [`RequestId`] to every request and response.
///
/// Install with `axum::middleware::from_fn(propagate_request_id)`.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let request_id = extract_or_generate_request_id(request.headers());
    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
