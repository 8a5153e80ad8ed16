//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use campusnav_lib::{Error as LibError, LocationId};

/// Problem type URI for location ids or names that are not on the campus.
pub const PROBLEM_UNKNOWN_LOCATION: &str = "/problems/unknown-location";

/// Problem type URI for location pairs with no connecting route.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for a replacement graph that fails to build.
pub const PROBLEM_INVALID_GRAPH: &str = "/problems/invalid-graph";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use campusnav_service_shared::{ProblemDetails, PROBLEM_ROUTE_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_ROUTE_NOT_FOUND,
///     "Route Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("No route exists from location 3 to location 1")
/// .with_request_id("req-12345");
/// assert_eq!(problem.status, 404);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Identifier of the specific occurrence (the request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for malformed or missing parameters.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 400 for a location id that is not on the campus.
    pub fn unknown_location(id: LocationId, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(format!("Location {} does not exist", id))
        .with_request_id(request_id)
    }

    /// 400 for a location name that is not on the campus.
    pub fn unknown_location_name(
        name: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Location '{}' not found", name)
        } else {
            format!(
                "Location '{}' not found. Did you mean: {}?",
                name,
                suggestions.join(", ")
            )
        };

        Self::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 for two known locations with no connecting route.
    pub fn route_not_found(
        start: LocationId,
        end: LocationId,
        request_id: impl Into<String>,
    ) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!(
            "No route exists from location {} to location {}",
            start, end
        ))
        .with_request_id(request_id)
    }

    /// 400 for a replacement graph rejected at build time.
    pub fn invalid_graph(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_GRAPH,
            "Invalid Graph",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 500 for faults on the server side.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// Unknown ids and broken graphs are client errors, a missing route is 404 and
/// a corrupt matrix is a server fault.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownLocation { id } => ProblemDetails::unknown_location(*id, request_id),
        LibError::UnknownLocationName { name, suggestions } => {
            ProblemDetails::unknown_location_name(name, suggestions, request_id)
        }
        LibError::NoRoute { start, end } => {
            ProblemDetails::route_not_found(*start, *end, request_id)
        }
        LibError::DuplicateLocation { .. }
        | LibError::InvalidEdge { .. }
        | LibError::InvalidWeight { .. }
        | LibError::DistanceOverflow { .. } => {
            ProblemDetails::invalid_graph(error.to_string(), request_id)
        }
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
