//! Shared infrastructure for campus navigation HTTP services.
//!
//! - [`AppState`]: the live [`campusnav_lib::SnapshotStore`] behind every handler
//! - [`health`](health_live): liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 problem responses
//! - [`ServiceResponse`]: wrapper for successful responses
//! - [`logging`]: structured JSON or text logging setup
//! - [`middleware`]: request id propagation
//! - Request types with validation for each endpoint
//!
//! Handlers stay thin. Graph building and route reconstruction live in
//! `campusnav-lib`; this crate only parses, validates and formats.
//!
//! The [`test_utils`] module provides fixtures for handler tests. Enable the
//! `test-utils` feature to use it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use middleware::{
    extract_or_generate_request_id, propagate_request_id, RequestId, REQUEST_ID_HEADER,
};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_GRAPH,
    PROBLEM_INVALID_REQUEST, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_UNKNOWN_LOCATION,
};
pub use request::{ReplaceGraphRequest, ShortestPathQuery, Validate, MAX_LOCATIONS};
pub use response::{
    GraphReplacedResponse, LocationsResponse, PathsResponse, RouteResponse, ServiceResponse,
};
pub use state::{AppState, AppStateError};
