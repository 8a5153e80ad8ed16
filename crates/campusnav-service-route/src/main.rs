//! Campus shortest-path HTTP microservice.
//!
//! Serves routes from a precomputed all-pairs path matrix and lets operators
//! swap in a new campus graph without a restart.
//!
//! # Endpoints
//!
//! - `GET /api/v1/locations` - List campus locations
//! - `GET /api/v1/paths` - List directed paths
//! - `GET /api/v1/shortest-path?start_id=&end_id=` - Shortest route between two locations
//! - `PUT /api/v1/graph` - Replace the campus graph and rebuild the matrix
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `CAMPUSNAV_DATASET` - Path to a campus JSON file (built-in campus when unset)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use axum::{
    Extension, Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use campusnav_service_shared::{
    AppState, GraphReplacedResponse, LocationsResponse, LoggingConfig, PathsResponse,
    ProblemDetails, ReplaceGraphRequest, RequestId, RouteResponse, ServiceResponse,
    ShortestPathQuery, Validate, from_lib_error, health_live, health_ready, init_logging,
    propagate_request_id,
};

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

impl<T> From<ProblemDetails> for Response<T> {
    fn from(problem: ProblemDetails) -> Self {
        Response::Error(problem)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(port = port, "starting campus route service");

    // Dataset path comes from CAMPUSNAV_DATASET; unset means the built-in campus.
    let state = AppState::load(None).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(state = ?state, "application state loaded");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/locations", get(locations_handler))
        .route("/api/v1/paths", get(paths_handler))
        .route("/api/v1/shortest-path", get(shortest_path_handler))
        .route("/api/v1/graph", put(replace_graph_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(propagate_request_id))
        .with_state(state)
}

/// Handle GET /api/v1/locations.
async fn locations_handler(State(state): State<AppState>) -> ServiceResponse<LocationsResponse> {
    let snapshot = state.snapshot();
    ServiceResponse::new(LocationsResponse {
        locations: snapshot.campus().locations.clone(),
    })
}

/// Handle GET /api/v1/paths.
async fn paths_handler(State(state): State<AppState>) -> ServiceResponse<PathsResponse> {
    let snapshot = state.snapshot();
    ServiceResponse::new(PathsResponse {
        paths: snapshot.campus().edges.clone(),
    })
}

/// Handle GET /api/v1/shortest-path requests.
async fn shortest_path_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<ShortestPathQuery>,
) -> Response<RouteResponse> {
    let request_id = request_id.as_str();

    let (start, end) = match query.location_ids(request_id) {
        Ok(ids) => ids,
        Err(problem) => return Response::Error(*problem),
    };

    info!(start, end, "handling shortest-path request");

    // One snapshot answers the whole request even if the graph is replaced meanwhile.
    let snapshot = state.snapshot();
    let route = match snapshot.shortest_path(start, end) {
        Ok(route) => route,
        Err(e) => {
            if e.is_invalid_input() {
                info!(error = %e, "shortest-path request rejected");
            } else {
                warn!(error = %e, "shortest-path request failed");
            }
            return from_lib_error(&e, request_id).into();
        }
    };

    let response = RouteResponse::from_route(route, snapshot.generation());
    info!(
        hops = response.hops,
        distance = response.distance,
        generation = response.generation,
        "route computed successfully"
    );

    Response::Success(ServiceResponse::new(response))
}

/// Handle PUT /api/v1/graph requests.
///
/// The matrix build runs on the blocking pool; readers keep using the
/// previous snapshot until the swap.
async fn replace_graph_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<ReplaceGraphRequest>, JsonRejection>,
) -> Response<GraphReplacedResponse> {
    let request_id = request_id.as_str();

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ProblemDetails::bad_request(rejection.body_text(), request_id).into();
        }
    };

    if let Err(problem) = request.validate(request_id) {
        return Response::Error(*problem);
    }

    let campus = request.campus;
    let locations = campus.locations.len();
    let paths = campus.edges.len();
    info!(locations, paths, "replacing campus graph");

    let rebuilt = tokio::task::spawn_blocking(move || state.replace_campus(campus)).await;
    let snapshot = match rebuilt {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(e)) => return from_lib_error(&e, request_id).into(),
        Err(e) => {
            error!(error = %e, "graph rebuild task failed");
            return ProblemDetails::internal_error("graph rebuild did not complete", request_id)
                .into();
        }
    };

    Response::Success(ServiceResponse::new(GraphReplacedResponse {
        generation: snapshot.generation(),
        locations,
        paths,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use campusnav_service_shared::test_utils::{builtin_locations, test_state};
    use serde_json::{Value, json};

    fn server() -> TestServer {
        TestServer::new(app(test_state())).unwrap()
    }

    #[tokio::test]
    async fn test_shortest_path_builtin_campus() {
        let response = server()
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", builtin_locations::SPORTS_COMPLEX)
            .add_query_param("end_id", builtin_locations::DORMITORY_B)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["distance"], 1010.0);
        assert_eq!(body["hops"], 8);
        assert_eq!(body["generation"], 0);
        let ids: Vec<i64> = body["route"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![5, 4, 1, 2, 3, 6, 7, 8, 9]);
    }

    #[tokio::test]
    async fn test_shortest_path_same_location() {
        let response = server()
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", builtin_locations::LIBRARY)
            .add_query_param("end_id", builtin_locations::LIBRARY)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["distance"], 0.0);
        assert_eq!(body["hops"], 0);
        assert_eq!(body["route"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shortest_path_unknown_location_is_bad_request() {
        let response = server()
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", 1)
            .add_query_param("end_id", 999)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.header("content-type"),
            HeaderValue::from_static("application/problem+json")
        );
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/unknown-location");
        assert!(body["detail"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_shortest_path_missing_parameter() {
        let response = server()
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", 1)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["detail"].as_str().unwrap().contains("end_id"));
    }

    #[tokio::test]
    async fn test_shortest_path_no_route_is_not_found() {
        let server = server();
        let island = json!({
            "locations": [
                {"id": 1, "name": "Dock", "latitude": 0.0, "longitude": 0.0},
                {"id": 2, "name": "Lighthouse", "latitude": 0.0, "longitude": 0.0}
            ],
            "paths": [
                {"start_location_id": 1, "end_location_id": 2, "distance": 30.0}
            ]
        });
        server.put("/api/v1/graph").json(&island).await;

        let response = server
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", 2)
            .add_query_param("end_id", 1)
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/route-not-found");
    }

    #[tokio::test]
    async fn test_replace_graph_swaps_snapshot() {
        let server = server();
        let campus = json!({
            "locations": [
                {"id": 1, "name": "Dock", "latitude": 0.0, "longitude": 0.0},
                {"id": 2, "name": "Lighthouse", "latitude": 0.0, "longitude": 0.0},
                {"id": 3, "name": "Boathouse", "latitude": 0.0, "longitude": 0.0}
            ],
            "paths": [
                {"start_location_id": 1, "end_location_id": 2, "distance": 30.0},
                {"start_location_id": 2, "end_location_id": 3, "distance": 15.0},
                {"start_location_id": 1, "end_location_id": 3, "distance": 60.0}
            ]
        });

        let response = server.put("/api/v1/graph").json(&campus).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["generation"], 1);
        assert_eq!(body["locations"], 3);
        assert_eq!(body["paths"], 3);

        let response = server
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", 1)
            .add_query_param("end_id", 3)
            .await;
        let body: Value = response.json();
        assert_eq!(body["distance"], 45.0);
        assert_eq!(body["generation"], 1);

        let locations: Value = server.get("/api/v1/locations").await.json();
        assert_eq!(locations["locations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_replace_graph_rejects_invalid_edge_and_keeps_snapshot() {
        let server = server();
        let broken = json!({
            "locations": [{"id": 1, "name": "Dock", "latitude": 0.0, "longitude": 0.0}],
            "paths": [{"start_location_id": 1, "end_location_id": 42, "distance": 5.0}]
        });

        let response = server.put("/api/v1/graph").json(&broken).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-graph");

        let locations: Value = server.get("/api/v1/locations").await.json();
        assert_eq!(locations["locations"].as_array().unwrap().len(), 10);
    }

    /// PUT `campus` and assert it is rejected as an invalid graph while the
    /// built-in snapshot keeps serving.
    async fn assert_graph_rejected(campus: Value, detail_fragment: &str) {
        let server = server();

        let response = server.put("/api/v1/graph").json(&campus).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-graph");
        assert!(
            body["detail"].as_str().unwrap().contains(detail_fragment),
            "unexpected detail: {}",
            body["detail"]
        );

        let response = server
            .get("/api/v1/shortest-path")
            .add_query_param("start_id", builtin_locations::CAFETERIA)
            .add_query_param("end_id", builtin_locations::LIBRARY)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["distance"], 230.0);
        assert_eq!(body["generation"], 0);
    }

    #[tokio::test]
    async fn test_replace_graph_rejects_negative_weight() {
        let campus = json!({
            "locations": [
                {"id": 1, "name": "Dock", "latitude": 0.0, "longitude": 0.0},
                {"id": 2, "name": "Lighthouse", "latitude": 0.0, "longitude": 0.0}
            ],
            "paths": [{"start_location_id": 1, "end_location_id": 2, "distance": -4.0}]
        });
        assert_graph_rejected(campus, "invalid weight -4").await;
    }

    #[tokio::test]
    async fn test_replace_graph_rejects_duplicate_location() {
        let campus = json!({
            "locations": [
                {"id": 1, "name": "Dock", "latitude": 0.0, "longitude": 0.0},
                {"id": 1, "name": "Lighthouse", "latitude": 0.0, "longitude": 0.0}
            ],
            "paths": []
        });
        assert_graph_rejected(campus, "duplicate location id 1").await;
    }

    #[tokio::test]
    async fn test_replace_graph_rejects_overflowing_distances() {
        let campus = json!({
            "locations": [
                {"id": 1, "name": "Dock", "latitude": 0.0, "longitude": 0.0},
                {"id": 2, "name": "Lighthouse", "latitude": 0.0, "longitude": 0.0},
                {"id": 3, "name": "Boathouse", "latitude": 0.0, "longitude": 0.0}
            ],
            "paths": [
                {"start_location_id": 1, "end_location_id": 2, "distance": f64::MAX},
                {"start_location_id": 2, "end_location_id": 3, "distance": f64::MAX}
            ]
        });
        assert_graph_rejected(campus, "overflows").await;
    }

    #[tokio::test]
    async fn test_replace_graph_rejects_empty_campus() {
        let response = server()
            .put("/api/v1/graph")
            .json(&json!({"locations": [], "paths": []}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paths_lists_builtin_edges() {
        let response = server().get("/api/v1/paths").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["paths"].as_array().unwrap().len(), 18);
        assert_eq!(body["content_type"], "application/json");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = server()
            .get("/health/live")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("req-abc"),
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.header("x-request-id"),
            HeaderValue::from_static("req-abc")
        );
    }

    #[tokio::test]
    async fn test_problem_instance_uses_request_id() {
        let response = server()
            .get("/api/v1/shortest-path")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("req-xyz"),
            )
            .add_query_param("start_id", "library")
            .add_query_param("end_id", 2)
            .await;

        let body: Value = response.json();
        assert_eq!(body["instance"], "req-xyz");
    }

    #[tokio::test]
    async fn test_health_ready_reports_generation() {
        let response = server().get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["locations_loaded"], 10);
        assert_eq!(body["snapshot_generation"], 0);
    }
}
