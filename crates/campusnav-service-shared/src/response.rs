//! Success payloads and the wrapper they are served in.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use campusnav_lib::{Edge, Location, Route};

/// Wrapper for successful responses. Payload fields are flattened alongside
/// `content_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a successful shortest-path query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Locations from start to end, both inclusive.
    pub route: Vec<Location>,
    /// Total distance along the route.
    pub distance: f64,
    /// Number of edges travelled.
    pub hops: usize,
    /// Generation of the snapshot that answered the query.
    pub generation: u64,
}

impl RouteResponse {
    pub fn from_route(route: Route, generation: u64) -> Self {
        let hops = route.hop_count();
        Self {
            route: route.locations,
            distance: route.distance,
            hops,
            generation,
        }
    }
}

/// Body of `GET /api/v1/locations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<Location>,
}

/// Body of `GET /api/v1/paths`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsResponse {
    pub paths: Vec<Edge>,
}

/// Body of a successful graph replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphReplacedResponse {
    pub generation: u64,
    pub locations: usize,
    pub paths: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_response_is_flattened() {
        let route = Route {
            locations: vec![
                Location::new(10, "Cafeteria", 0.0, 0.0),
                Location::new(4, "Student Center", 0.0, 0.0),
            ],
            distance: 50.0,
        };
        let response = ServiceResponse::new(RouteResponse::from_route(route, 2));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["hops"], 1);
        assert_eq!(json["distance"], 50.0);
        assert_eq!(json["generation"], 2);
        assert_eq!(json["route"][1]["name"], "Student Center");
        assert_eq!(json["content_type"], "application/json");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_response_from_trait() {
        let response: ServiceResponse<GraphReplacedResponse> = GraphReplacedResponse {
            generation: 1,
            locations: 3,
            paths: 4,
        }
        .into();
        assert_eq!(response.data.paths, 4);
        assert_eq!(response.content_type, "application/json");
    }

    #[test]
    fn test_paths_response_uses_dataset_field_names() {
        let response = PathsResponse {
            paths: vec![Edge::new(1, 2, 100.0)],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"start_location_id\":1"));
        assert!(json.contains("\"end_location_id\":2"));
    }
}
