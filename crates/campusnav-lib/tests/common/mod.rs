//! Shared graph fixtures for integration tests.

use campusnav_lib::{Campus, Edge, Location, LocationId};

/// Three locations A=0, B=1, C=2 with A->B (5), B->C (3) and A->C (10).
pub fn abc_campus() -> Campus {
    Campus::new(
        vec![
            Location::new(0, "A", 0.0, 0.0),
            Location::new(1, "B", 0.0, 1.0),
            Location::new(2, "C", 0.0, 2.0),
        ],
        vec![
            Edge::new(0, 1, 5.0),
            Edge::new(1, 2, 3.0),
            Edge::new(0, 2, 10.0),
        ],
    )
}

/// Irregular directed graph with a disconnected island (ids 50 and 51).
#[allow(dead_code)]
pub fn mixed_campus() -> Campus {
    let locations = [10, 20, 30, 40, 50, 51]
        .into_iter()
        .map(|id| Location::new(id, format!("Node {id}"), 0.0, 0.0))
        .collect();
    let mut edges = vec![
        Edge::new(10, 20, 4.0),
        Edge::new(20, 30, 1.5),
        Edge::new(30, 10, 2.0),
        Edge::new(10, 30, 7.0),
        Edge::new(30, 40, 0.0),
        Edge::new(40, 20, 9.0),
        Edge::new(40, 40, 3.0),
        Edge::new(20, 30, 6.0),
    ];
    edges.extend(Edge::bidirectional(50, 51, 2.5));
    Campus::new(locations, edges)
}

/// Cheapest direct edge weight between two ids.
#[allow(dead_code)]
pub fn edge_weight(campus: &Campus, from: LocationId, to: LocationId) -> Option<f64> {
    campus
        .edges
        .iter()
        .filter(|edge| edge.source == from && edge.target == to)
        .map(|edge| edge.distance)
        .reduce(f64::min)
}
