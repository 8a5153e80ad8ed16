use serde::Serialize;

use crate::campus::{Campus, Location, LocationId};
use crate::error::{Error, Result};
use crate::matrix::PathMatrix;
use crate::snapshot::RouteSnapshot;

/// Shortest route between two locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Locations from start to end, both inclusive.
    pub locations: Vec<Location>,
    /// Total distance along the route.
    pub distance: f64,
}

impl Route {
    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.locations.len().saturating_sub(1)
    }

    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.iter().map(|location| location.id).collect()
    }

    pub fn start(&self) -> Option<&Location> {
        self.locations.first()
    }

    pub fn end(&self) -> Option<&Location> {
        self.locations.last()
    }
}

/// Walk the next-hop matrix from `start` to `end`.
///
/// Returns the dense indices of the route (both ends inclusive) and its total
/// distance. The walk is bounded at `n` hops; a matrix that would loop past
/// that yields [`Error::CorruptMatrix`].
pub fn reconstruct_route(
    matrix: &PathMatrix,
    start: LocationId,
    end: LocationId,
) -> Result<(Vec<usize>, f64)> {
    let from = matrix.resolve(start)?;
    let to = matrix.resolve(end)?;

    let Some(distance) = matrix.distance(from, to) else {
        return Err(Error::NoRoute { start, end });
    };

    let limit = matrix.len();
    let mut steps = vec![from];
    let mut current = from;
    while current != to {
        let within_bound = steps.len() <= limit;
        debug_assert!(
            within_bound,
            "route {start} -> {end} did not terminate within {limit} hops"
        );
        if !within_bound {
            return Err(Error::CorruptMatrix {
                start,
                end,
                hops: limit,
            });
        }
        let Some(next) = matrix.next_hop(current, to) else {
            return Err(Error::NoRoute { start, end });
        };
        steps.push(next);
        current = next;
    }

    Ok((steps, distance))
}

/// Compute a single shortest route over a campus.
///
/// Builds a throwaway matrix; callers answering many queries should hold a
/// [`RouteSnapshot`] instead.
pub fn shortest_path(campus: &Campus, start: LocationId, end: LocationId) -> Result<Route> {
    RouteSnapshot::build(campus.clone())?.shortest_path(start, end)
}
