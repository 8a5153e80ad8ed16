//! Immutable routing snapshots and the store that publishes them.
//!
//! A [`RouteSnapshot`] pairs a campus with the path matrix built from it.
//! [`SnapshotStore`] hands out `Arc` clones of the current snapshot; a rebuild
//! runs entirely outside the lock and only the final pointer swap is done
//! under the write guard, so readers never observe a half-built matrix and
//! in-flight queries finish against the snapshot they started with.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::campus::{Campus, LocationId};
use crate::error::Result;
use crate::matrix::PathMatrix;
use crate::routing::{reconstruct_route, Route};

/// Campus graph plus its finished path matrix.
#[derive(Debug, Clone)]
pub struct RouteSnapshot {
    generation: u64,
    campus: Campus,
    matrix: PathMatrix,
}

impl RouteSnapshot {
    /// Build a snapshot. Nothing is returned unless the whole build succeeds.
    pub fn build(campus: Campus) -> Result<Self> {
        let matrix = PathMatrix::build(&campus.locations, &campus.edges)?;
        Ok(Self {
            generation: 0,
            campus,
            matrix,
        })
    }

    /// Shortest route between two location ids.
    pub fn shortest_path(&self, start: LocationId, end: LocationId) -> Result<Route> {
        let (steps, distance) = reconstruct_route(&self.matrix, start, end)?;
        // Matrix indices follow `campus.locations` order.
        let locations = steps
            .into_iter()
            .map(|index| self.campus.locations[index].clone())
            .collect();
        Ok(Route {
            locations,
            distance,
        })
    }

    pub fn campus(&self) -> &Campus {
        &self.campus
    }

    pub fn matrix(&self) -> &PathMatrix {
        &self.matrix
    }

    /// Number of swaps that preceded this snapshot in its store.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holder of the current snapshot with single-writer swap semantics.
///
/// The lock is `parking_lot` and is only held for the pointer clone or swap,
/// never across a build. It does not poison, so a panicking writer leaves the
/// previous snapshot readable.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<RouteSnapshot>>,
}

impl SnapshotStore {
    /// Build the initial snapshot for a campus.
    pub fn new(campus: Campus) -> Result<Self> {
        let snapshot = RouteSnapshot::build(campus)?;
        info!(
            locations = snapshot.campus.locations.len(),
            edges = snapshot.campus.edges.len(),
            "initial route snapshot built"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: RouteSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot currently being served.
    pub fn current(&self) -> Arc<RouteSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Build a snapshot for a replacement campus and swap it in.
    ///
    /// On error the previously published snapshot stays current.
    pub fn rebuild(&self, campus: Campus) -> Result<Arc<RouteSnapshot>> {
        let mut snapshot = match RouteSnapshot::build(campus) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "route snapshot rebuild rejected");
                return Err(err);
            }
        };

        let mut guard = self.current.write();
        snapshot.generation = guard.generation + 1;
        let snapshot = Arc::new(snapshot);
        *guard = Arc::clone(&snapshot);
        drop(guard);

        info!(
            generation = snapshot.generation,
            locations = snapshot.campus.locations.len(),
            edges = snapshot.campus.edges.len(),
            "route snapshot swapped"
        );
        Ok(snapshot)
    }

    /// Shortest route against the current snapshot.
    pub fn shortest_path(&self, start: LocationId, end: LocationId) -> Result<Route> {
        self.current().shortest_path(start, end)
    }
}
