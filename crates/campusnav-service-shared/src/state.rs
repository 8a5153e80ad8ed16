//! Application state for HTTP microservices.
//!
//! Handlers share one [`SnapshotStore`]. Each request grabs the current
//! snapshot once and answers entirely from it, so a concurrent graph
//! replacement never changes the matrix underneath a running query.

use std::path::Path;
use std::sync::Arc;

use campusnav_lib::{
    load_campus_or_builtin, Campus, Error as LibError, Result as LibResult, RouteSnapshot,
    SnapshotStore,
};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to read or parse the campus dataset.
    DatasetLoad(LibError),

    /// The dataset loaded but its graph failed to build.
    SnapshotBuild(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetLoad(e) => write!(f, "failed to load campus dataset: {}", e),
            Self::SnapshotBuild(e) => write!(f, "failed to build route snapshot: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) | Self::SnapshotBuild(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; every clone refers to the same snapshot store.
///
/// ```
/// use campusnav_lib::Campus;
/// use campusnav_service_shared::AppState;
///
/// let state = AppState::from_campus(Campus::builtin()).unwrap();
/// let route = state.snapshot().shortest_path(10, 2).unwrap();
/// assert_eq!(route.distance, 230.0);
/// ```
#[derive(Clone)]
pub struct AppState {
    store: Arc<SnapshotStore>,
}

impl AppState {
    /// Load the campus from `dataset` (or `CAMPUSNAV_DATASET`, or the built-in
    /// campus) and build the initial snapshot.
    pub fn load(dataset: Option<&Path>) -> Result<Self, AppStateError> {
        let campus = load_campus_or_builtin(dataset).map_err(AppStateError::DatasetLoad)?;
        tracing::info!(
            locations = campus.locations.len(),
            paths = campus.edges.len(),
            "campus loaded"
        );
        Self::from_campus(campus).map_err(AppStateError::SnapshotBuild)
    }

    /// Build state from an in-memory campus.
    pub fn from_campus(campus: Campus) -> LibResult<Self> {
        Ok(Self {
            store: Arc::new(SnapshotStore::new(campus)?),
        })
    }

    /// The snapshot currently being served.
    pub fn snapshot(&self) -> Arc<RouteSnapshot> {
        self.store.current()
    }

    /// Replace the campus graph. The old snapshot stays live if the build fails.
    pub fn replace_campus(&self, campus: Campus) -> LibResult<Arc<RouteSnapshot>> {
        self.store.rebuild(campus)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("AppState")
            .field("location_count", &snapshot.campus().locations.len())
            .field("generation", &snapshot.generation())
            .finish()
    }
}
