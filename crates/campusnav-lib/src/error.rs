use std::path::PathBuf;

use thiserror::Error;

use crate::campus::LocationId;

/// Convenient result alias for the campus navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when the location set contains the same identifier twice.
    #[error("duplicate location id {id} in location set")]
    DuplicateLocation { id: LocationId },

    /// Raised when an edge references a location that is not part of the graph.
    #[error("edge {source_id} -> {target_id} references unknown location {missing}")]
    InvalidEdge {
        source_id: LocationId,
        target_id: LocationId,
        missing: LocationId,
    },

    /// Raised when an edge weight is negative, NaN or infinite.
    #[error("edge {source_id} -> {target_id} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight {
        source_id: LocationId,
        target_id: LocationId,
        weight: f64,
    },

    /// Raised when a shortest distance exceeds the range of `f64`.
    #[error("shortest distance from {start} to {end} overflows; edge weights are too large")]
    DistanceOverflow { start: LocationId, end: LocationId },

    /// Raised when a query references a location id that is not part of the graph.
    #[error("unknown location id: {id}")]
    UnknownLocation { id: LocationId },

    /// Raised when a location name could not be found in the campus.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocationName {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route connects two known locations.
    #[error("no route found between {start} and {end}")]
    NoRoute { start: LocationId, end: LocationId },

    /// Raised when route reconstruction fails to reach its destination.
    #[error("path matrix is corrupt: route {start} -> {end} did not terminate within {hops} hops")]
    CorruptMatrix {
        start: LocationId,
        end: LocationId,
        hops: usize,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON dataset parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error is a caller-side input problem rather than a fault in
    /// the library.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::DuplicateLocation { .. }
                | Error::InvalidEdge { .. }
                | Error::InvalidWeight { .. }
                | Error::DistanceOverflow { .. }
                | Error::UnknownLocation { .. }
                | Error::UnknownLocationName { .. }
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
