use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for a campus location.
pub type LocationId = i64;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Geographic coordinates of a location. Display-only; routing never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A named place on the campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Directed, weighted connection between two locations.
///
/// A walkway usable in both directions is two edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "start_location_id")]
    pub source: LocationId,
    #[serde(rename = "end_location_id")]
    pub target: LocationId,
    pub distance: f64,
}

impl Edge {
    pub fn new(source: LocationId, target: LocationId, distance: f64) -> Self {
        Self {
            id: None,
            source,
            target,
            distance,
        }
    }

    /// Both directions of an undirected walkway.
    pub fn bidirectional(a: LocationId, b: LocationId, distance: f64) -> [Edge; 2] {
        [Edge::new(a, b, distance), Edge::new(b, a, distance)]
    }
}

/// In-memory campus graph: the locations and the directed edges between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campus {
    pub locations: Vec<Location>,
    #[serde(rename = "paths", alias = "edges")]
    pub edges: Vec<Edge>,
}

impl Campus {
    pub fn new(locations: Vec<Location>, edges: Vec<Edge>) -> Self {
        Self { locations, edges }
    }

    /// Lookup a location by identifier.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Lookup a location identifier by name, ignoring ASCII case.
    pub fn location_id_by_name(&self, name: &str) -> Option<LocationId> {
        let needle = name.trim();
        self.locations
            .iter()
            .find(|location| location.name.eq_ignore_ascii_case(needle))
            .map(|location| location.id)
    }

    /// Names similar to `name`, best match first, at most `limit` entries.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
                (score, location.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Resolve user input that is either a numeric id or a location name.
    pub fn resolve_location(&self, query: &str) -> Result<LocationId> {
        let query = query.trim();
        if let Ok(id) = query.parse::<LocationId>() {
            return self
                .location(id)
                .map(|location| location.id)
                .ok_or(Error::UnknownLocation { id });
        }

        self.location_id_by_name(query)
            .ok_or_else(|| Error::UnknownLocationName {
                name: query.to_string(),
                suggestions: self.fuzzy_location_matches(query, 3),
            })
    }
}
