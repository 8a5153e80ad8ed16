use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::campus::{Campus, Edge, Location};
use crate::error::{Error, Result};

/// Environment variable naming a campus JSON file to load instead of the
/// built-in campus.
pub const DATASET_ENV_VAR: &str = "CAMPUSNAV_DATASET";

/// Load a campus from a JSON file with `locations` and `paths` arrays.
pub fn load_campus(path: &Path) -> Result<Campus> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "reading campus dataset");
    let raw = fs::read_to_string(path)?;
    let campus: Campus = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        locations = campus.locations.len(),
        paths = campus.edges.len(),
        "campus dataset loaded"
    );
    Ok(campus)
}

/// Load the campus from an explicit path, then [`DATASET_ENV_VAR`], falling
/// back to [`Campus::builtin`].
pub fn load_campus_or_builtin(target: Option<&Path>) -> Result<Campus> {
    if let Some(path) = resolve_dataset_path(target) {
        return load_campus(&path);
    }
    debug!("no dataset configured, using built-in campus");
    Ok(Campus::builtin())
}

fn resolve_dataset_path(target: Option<&Path>) -> Option<PathBuf> {
    if let Some(explicit) = target {
        return Some(explicit.to_path_buf());
    }
    env::var_os(DATASET_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl Campus {
    /// The default campus: ten buildings joined by nine two-way walkways.
    pub fn builtin() -> Self {
        let locations = vec![
            Location::new(1, "Main Building", 40.7128, -74.0060)
                .with_description("The main administrative building"),
            Location::new(2, "Library", 40.7130, -74.0065)
                .with_description("Central library with study spaces"),
            Location::new(3, "Science Block", 40.7135, -74.0070)
                .with_description("Houses science departments and labs"),
            Location::new(4, "Student Center", 40.7125, -74.0055)
                .with_description("Hub for student activities and dining"),
            Location::new(5, "Sports Complex", 40.7120, -74.0050)
                .with_description("Indoor and outdoor sports facilities"),
            Location::new(6, "Engineering Building", 40.7140, -74.0075)
                .with_description("Home to engineering departments"),
            Location::new(7, "Arts Center", 40.7145, -74.0080)
                .with_description("Theaters and art studios"),
            Location::new(8, "Dormitory A", 40.7150, -74.0085)
                .with_description("Student housing"),
            Location::new(9, "Dormitory B", 40.7155, -74.0090)
                .with_description("Student housing"),
            Location::new(10, "Cafeteria", 40.7127, -74.0058)
                .with_description("Main dining hall"),
        ];

        let walkways: [(i64, i64, f64); 9] = [
            (1, 2, 100.0),
            (1, 4, 80.0),
            (2, 3, 120.0),
            (3, 6, 150.0),
            (4, 5, 200.0),
            (4, 10, 50.0),
            (6, 7, 100.0),
            (7, 8, 180.0),
            (8, 9, 80.0),
        ];
        let edges = walkways
            .iter()
            .flat_map(|&(a, b, distance)| Edge::bidirectional(a, b, distance))
            .enumerate()
            .map(|(position, mut edge)| {
                edge.id = Some(position as i64 + 1);
                edge
            })
            .collect();

        Campus::new(locations, edges)
    }
}
