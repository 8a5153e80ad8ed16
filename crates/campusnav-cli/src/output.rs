//! Text and JSON rendering for CLI commands.
//!
//! Renderers return `String`s so they can be tested without capturing stdout.

use clap::ValueEnum;
use serde::Serialize;

use campusnav_lib::{Campus, Edge, Location, PathMatrix, Route};

use crate::terminal::{format_distance, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Serialize any payload as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub fn render_locations(locations: &[Location], palette: ColorPalette) -> String {
    let mut out = format!(
        "{}Locations ({}){}\n",
        palette.cyan,
        locations.len(),
        palette.reset
    );
    for location in locations {
        out.push_str(&format!(
            "{gray}{:>4}{reset}  {bold}{}{reset}  ({:.4}, {:.4})\n",
            location.id,
            location.name,
            location.coordinates.latitude,
            location.coordinates.longitude,
            gray = palette.gray,
            bold = palette.white_bold,
            reset = palette.reset,
        ));
    }
    out
}

/// One line per directed edge, using names where the endpoint exists.
pub fn render_paths(campus: &Campus, palette: ColorPalette) -> String {
    let name = |id| {
        campus
            .location(id)
            .map(|location| location.name.as_str())
            .unwrap_or("<unknown>")
    };

    let mut out = format!(
        "{}Paths ({}){}\n",
        palette.cyan,
        campus.edges.len(),
        palette.reset
    );
    for Edge {
        source,
        target,
        distance,
        ..
    } in &campus.edges
    {
        out.push_str(&format!(
            "{} {gray}({}){reset} -> {} {gray}({}){reset}  {green}{}{reset}\n",
            name(*source),
            source,
            name(*target),
            target,
            format_distance(*distance),
            gray = palette.gray,
            green = palette.green,
            reset = palette.reset,
        ));
    }
    out
}

pub fn render_route(route: &Route, palette: ColorPalette) -> String {
    let mut out = format!(
        "{}Route: {} hop(s), distance {}{}{}\n",
        palette.cyan,
        route.hop_count(),
        palette.green,
        format_distance(route.distance),
        palette.reset
    );
    let last = route.locations.len().saturating_sub(1);
    for (position, location) in route.locations.iter().enumerate() {
        let branch = if position == last { "└─" } else { "├─" };
        out.push_str(&format!(
            "{gray}{}{reset} {bold}{}{reset} {gray}({}){reset}\n",
            branch,
            location.name,
            location.id,
            gray = palette.gray,
            bold = palette.white_bold,
            reset = palette.reset,
        ));
    }
    out
}

/// Grid of shortest distances with location ids as headers. Unreachable
/// pairs print `-`.
pub fn render_matrix(matrix: &PathMatrix, palette: ColorPalette) -> String {
    let ids = matrix.index().ids();
    let cells: Vec<Vec<String>> = (0..matrix.len())
        .map(|row| {
            matrix
                .distance_row(row)
                .iter()
                .map(|cell| cell.map_or_else(|| "-".to_string(), format_distance))
                .collect()
        })
        .collect();

    let width = cells
        .iter()
        .flatten()
        .map(String::len)
        .chain(ids.iter().map(|id| id.to_string().len()))
        .max()
        .unwrap_or(1);

    let mut out = format!("{}{:>width$}{}", palette.cyan, "", palette.reset);
    for id in ids {
        out.push_str(&format!(
            " {}{:>width$}{}",
            palette.cyan, id, palette.reset
        ));
    }
    out.push('\n');

    for (id, row) in ids.iter().zip(&cells) {
        out.push_str(&format!("{}{:>width$}{}", palette.cyan, id, palette.reset));
        for cell in row {
            let color = if cell == "-" {
                palette.gray
            } else {
                palette.green
            };
            out.push_str(&format!(" {}{:>width$}{}", color, cell, palette.reset));
        }
        out.push('\n');
    }
    out
}

/// JSON shape of the `matrix` command.
#[derive(Debug, Serialize)]
pub struct MatrixOutput<'a> {
    pub location_ids: &'a [i64],
    pub distances: Vec<&'a [Option<f64>]>,
}

impl<'a> MatrixOutput<'a> {
    pub fn new(matrix: &'a PathMatrix) -> Self {
        Self {
            location_ids: matrix.index().ids(),
            distances: (0..matrix.len()).map(|row| matrix.distance_row(row)).collect(),
        }
    }
}
