//! Campus navigation library entry points.
//!
//! This crate models a campus as named locations joined by directed, weighted
//! paths, builds the all-pairs shortest-path matrices over it, and answers
//! point-to-point route queries from those matrices. Higher-level consumers
//! (CLI, HTTP service) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod campus;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod routing;
pub mod snapshot;

pub use campus::{Campus, Coordinates, Edge, Location, LocationId};
pub use dataset::{load_campus, load_campus_or_builtin, DATASET_ENV_VAR};
pub use error::{Error, Result};
pub use graph::LocationIndex;
pub use matrix::PathMatrix;
pub use routing::{reconstruct_route, shortest_path, Route};
pub use snapshot::{RouteSnapshot, SnapshotStore};
