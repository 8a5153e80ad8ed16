//! Integration tests for the campusnav CLI.
//!
//! Commands run against the built-in campus unless a test writes its own
//! dataset into a temp dir.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("campusnav-cli");
    cmd.env_remove("CAMPUSNAV_DATASET")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "error");
    cmd
}

/// Writes a three-location dataset where C cannot reach A.
fn write_dataset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("campus.json");
    let json = r#"{
        "locations": [
            {"id": 0, "name": "A", "latitude": 0.0, "longitude": 0.0},
            {"id": 1, "name": "B", "latitude": 0.0, "longitude": 0.0},
            {"id": 2, "name": "C", "latitude": 0.0, "longitude": 0.0}
        ],
        "paths": [
            {"start_location_id": 0, "end_location_id": 1, "distance": 5},
            {"start_location_id": 1, "end_location_id": 2, "distance": 3},
            {"start_location_id": 0, "end_location_id": 2, "distance": 10}
        ]
    }"#;
    fs::write(&path, json).expect("write dataset");
    path
}

// =============================================================================
// route
// =============================================================================

#[test]
fn route_by_name_on_builtin_campus() {
    cli()
        .args(["route", "--from", "Cafeteria", "--to", "library"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route: 3 hop(s), distance 230"))
        .stdout(predicate::str::contains("Student Center (4)"))
        .stdout(predicate::str::contains("Main Building (1)"));
}

#[test]
fn route_by_id_json_output() {
    let output = cli()
        .args(["--format", "json", "route", "--from", "5", "--to", "9"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["distance"], 1010.0);
    let ids: Vec<i64> = json["locations"]
        .as_array()
        .expect("locations array")
        .iter()
        .map(|l| l["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![5, 4, 1, 2, 3, 6, 7, 8, 9]);
}

#[test]
fn route_from_dataset_file_prefers_indirect_path() {
    let dir = TempDir::new().expect("temp dir");
    let dataset = write_dataset(&dir);

    cli()
        .arg("--dataset")
        .arg(&dataset)
        .args(["route", "--from", "A", "--to", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance 8"))
        .stdout(predicate::str::contains("B (1)"));
}

#[test]
fn route_dataset_from_environment() {
    let dir = TempDir::new().expect("temp dir");
    let dataset = write_dataset(&dir);

    cli()
        .env("CAMPUSNAV_DATASET", &dataset)
        .args(["route", "--from", "0", "--to", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance 8"));
}

#[test]
fn route_without_connection_fails_with_message() {
    let dir = TempDir::new().expect("temp dir");
    let dataset = write_dataset(&dir);

    cli()
        .arg("--dataset")
        .arg(&dataset)
        .args(["route", "--from", "C", "--to", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no route from C to A"));
}

#[test]
fn route_unknown_name_suggests_alternatives() {
    cli()
        .args(["route", "--from", "Libary", "--to", "Cafeteria"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location name: Libary"))
        .stderr(predicate::str::contains("Library"));
}

#[test]
fn route_unknown_id_fails() {
    cli()
        .args(["route", "--from", "1", "--to", "404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location id: 404"));
}

// =============================================================================
// listings and matrix
// =============================================================================

#[test]
fn locations_lists_builtin_campus() {
    cli()
        .arg("locations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Locations (10)"))
        .stdout(predicate::str::contains("Engineering Building"));
}

#[test]
fn paths_json_uses_dataset_field_names() {
    cli()
        .args(["--format", "json", "paths"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start_location_id\": 1"))
        .stdout(predicate::str::contains("\"end_location_id\": 2"));
}

#[test]
fn matrix_marks_unreachable_pairs() {
    let dir = TempDir::new().expect("temp dir");
    let dataset = write_dataset(&dir);

    cli()
        .arg("--dataset")
        .arg(&dataset)
        .arg("matrix")
        .assert()
        .success()
        .stdout(predicate::str::diff("  0 1 2\n0 0 5 8\n1 - 0 3\n2 - - 0\n"));
}

#[test]
fn missing_dataset_reports_path() {
    cli()
        .args(["--dataset", "/nonexistent/campus.json", "locations"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the campus dataset"))
        .stderr(predicate::str::contains("/nonexistent/campus.json"));
}

#[test]
fn invalid_graph_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{"locations": [{"id": 1, "name": "A", "latitude": 0, "longitude": 0}],
            "paths": [{"start_location_id": 1, "end_location_id": 2, "distance": 1}]}"#,
    )
    .expect("write dataset");

    cli()
        .arg("--dataset")
        .arg(&path)
        .arg("matrix")
        .assert()
        .failure()
        .stderr(predicate::str::contains("references unknown location 2"));
}
