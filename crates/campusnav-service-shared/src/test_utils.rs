//! Fixtures for handler tests.
//!
//! Enable the `test-utils` feature to use these from dependent crates.

use std::sync::atomic::{AtomicU64, Ordering};

use campusnav_lib::Campus;

use crate::state::AppState;

/// Well-known ids in the built-in campus.
pub mod builtin_locations {
    use campusnav_lib::LocationId;

    pub const MAIN_BUILDING: LocationId = 1;
    pub const LIBRARY: LocationId = 2;
    pub const STUDENT_CENTER: LocationId = 4;
    pub const SPORTS_COMPLEX: LocationId = 5;
    pub const DORMITORY_B: LocationId = 9;
    pub const CAFETERIA: LocationId = 10;
}

/// Fresh state over the built-in campus.
///
/// Each call builds its own store, so tests that replace the graph do not
/// leak into each other.
///
/// # Panics
///
/// Panics if the built-in campus fails to build, which is a bug in the
/// built-in data.
pub fn test_state() -> AppState {
    AppState::from_campus(Campus::builtin())
        .unwrap_or_else(|e| panic!("built-in campus failed to build: {}", e))
}

/// Unique request id for tests.
pub fn test_request_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("test-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}
