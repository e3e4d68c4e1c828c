//! Opt-in and skip policy for suites that need embedded PostgreSQL.
//!
//! Database suites are `#[ignore]`d and additionally require
//! `RUN_PG_EMBEDDED=1`. When the cluster cannot start, `SKIP_TEST_CLUSTER`
//! turns the failure into a logged skip instead of a panic.

fn truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Whether `RUN_PG_EMBEDDED` opts in to database suites.
pub fn pg_embedded_enabled() -> bool {
    truthy("RUN_PG_EMBEDDED")
}

/// Whether `SKIP_TEST_CLUSTER` asks for setup failures to be tolerated.
pub fn should_skip_test_cluster() -> bool {
    truthy("SKIP_TEST_CLUSTER")
}

/// Handle an embedded cluster setup failure consistently.
///
/// Prints a skip marker and returns `None` when `SKIP_TEST_CLUSTER` is
/// truthy; otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
