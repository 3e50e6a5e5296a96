//! Conformance test suite for `SubmissionStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `SubmissionStore` implementation can run to verify correctness. The
//! suite covers:
//!
//! - **Read**: a fresh store is empty, reads are repeatable
//! - **Append**: newest-first ordering, entry counts, field fidelity
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty storage instance for each test:
//!
//! ```ignore
//! use sustainiq_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn file_conformance() {
//!     let report = run_conformance_suite(|| async { create_test_store().await }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod append;
mod read;

use std::fmt;
use std::future::Future;

use sustainiq_core::{compute, SnapshotInput};

use crate::record::{StoredSubmission, Submission};
use crate::SubmissionStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category ("read" or "append").
    pub category: String,
    /// Test name (e.g. "appends_are_newest_first").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// storage instance, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(read::run_read_tests(&factory).await);
    results.extend(append::run_append_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn make_submission(id: &str, size: &str, tracking: &str, challenge: &str) -> Submission {
    let input = SnapshotInput::new(Some("Logistics"), size, tracking, challenge);
    Submission {
        id: id.to_string(),
        created_at: "2025-01-01T00:00:00.000Z".to_string(),
        input: input.to_payload(),
        result: compute(&input),
    }
}

fn ids_of(submissions: &[StoredSubmission]) -> Vec<String> {
    submissions
        .iter()
        .map(|s| s.id().unwrap_or_default().to_string())
        .collect()
}
