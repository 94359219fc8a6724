//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::job::runner::FileOutcome;
use crate::log::jsonl::RunEntry;
use chrono::Utc;

/// Create a `RunEntry` for testing with `dry_run = false`.
#[must_use]
pub fn make_test_entry(job: &str, path: &str, outcome: FileOutcome) -> RunEntry {
    RunEntry {
        timestamp: Utc::now(),
        job: job.to_string(),
        path: path.to_string(),
        outcome,
        dry_run: false,
    }
}
