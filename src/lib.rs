//! Recast - cyclic find-and-replace across text files
//!
//! Recast replaces every occurrence of a literal marker in a set of files,
//! either rotating through a list of replacements in order of appearance or
//! swapping in one fixed string. Jobs are declared in `recast.toml`.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod job;
pub mod log;
pub mod substitute;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use cli::{render_run_summary, JobDisplay};
pub use job::config::{GlobalConfig, JobConfig, JobMode, RecastConfig};
pub use job::files::{read_text, write_text, FileError};
pub use job::runner::{FileOutcome, FileReport, JobReport, JobRunner, PreparedJob};
pub use job::targets::{resolve_targets, Targets, UnreadableMatch};
pub use log::{JsonlLogger, RunEntry};
pub use substitute::{
    find_occurrences, substitute_cyclic, substitute_literal, LiteralSubstitution, Occurrence,
    SubstituteError, Substitution,
};
