//! Job runner
//!
//! Executes jobs by resolving their target files, then reading,
//! substituting, and writing back each file in turn. A failure on one file
//! is recorded and the runner moves on to the next.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::job::config::{JobConfig, JobMode, RecastConfig};
use crate::job::files::{read_text, write_text, FileError};
use crate::job::targets::{resolve_targets, UnreadableMatch};
use crate::substitute::{substitute_cyclic, SubstituteError};

/// What happened to a single target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Marker found and every occurrence replaced
    Updated {
        /// Number of occurrences replaced
        occurrences: usize,
    },
    /// Marker not present; file left untouched
    Unchanged,
    /// Target path does not exist; skipped
    NotFound,
    /// Read or write failed
    Failed {
        /// Error description
        message: String,
    },
}

impl FileOutcome {
    /// Number of occurrences replaced (0 unless `Updated`)
    #[must_use]
    pub const fn occurrences(&self) -> usize {
        match self {
            Self::Updated { occurrences } => *occurrences,
            _ => 0,
        }
    }
}

/// Outcome for one file of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path that was processed
    pub path: PathBuf,
    /// What happened to it
    pub outcome: FileOutcome,
}

/// Aggregated result of running one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Name of the job
    pub job: String,
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// Per-file outcomes in processing order
    pub files: Vec<FileReport>,
}

impl JobReport {
    /// Number of files that were (or in a dry run, would be) rewritten
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Updated { .. }))
    }

    /// Number of files where the marker was absent
    #[must_use]
    pub fn unchanged_count(&self) -> usize {
        self.count(|o| *o == FileOutcome::Unchanged)
    }

    /// Number of files that did not exist
    #[must_use]
    pub fn not_found_count(&self) -> usize {
        self.count(|o| *o == FileOutcome::NotFound)
    }

    /// Number of files that failed to read or write
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Total occurrences replaced across all files
    #[must_use]
    pub fn occurrences_replaced(&self) -> usize {
        self.files.iter().map(|f| f.outcome.occurrences()).sum()
    }

    /// True if no file failed. Missing files are skips, not failures.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Job with its targets resolved, ready for execution
#[derive(Debug)]
pub struct PreparedJob {
    /// Job name
    pub job_name: String,
    /// Marker to search for
    pub marker: String,
    /// Substitution mode
    pub mode: JobMode,
    /// Replacement list (one entry for literal jobs)
    pub replacements: Vec<String>,
    /// Files to process, in order
    pub targets: Vec<PathBuf>,
    /// Glob entries that could not be read, reported as failures
    pub unreadable: Vec<UnreadableMatch>,
}

/// Runs configured jobs against the filesystem
pub struct JobRunner {
    config: RecastConfig,
    dry_run: bool,
}

impl JobRunner {
    /// Create a new runner with the given configuration
    #[must_use]
    pub const fn new(config: RecastConfig) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Count and report substitutions without writing any file
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether writes are suppressed
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// The configuration this runner executes
    #[must_use]
    pub const fn config(&self) -> &RecastConfig {
        &self.config
    }

    /// Prepare a job for execution.
    ///
    /// Validates the job exists and resolves its target files.
    pub fn prepare(&self, job_name: &str) -> Result<PreparedJob> {
        let job = self
            .config
            .get_job(job_name)
            .with_context(|| format!("Unknown job: '{job_name}'"))?;

        let targets = resolve_targets(job, self.config.base_dir())
            .with_context(|| format!("Failed to resolve targets for job '{job_name}'"))?;

        Ok(prepare_job(job, targets.files, targets.unreadable))
    }

    /// Run a job end-to-end and return its report.
    pub fn run_job(&self, job_name: &str) -> Result<JobReport> {
        self.run_job_with(job_name, |_| {})
    }

    /// Run a job, calling `on_file` after each file is processed.
    pub fn run_job_with<F>(&self, job_name: &str, mut on_file: F) -> Result<JobReport>
    where
        F: FnMut(&FileReport),
    {
        let prepared = self.prepare(job_name)?;
        Ok(self.run_prepared(prepared, on_file))
    }

    /// Process every target of an already prepared job.
    ///
    /// Files are visited in order; glob entries that could not be read are
    /// reported as `Failed` after them.
    pub fn run_prepared<F>(&self, prepared: PreparedJob, mut on_file: F) -> JobReport
    where
        F: FnMut(&FileReport),
    {
        let mut files = Vec::with_capacity(prepared.targets.len() + prepared.unreadable.len());

        for path in &prepared.targets {
            let report = FileReport {
                path: path.clone(),
                outcome: process_file(path, &prepared, self.dry_run),
            };
            on_file(&report);
            files.push(report);
        }

        for unreadable in prepared.unreadable {
            let report = FileReport {
                path: unreadable.path,
                outcome: FileOutcome::Failed {
                    message: unreadable.message,
                },
            };
            on_file(&report);
            files.push(report);
        }

        JobReport {
            job: prepared.job_name,
            dry_run: self.dry_run,
            files,
        }
    }

    /// Run every configured job in definition order.
    pub fn run_all(&self) -> Result<Vec<JobReport>> {
        self.config
            .jobs
            .iter()
            .map(|job| self.run_job(&job.name))
            .collect()
    }
}

fn prepare_job(
    job: &JobConfig,
    targets: Vec<PathBuf>,
    unreadable: Vec<UnreadableMatch>,
) -> PreparedJob {
    PreparedJob {
        job_name: job.name.clone(),
        marker: job.marker.clone(),
        mode: job.mode,
        replacements: job
            .replacement_list()
            .into_iter()
            .map(str::to_string)
            .collect(),
        targets,
        unreadable,
    }
}

/// Read, substitute, and write back one file.
fn process_file(path: &Path, job: &PreparedJob, dry_run: bool) -> FileOutcome {
    let content = match read_text(path) {
        Ok(content) => content,
        Err(FileError::NotFound(_)) => return FileOutcome::NotFound,
        Err(e) => {
            return FileOutcome::Failed {
                message: e.to_string(),
            }
        }
    };

    let (text, occurrences) = match substitute(&content, job) {
        Ok(result) => result,
        Err(e) => {
            return FileOutcome::Failed {
                message: e.to_string(),
            }
        }
    };

    if occurrences == 0 {
        return FileOutcome::Unchanged;
    }

    if !dry_run {
        if let Err(e) = write_text(path, &text) {
            return FileOutcome::Failed {
                message: e.to_string(),
            };
        }
    }

    FileOutcome::Updated { occurrences }
}

/// Run the engine, returning the new text and occurrence count.
///
/// Literal jobs carry a one-element replacement list, so one cyclic pass
/// covers both modes.
fn substitute(content: &str, job: &PreparedJob) -> Result<(String, usize), SubstituteError> {
    substitute_cyclic(content, &job.marker, job.replacements.as_slice())
        .map(|s| (s.text, s.occurrences_replaced))
}
