//! JSONL (JSON Lines) run log
//!
//! Provides append-only logging of per-file outcomes to `.recast/log.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::job::runner::{FileOutcome, FileReport, JobReport};

/// One processed file, as recorded in the run log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunEntry {
    /// When the file was processed
    pub timestamp: DateTime<Utc>,
    /// Name of the job that processed it
    pub job: String,
    /// Path of the target file
    pub path: String,
    /// What happened to the file
    pub outcome: FileOutcome,
    /// Whether the run was a dry run (no writes)
    #[serde(default)]
    pub dry_run: bool,
}

impl RunEntry {
    /// Build a log entry for one file of a job
    #[must_use]
    pub fn from_report(job: &str, file: &FileReport, dry_run: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            job: job.to_string(),
            path: file.path.to_string_lossy().to_string(),
            outcome: file.outcome.clone(),
            dry_run,
        }
    }
}

/// JSONL logger for run history
///
/// Provides append-only logging to `.recast/log.jsonl`.
/// Each line is a JSON object describing one processed file.
pub struct JsonlLogger {
    log_path: PathBuf,
}

impl JsonlLogger {
    /// Create a new JSONL logger
    ///
    /// # Arguments
    /// * `log_dir` - Directory where log.jsonl will be stored (typically `.recast`)
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log.jsonl");

        Ok(Self { log_path })
    }

    /// Append a single entry to the log
    ///
    /// # Errors
    /// Returns an error if:
    /// - The log file cannot be opened or created
    /// - The entry cannot be serialized to JSON
    /// - Writing to the file fails
    pub fn append(&self, entry: &RunEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json = serde_json::to_string(entry).context("Failed to serialize run entry to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Append one entry per file of a job report
    pub fn append_report(&self, report: &JobReport) -> Result<()> {
        for file in &report.files {
            self.append(&RunEntry::from_report(&report.job, file, report.dry_run))?;
        }
        Ok(())
    }

    /// Read all entries from the log
    ///
    /// # Returns
    /// A vector of all entries, in chronological order
    ///
    /// # Errors
    /// Returns an error if:
    /// - The log file cannot be read
    /// - Any line cannot be parsed as valid JSON
    pub fn read_all(&self) -> Result<Vec<RunEntry>> {
        // If log file doesn't exist yet, return empty vector
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        let mut entries = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry: RunEntry = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
