//! CLI display for job execution
//!
//! Renders per-file outcomes and job totals as human-readable terminal
//! output. All output goes to stderr so stdout remains clean for piping.

use std::path::Path;

use colored::Colorize;

use crate::job::runner::{FileOutcome, FileReport, JobReport};

/// Display handler for a single job's output
pub struct JobDisplay {
    job_name: String,
    dry_run: bool,
}

impl JobDisplay {
    /// Create a new display handler for the given job
    #[must_use]
    pub fn new(job_name: &str, dry_run: bool) -> Self {
        Self {
            job_name: job_name.to_string(),
            dry_run,
        }
    }

    /// Print the job header at the start of execution
    pub fn print_header(&self, description: &str) {
        let title = if self.dry_run {
            format!("Job: {} (dry run)", self.job_name)
        } else {
            format!("Job: {}", self.job_name)
        };
        eprintln!("\n{} {}", "===".bold().cyan(), title.bold().cyan());
        if !description.is_empty() {
            eprintln!("  {}", description.dimmed());
        }
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Render one processed file to stderr
    pub fn render_file(&self, file: &FileReport) {
        let name = display_name(&file.path);
        match &file.outcome {
            FileOutcome::Updated { .. } => {
                eprintln!(
                    "  {} {} {}",
                    "✓".green().bold(),
                    name,
                    describe_outcome(&file.outcome, self.dry_run).dimmed()
                );
            }
            FileOutcome::Unchanged => {
                eprintln!(
                    "  {} {} {}",
                    "·".dimmed(),
                    name,
                    describe_outcome(&file.outcome, self.dry_run).dimmed()
                );
            }
            FileOutcome::NotFound => {
                eprintln!(
                    "  {} {}",
                    "✗".yellow().bold(),
                    format!("File not found: {}", file.path.display()).yellow()
                );
            }
            FileOutcome::Failed { message } => {
                eprintln!("  {} {}", "✗".red().bold(), message.red());
            }
        }
    }

    /// Render the post-job summary
    pub fn render_summary(&self, report: &JobReport) {
        eprintln!("{}", "─".repeat(50).dimmed());

        let status = if report.is_success() {
            "COMPLETED".green().bold().to_string()
        } else {
            "FAILED".red().bold().to_string()
        };
        eprintln!("  {} {}", status, self.job_name.bold());
        eprintln!("  {} {}", "Stats:".dimmed(), summary_line(report));
        eprintln!();
    }
}

/// Print the grand total across every job that ran
pub fn render_run_summary(reports: &[JobReport]) {
    let updated: usize = reports.iter().map(JobReport::updated_count).sum();
    let occurrences: usize = reports.iter().map(JobReport::occurrences_replaced).sum();
    let failed: usize = reports.iter().map(JobReport::failed_count).sum();

    let verb = if reports.iter().any(|r| r.dry_run) {
        "would be updated"
    } else {
        "updated"
    };
    eprintln!(
        "{} {updated} file(s) {verb}, {occurrences} occurrence(s) replaced",
        "Total:".bold()
    );
    if failed > 0 {
        eprintln!("  {} {failed} file(s) failed", "⚠".yellow().bold());
    }
}

/// One-line description of a file outcome, without styling
#[must_use]
pub fn describe_outcome(outcome: &FileOutcome, dry_run: bool) -> String {
    match outcome {
        FileOutcome::Updated { occurrences } if dry_run => {
            format!("would replace {occurrences} occurrence(s)")
        }
        FileOutcome::Updated { occurrences } => format!("replaced {occurrences} occurrence(s)"),
        FileOutcome::Unchanged => "no occurrences found".to_string(),
        FileOutcome::NotFound => "file not found".to_string(),
        FileOutcome::Failed { message } => format!("failed: {message}"),
    }
}

/// Per-job counts, without styling
#[must_use]
pub fn summary_line(report: &JobReport) -> String {
    format!(
        "{} updated | {} unchanged | {} not found | {} failed | {} occurrence(s)",
        report.updated_count(),
        report.unchanged_count(),
        report.not_found_count(),
        report.failed_count(),
        report.occurrences_replaced()
    )
}

/// Show just the file name, falling back to the full path
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(outcomes: Vec<FileOutcome>) -> JobReport {
        JobReport {
            job: "authors".to_string(),
            dry_run: false,
            files: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, outcome)| FileReport {
                    path: PathBuf::from(format!("site/index-{i}.html")),
                    outcome,
                })
                .collect(),
        }
    }

    #[test]
    fn test_new_display() {
        let display = JobDisplay::new("authors", true);
        assert_eq!(display.job_name, "authors");
        assert!(display.dry_run);
    }

    #[test]
    fn test_describe_updated() {
        let outcome = FileOutcome::Updated { occurrences: 3 };
        assert_eq!(describe_outcome(&outcome, false), "replaced 3 occurrence(s)");
        assert_eq!(
            describe_outcome(&outcome, true),
            "would replace 3 occurrence(s)"
        );
    }

    #[test]
    fn test_describe_other_outcomes() {
        assert_eq!(
            describe_outcome(&FileOutcome::Unchanged, false),
            "no occurrences found"
        );
        assert_eq!(
            describe_outcome(&FileOutcome::NotFound, false),
            "file not found"
        );
        assert_eq!(
            describe_outcome(
                &FileOutcome::Failed {
                    message: "denied".to_string()
                },
                false
            ),
            "failed: denied"
        );
    }

    #[test]
    fn test_summary_line_counts() {
        let report = report(vec![
            FileOutcome::Updated { occurrences: 2 },
            FileOutcome::Updated { occurrences: 5 },
            FileOutcome::Unchanged,
            FileOutcome::NotFound,
        ]);
        assert_eq!(
            summary_line(&report),
            "2 updated | 1 unchanged | 1 not found | 0 failed | 7 occurrence(s)"
        );
    }

    #[test]
    fn test_display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("site/index.html")), "index.html");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    // Rendering must not panic for any outcome
    #[test]
    fn test_render_all_outcomes_no_panic() {
        let display = JobDisplay::new("authors", false);
        let report = report(vec![
            FileOutcome::Updated { occurrences: 1 },
            FileOutcome::Unchanged,
            FileOutcome::NotFound,
            FileOutcome::Failed {
                message: "I/O error".to_string(),
            },
        ]);

        display.print_header("Rotate placeholder authors");
        for file in &report.files {
            display.render_file(file);
        }
        display.render_summary(&report);
        render_run_summary(&[report]);
    }
}
