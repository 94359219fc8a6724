//! Recast - cyclic find-and-replace across text files
//!
//! CLI entry point.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use recast::cli::{render_run_summary, JobDisplay};
use recast::job::config::RecastConfig;
use recast::job::runner::{JobReport, JobRunner};
use recast::log::jsonl::JsonlLogger;

/// Cyclic find-and-replace across text files
///
/// Runs the jobs declared in recast.toml: each job replaces a literal marker
/// in its target files, either rotating through a replacement list or
/// swapping in a single fixed string.
#[derive(Parser, Debug)]
#[command(name = "recast", version, about)]
struct Cli {
    /// Path to the recast.toml configuration file
    #[arg(long, default_value = "recast.toml")]
    config: PathBuf,

    /// Job to run (repeatable). Runs every job when omitted.
    #[arg(long = "job", value_name = "NAME")]
    jobs: Vec<String>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Directory for log files (.recast by default)
    #[arg(long, default_value = ".recast")]
    log_dir: PathBuf,
}

/// Pick the jobs to run: the requested ones, or all of them in config order.
fn select_jobs(config: &RecastConfig, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(config.jobs.iter().map(|j| j.name.clone()).collect());
    }

    requested
        .iter()
        .map(|name| {
            config.get_job(name).map(|j| j.name.clone()).with_context(|| {
                format!(
                    "Unknown job '{name}'. Available jobs: {}",
                    available_job_names(config)
                )
            })
        })
        .collect()
}

/// Format available job names for error messages.
fn available_job_names(config: &RecastConfig) -> String {
    config
        .jobs
        .iter()
        .map(|j| j.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Jobs that ran, plus how many jobs or log writes went wrong along the way
#[derive(Debug, Default)]
struct RunSummary {
    reports: Vec<JobReport>,
    errors: usize,
}

impl RunSummary {
    fn is_success(&self) -> bool {
        self.errors == 0 && self.reports.iter().all(JobReport::is_success)
    }
}

/// Run each job in turn. A job that cannot start, or whose log write fails,
/// is reported and counted; the remaining jobs still run.
fn run_jobs(runner: &JobRunner, logger: &JsonlLogger, jobs: &[String]) -> RunSummary {
    let mut summary = RunSummary::default();

    for job_name in jobs {
        match run_job_displayed(runner, job_name) {
            Ok(report) => {
                if let Err(e) = logger
                    .append_report(&report)
                    .context("Failed to write to JSONL log")
                {
                    eprintln!("  {} {e:#}", "⚠".yellow().bold());
                    summary.errors += 1;
                }
                summary.reports.push(report);
            }
            Err(e) => {
                eprintln!("  {} {e:#}", "✗".red().bold());
                summary.errors += 1;
            }
        }
    }

    summary
}

/// Run one job with live display.
fn run_job_displayed(runner: &JobRunner, job_name: &str) -> Result<JobReport> {
    let dry_run = runner.is_dry_run();
    let display = JobDisplay::new(job_name, dry_run);
    let description = runner
        .config()
        .get_job(job_name)
        .map(|j| j.description.as_str())
        .unwrap_or_default();

    display.print_header(description);
    let report = runner
        .run_job_with(job_name, |file| display.render_file(file))
        .with_context(|| format!("Failed to run job '{job_name}'"))?;
    display.render_summary(&report);

    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RecastConfig::from_path(&cli.config)
        .with_context(|| format!("Failed to load config from '{}'", cli.config.display()))?;
    let jobs = select_jobs(&config, &cli.jobs)?;

    let runner = JobRunner::new(config).with_dry_run(cli.dry_run);
    let logger = JsonlLogger::new(&cli.log_dir).context("Failed to initialize JSONL logger")?;

    let summary = run_jobs(&runner, &logger, &jobs);
    render_run_summary(&summary.reports);

    if summary.is_success() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
