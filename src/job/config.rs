//! Job configuration parser
//!
//! Parses `recast.toml` into structured job definitions.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// How a job turns marker occurrences into replacement text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobMode {
    /// Occurrences take successive entries from `replacements`, wrapping around
    Cyclic,
    /// Every occurrence becomes the single `replacement` string
    Literal,
}

/// Global configuration shared across all jobs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Directory that relative file paths and patterns are resolved against.
    /// Defaults to the directory containing the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

/// A single substitution job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobConfig {
    /// Unique name for this job
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Literal text to search for
    pub marker: String,
    /// Substitution mode
    #[serde(default = "default_mode")]
    pub mode: JobMode,
    /// Ordered replacement list for cyclic jobs
    #[serde(default)]
    pub replacements: Vec<String>,
    /// Replacement string for literal jobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// Explicit target files, processed in listed order
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Glob pattern selecting additional target files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

const fn default_mode() -> JobMode {
    JobMode::Cyclic
}

impl JobConfig {
    /// The replacement list this job feeds to the substitution engine.
    ///
    /// Literal jobs yield a one-element list, cyclic jobs their configured list.
    #[must_use]
    pub fn replacement_list(&self) -> Vec<&str> {
        match self.mode {
            JobMode::Cyclic => self.replacements.iter().map(String::as_str).collect(),
            JobMode::Literal => self.replacement.as_deref().into_iter().collect(),
        }
    }
}

/// Top-level configuration parsed from recast.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecastConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Job definitions
    #[serde(rename = "job")]
    pub jobs: Vec<JobConfig>,
}

impl RecastConfig {
    /// Parse a recast.toml file from a path
    ///
    /// When `[global].base_dir` is unset it is filled in with the config
    /// file's parent directory; a relative `base_dir` is resolved against
    /// that same directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::parse(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new(""));
        config.global.base_dir = Some(match config.global.base_dir.take() {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => config_dir.join(dir),
            None => config_dir.to_path_buf(),
        });

        Ok(config)
    }

    /// Parse recast.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse recast.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Find a job by name
    #[must_use]
    pub fn get_job(&self, name: &str) -> Option<&JobConfig> {
        self.jobs.iter().find(|j| j.name == name)
    }

    /// Directory relative targets are resolved against
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.global
            .base_dir
            .as_deref()
            .unwrap_or(Path::new(""))
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.jobs.is_empty() {
            bail!("Configuration defines no jobs");
        }

        // Check for duplicate job names
        let mut seen = HashSet::new();
        for job in &self.jobs {
            if !seen.insert(&job.name) {
                bail!("Duplicate job name: '{}'", job.name);
            }
        }

        for job in &self.jobs {
            validate_job(job).with_context(|| format!("in job '{}'", job.name))?;
        }

        Ok(())
    }
}

/// Validate a single job definition.
fn validate_job(job: &JobConfig) -> Result<()> {
    if job.name.trim().is_empty() {
        bail!("Job name cannot be empty");
    }

    if job.marker.is_empty() {
        bail!("Invalid job '{}': marker cannot be empty", job.name);
    }

    match job.mode {
        JobMode::Cyclic => {
            if job.replacements.is_empty() {
                bail!(
                    "Invalid job '{}': cyclic mode needs at least one entry in 'replacements'",
                    job.name
                );
            }
        }
        JobMode::Literal => {
            if job.replacement.is_none() {
                bail!(
                    "Invalid job '{}': literal mode needs a 'replacement' string",
                    job.name
                );
            }
        }
    }

    if job.files.is_empty() && job.pattern.is_none() {
        bail!(
            "Invalid job '{}': expected 'files', 'pattern', or both",
            job.name
        );
    }

    if let Some(pattern) = &job.pattern {
        glob::Pattern::new(pattern)
            .with_context(|| format!("Invalid job '{}': bad glob pattern '{pattern}'", job.name))?;
    }

    Ok(())
}
