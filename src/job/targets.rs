//! Target file resolution
//!
//! Turns a job's explicit `files` list and `pattern` glob into the ordered
//! list of paths the runner will visit.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::job::config::JobConfig;

/// A path the glob walk could not read (for example an unreadable directory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableMatch {
    /// Path that could not be read
    pub path: PathBuf,
    /// Error description
    pub message: String,
}

/// Files a job should visit, plus anything the glob walk had to skip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    /// Files to process, in order
    pub files: Vec<PathBuf>,
    /// Glob entries that could not be read; the rest of the walk continues
    pub unreadable: Vec<UnreadableMatch>,
}

/// Resolve the files a job should process.
///
/// Explicit `files` come first in listed order, followed by glob matches in
/// sorted order. Relative entries are joined onto `base_dir`. Explicit files
/// are kept even if they do not exist so the runner can report them;
/// directories matched by the glob are skipped. Duplicates are dropped, the
/// first occurrence wins.
///
/// Only an invalid pattern is an error. Entries the walk cannot read are
/// collected in [`Targets::unreadable`].
pub fn resolve_targets(job: &JobConfig, base_dir: &Path) -> Result<Targets> {
    let mut seen = HashSet::new();
    let mut targets = Targets::default();

    for file in &job.files {
        let path = anchor(base_dir, file);
        if seen.insert(path.clone()) {
            targets.files.push(path);
        }
    }

    if let Some(pattern) = &job.pattern {
        for entry in glob_entries(base_dir, pattern)? {
            match entry {
                Ok(path) => {
                    if path.is_file() && seen.insert(path.clone()) {
                        targets.files.push(path);
                    }
                }
                Err(unreadable) => targets.unreadable.push(unreadable),
            }
        }
    }

    Ok(targets)
}

/// Join `path` onto `base_dir` unless it is already absolute.
fn anchor(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Expand a glob pattern relative to `base_dir`.
fn glob_entries(
    base_dir: &Path,
    pattern: &str,
) -> Result<impl Iterator<Item = Result<PathBuf, UnreadableMatch>>> {
    // The base directory is matched literally, only `pattern` carries wildcards
    let escaped_base = glob::Pattern::escape(&base_dir.to_string_lossy());
    let anchored = anchor(Path::new(&escaped_base), Path::new(pattern));

    let paths = glob::glob(&anchored.to_string_lossy())
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    Ok(paths.map(|entry| {
        entry.map_err(|e| UnreadableMatch {
            path: e.path().to_path_buf(),
            message: e.error().to_string(),
        })
    }))
}
