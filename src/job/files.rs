//! File reading and atomic writing
//!
//! Target files are read whole as UTF-8 and written back via a temp file and
//! rename, so a reader sees either the old content or the full new content.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from reading or writing a target file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The target path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other I/O failure (permissions, invalid UTF-8, rename failure, ...).
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            FileError::NotFound(path.to_path_buf())
        } else {
            FileError::io(path, e)
        }
    })
}

/// Atomically replace a file's content (write to temp, then rename).
///
/// Symlinks are followed, so the file they point at is the one replaced.
/// The temp file sits next to that real file so the rename stays on one
/// filesystem, and it takes over the original's permissions. A read-only
/// target is refused with `PermissionDenied`. The temp file is removed if
/// any step after creating it fails.
pub fn write_text(path: &Path, text: &str) -> Result<(), FileError> {
    let target = match fs::canonicalize(path) {
        Ok(real) => real,
        Err(e) if e.kind() == io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(FileError::io(path, e)),
    };

    let permissions = match fs::metadata(&target) {
        Ok(meta) if meta.permissions().readonly() => {
            return Err(FileError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
            ));
        }
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(FileError::io(path, e)),
    };

    let tmp_path = temp_path_for(&target);
    fs::write(&tmp_path, text.as_bytes()).map_err(|e| FileError::io(&tmp_path, e))?;

    let persisted = permissions
        .map_or(Ok(()), |perms| fs::set_permissions(&tmp_path, perms))
        .and_then(|()| fs::rename(&tmp_path, &target));
    if let Err(e) = persisted {
        let _ = fs::remove_file(&tmp_path);
        return Err(FileError::io(path, e));
    }

    Ok(())
}

/// `index.html` -> `index.html.recast.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".recast.tmp");
    path.with_file_name(name)
}
