//! Idempotent file helpers.

use std::fs::{self, FileTimes, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Creates `path` if absent and sets its access and modification times to now.
///
/// Existing content is left untouched.
pub fn touch(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::io("open", path, e))?;
    let now = SystemTime::now();
    file.set_times(FileTimes::new().set_accessed(now).set_modified(now))
        .map_err(|e| Error::io("set times on", path, e))
}

/// Deletes `path`. A missing file counts as success.
pub fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io("remove", path, e)),
    }
}

/// True when `path` names a regular file with at least one byte of content.
#[must_use]
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return false;
    }
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}
