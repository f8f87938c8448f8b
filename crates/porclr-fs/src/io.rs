//! Create-only I/O operations
//!
//! Every operation here refuses to replace an existing entry. An entry that
//! is already present is reported as `Ok(false)` so callers can treat it as
//! "already synchronized" rather than as a failure.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Ensure `path` exists as a directory.
///
/// Returns `true` if the directory was created by this call and `false` if it
/// already existed. The parent must already exist. A non-directory entry at
/// `path` is an error.
pub fn ensure_dir(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();

    match fs::create_dir(&native_path) {
        Ok(()) => {
            tracing::debug!(path = %path, "created directory");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists && native_path.is_dir() => Ok(false),
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Create a hard link at `dest` pointing to `source`.
///
/// Returns `false` without touching anything if `dest` already exists.
pub fn link_new(source: &NormalizedPath, dest: &NormalizedPath) -> Result<bool> {
    match fs::hard_link(source.to_native(), dest.to_native()) {
        Ok(()) => {
            tracing::debug!(source = %source, dest = %dest, "created hard link");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(Error::Link {
            source_path: source.to_native(),
            dest: dest.to_native(),
            source: e,
        }),
    }
}

/// Write `content` to a new file at `path`.
///
/// The file is opened with create-new semantics and written under an
/// exclusive advisory lock. Returns `false` if the file already exists. If
/// the write fails part way, the partial file is removed so a later run does
/// not mistake it for a complete artifact.
pub fn write_new(path: &NormalizedPath, content: &[u8]) -> Result<bool> {
    let native_path = path.to_native();

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&native_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Error::io(native_path, e)),
    };

    let written = file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })
        .and_then(|()| {
            file.write_all(content)
                .and_then(|()| file.sync_all())
                .map_err(|e| Error::io(&native_path, e))
        });

    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = fs::remove_file(&native_path) {
            tracing::warn!(path = %path, error = %cleanup, "failed to remove partial file");
        }
        return Err(e);
    }

    // Also released on drop.
    FileExt::unlock(&file).map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    Ok(true)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
