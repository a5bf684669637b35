//! File helpers for writing the profile document.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;

/// Replace `path` with `content`.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a half-written file.
/// Missing parent directories are created first.
pub fn write_replacing(path: &Path, content: &[u8]) -> Result<(), io::Error> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(content)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Create `path` with `content` only when nothing exists there yet.
///
/// Returns `false` without touching the file when it already exists.
pub fn write_new(path: &Path, content: &[u8]) -> Result<bool, io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(mut file) => {
            file.write_all(content)?;
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(err),
    }
}
