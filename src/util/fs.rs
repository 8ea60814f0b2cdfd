//! Filesystem access annotated with the paths involved.

use crate::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;

/// The prefix of the hidden staging files created by [`write_atomic`].
const STAGING_PREFIX: &str = ".iconforge-";

/// Reads the entire contents of a file.
pub fn read(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Replaces the contents of the file at `path` with `contents`.
///
/// The contents are first written to a uniquely named hidden file in the same directory which is then renamed to `path`.
/// Readers of `path` observe either the previous file or the complete new file, never a truncated one.
/// The staging file is removed if any step fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(x) if !x.as_os_str().is_empty() => x,
        _ => Path::new("."),
    };

    let mut staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(dir)
        .map_err(|e| Error::io(path, e))?;
    log::trace!("staging {} at {}", path.display(), staging.path().display());

    staging
        .write_all(contents)
        .and_then(|_| staging.flush())
        .map_err(|e| Error::io(path, e))?;
    staging.persist(path).map_err(|e| Error::io(path, e.error))?;

    Ok(())
}
