//! Raw response persistence.
//!
//! Bodies are stored verbatim as UTF-8 so a later run can re-analyse them
//! with `--input` without touching the network.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::QuakeError;

/// Default file name for the persisted response.
pub const DEFAULT_RAW_PATH: &str = "earthquakes_data.json";

/// Write `body` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`QuakeError::Persistence`] if the file cannot be written.
pub fn persist_raw(path: &Path, body: &str) -> Result<(), QuakeError> {
    let wrap = |source| QuakeError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, body.as_bytes()).map_err(wrap)?;

    debug!("saved {} bytes to {}", body.len(), path.display());
    Ok(())
}

/// Read a previously persisted body.
///
/// # Errors
///
/// Returns [`QuakeError::Persistence`] if the file is missing or not UTF-8.
pub fn load_raw(path: &Path) -> Result<String, QuakeError> {
    fs::read_to_string(path).map_err(|source| QuakeError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}
