//! Reading provider schema dumps from disk.
//!
//! The translator itself works on bytes already in memory; this is the I/O
//! edge used by the command-line tool.

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

/// Read a schema dump into memory.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist, or
/// `LoadError::ReadError` if it cannot be read.
pub fn load_document(path: &Path) -> Result<Vec<u8>, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded schema document");
    Ok(bytes)
}
