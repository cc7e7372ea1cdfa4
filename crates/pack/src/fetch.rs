use std::path::Path;

use foam_types::{FoamError, Result};

/// Read a whole scene file into memory.
pub fn fetch_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| FoamError::Fetch {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}
