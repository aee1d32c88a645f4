//! Tile and manifest output

use std::io::Write;
use std::path::Path;

pub mod manifest;
pub mod path;

pub use manifest::Manifest;
pub use path::TilePathBuilder;

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Write `contents` to `path` so readers see either the old file or the whole new one.
///
/// The data goes to a temporary file in the destination directory, which is then
/// renamed over `path`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> OutputResult<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = tempfile::NamedTempFile::new_in(parent_dir)
        .map_err(|e| OutputError::IoError(format!("Failed to create temp file: {e}")))?;

    temp_file
        .write_all(contents)
        .map_err(|e| OutputError::IoError(format!("Failed to write temp file: {e}")))?;
    temp_file
        .flush()
        .map_err(|e| OutputError::IoError(format!("Failed to flush temp file: {e}")))?;

    temp_file.persist(path).map_err(|e| {
        OutputError::IoError(format!("Failed to persist {}: {}", path.display(), e.error))
    })?;

    Ok(())
}
