use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config directory not available")]
    ConfigDirUnavailable,

    #[error("File is empty: {}", .0.display())]
    EmptyFile(PathBuf),
}

/// Reads a text file, dropping a leading byte-order mark and rejecting files
/// that hold nothing but whitespace.
pub fn load_file_safe(path: impl AsRef<Path>) -> Result<String, ReaderError> {
    let path = path.as_ref();
    let mut content = std::fs::read_to_string(path)?;
    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }

    if content.trim().is_empty() {
        return Err(ReaderError::EmptyFile(path.to_path_buf()));
    }

    Ok(content)
}
