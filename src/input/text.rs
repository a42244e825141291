use super::{LoadError, LoadedDocument};
use crate::engine::error::load_file_safe;
use std::path::Path;

/// Load a plain UTF-8 text file.
pub fn load(path: &str) -> Result<LoadedDocument, LoadError> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let text = load_file_safe(path)?;

    LoadedDocument::new(text, format!("text:{}", path.display()))
}
