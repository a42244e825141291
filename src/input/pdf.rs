use super::{LoadError, LoadedDocument};
use std::path::Path;

/// Load text from a PDF file using the pdf-extract crate.
pub fn load(path: &str) -> Result<LoadedDocument, LoadError> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let buffer = std::fs::read(path).map_err(|e| LoadError::PdfParse(e.to_string()))?;

    let text = pdf_extract::extract_text_from_mem(&buffer)
        .map_err(|e| LoadError::PdfParse(e.to_string()))?;

    LoadedDocument::new(text, format!("pdf:{}", path.display()))
}
