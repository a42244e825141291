use crate::engine::error::ReaderError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("EPUB parse error: {0}")]
    EpubParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No readable text in {0}")]
    EmptyDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Read error: {0}")]
    Read(ReaderError),
}

impl From<ReaderError> for LoadError {
    fn from(err: ReaderError) -> Self {
        match err {
            ReaderError::EmptyFile(path) => LoadError::EmptyDocument(path.display().to_string()),
            ReaderError::Io(io) => LoadError::Io(io),
            other => LoadError::Read(other),
        }
    }
}

/// Raw text pulled from some source, ready for `Session::set_content`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub text: String,
    pub source: String,
}

impl LoadedDocument {
    fn new(text: String, source: String) -> Result<Self, LoadError> {
        if text.trim().is_empty() {
            return Err(LoadError::EmptyDocument(source));
        }
        Ok(Self { text, source })
    }
}

pub mod clipboard;
pub mod demo;
pub mod epub;
pub mod pdf;
pub mod text;

/// Picks a loader from the file extension; anything that is not PDF or EPUB
/// is read as plain UTF-8 text.
pub fn load_path(path: &str) -> Result<LoadedDocument, LoadError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => pdf::load(path),
        Some("epub") => epub::load(path),
        Some("txt") | Some("md") | Some("text") | None => text::load(path),
        Some(other) => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}
