// Settings persistence. Only `ReadingSettings` is ever stored; tokens,
// timings and position are rebuilt from freshly supplied text.

use crate::engine::config::ReadingSettings;
use crate::engine::error::ReaderError;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const SETTINGS_FILENAME: &str = "settings.json";
const APP_FOLDER: &str = "flashread";

pub trait SettingsStore {
    /// Returns the stored settings, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<ReadingSettings>, ReaderError>;

    fn save(&mut self, settings: &ReadingSettings) -> Result<(), ReaderError>;
}

/// Stores settings as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/flashread/settings.json`
    pub fn default_location() -> Result<Self, ReaderError> {
        let base = dirs::config_dir().ok_or(ReaderError::ConfigDirUnavailable)?;
        Ok(Self::new(base.join(APP_FOLDER).join(SETTINGS_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Option<ReadingSettings>, ReaderError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let settings: ReadingSettings = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "settings loaded");
        Ok(Some(settings.normalized()))
    }

    fn save(&mut self, settings: &ReadingSettings) -> Result<(), ReaderError> {
        let json = serde_json::to_string_pretty(settings)?;
        atomic_write(&self.path, &json)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Keeps settings in memory; useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Option<ReadingSettings>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ReadingSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Option<ReadingSettings>, ReaderError> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &ReadingSettings) -> Result<(), ReaderError> {
        self.settings = Some(settings.clone());
        Ok(())
    }
}

/// Writes through a temp file in the target directory, then renames over the target.
fn atomic_write(target: &Path, content: &str) -> io::Result<()> {
    let parent = target
        .parent()
        .ok_or_else(|| io::Error::new(ErrorKind::InvalidInput, "target has no parent"))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    std::fs::write(temp.path(), content)?;
    temp.persist(target)?;
    Ok(())
}
