pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod timer;

pub use config::{MusicType, ReadingSettings, SettingsPatch};
pub use error::ReaderError;
pub use session::Session;
pub use storage::{JsonSettingsStore, MemorySettingsStore, SettingsStore};
pub use timer::{DeadlineTimer, ManualTimer, Timer, TimerHandle};
