use crate::engine::config::SettingsPatch;

/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    LoadClipboard,
    LoadDemo,
    Clear,
    UpdateSettings(SettingsPatch),
    /// Jump to a 1-based word position, snapped to its chunk.
    Goto(usize),
    Quit,
    Help,
    InvalidCommand(String),
    None,
}
