// Reading settings and the typed partial-update used to change them.
// Defaults and slider bounds follow the reader's settings panel.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed WPM range for the speed controls.
pub const WPM_RANGE: RangeInclusive<u32> = 100..=1500;
pub const WPM_STEP: u32 = 50;

/// Punctuation pause range in milliseconds.
pub const PUNCTUATION_SLOWDOWN_RANGE: RangeInclusive<u32> = 0..=200;
pub const PUNCTUATION_SLOWDOWN_STEP: u32 = 10;

/// Chunk sizes offered by the settings panel.
pub const CHUNK_SIZES: RangeInclusive<usize> = 1..=3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicType {
    #[default]
    None,
    Jazz,
    Baroque,
}

/// Reading configuration consumed by the scheduler.
///
/// Only `wpm`, the training fields, `chunk_size` and `punctuation_slowdown`
/// affect the engine; the rest is carried for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingSettings {
    /// Words per minute when training mode is off (default 300)
    pub wpm: u32,

    pub training_mode_enabled: bool,

    /// Training ramp bounds; either order is accepted (default 300 → 600)
    pub training_start_wpm: u32,
    pub training_end_wpm: u32,

    /// Words flashed at once, never below 1 (default 1)
    pub chunk_size: usize,

    /// Extra milliseconds for tokens carrying punctuation (default 50)
    pub punctuation_slowdown: u32,

    pub font_size: f32,
    pub orp_enabled: bool,
    pub serif_font: bool,
    pub music_type: MusicType,
    pub theme: String,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            wpm: 300,
            training_mode_enabled: false,
            training_start_wpm: 300,
            training_end_wpm: 600,
            chunk_size: 1,
            punctuation_slowdown: 50,
            font_size: 2.0,
            orp_enabled: true,
            serif_font: false,
            music_type: MusicType::None,
            theme: "light".to_string(),
        }
    }
}

/// Partial update of [`ReadingSettings`]; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub wpm: Option<u32>,
    pub training_mode_enabled: Option<bool>,
    pub training_start_wpm: Option<u32>,
    pub training_end_wpm: Option<u32>,
    pub chunk_size: Option<usize>,
    pub punctuation_slowdown: Option<u32>,
    pub font_size: Option<f32>,
    pub orp_enabled: Option<bool>,
    pub serif_font: Option<bool>,
    pub music_type: Option<MusicType>,
    pub theme: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn wpm(wpm: u32) -> Self {
        Self {
            wpm: Some(wpm),
            ..Self::default()
        }
    }

    pub fn chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: Some(chunk_size),
            ..Self::default()
        }
    }

    pub fn training(enabled: bool) -> Self {
        Self {
            training_mode_enabled: Some(enabled),
            ..Self::default()
        }
    }
}

impl ReadingSettings {
    /// Returns a copy with `patch` applied. A chunk size below 1 is coerced to 1.
    pub fn merge(&self, patch: &SettingsPatch) -> ReadingSettings {
        let merged = ReadingSettings {
            wpm: patch.wpm.unwrap_or(self.wpm),
            training_mode_enabled: patch
                .training_mode_enabled
                .unwrap_or(self.training_mode_enabled),
            training_start_wpm: patch.training_start_wpm.unwrap_or(self.training_start_wpm),
            training_end_wpm: patch.training_end_wpm.unwrap_or(self.training_end_wpm),
            chunk_size: patch.chunk_size.unwrap_or(self.chunk_size),
            punctuation_slowdown: patch
                .punctuation_slowdown
                .unwrap_or(self.punctuation_slowdown),
            font_size: patch.font_size.unwrap_or(self.font_size),
            orp_enabled: patch.orp_enabled.unwrap_or(self.orp_enabled),
            serif_font: patch.serif_font.unwrap_or(self.serif_font),
            music_type: patch.music_type.unwrap_or(self.music_type),
            theme: patch.theme.clone().unwrap_or_else(|| self.theme.clone()),
        };
        merged.normalized()
    }

    /// Coerces fields the engine cannot run with. Only `chunk_size` needs it;
    /// a zero WPM is floored by the scheduler instead.
    pub fn normalized(mut self) -> ReadingSettings {
        self.chunk_size = self.chunk_size.max(1);
        self
    }

    /// Effective training ramp as `(slow, fast)`, whatever order the bounds were given in.
    pub fn training_range(&self) -> (u32, u32) {
        let start = self.training_start_wpm.min(self.training_end_wpm);
        let end = self.training_start_wpm.max(self.training_end_wpm);
        (start, end)
    }

    /// `wpm + delta`, clamped to [`WPM_RANGE`].
    pub fn stepped_wpm(&self, delta: i32) -> u32 {
        let new_wpm = self.wpm as i64 + delta as i64;
        new_wpm.clamp(*WPM_RANGE.start() as i64, *WPM_RANGE.end() as i64) as u32
    }

    /// Whether the focus guides and pivot highlight should be drawn.
    pub fn shows_focus_guides(&self) -> bool {
        self.chunk_size == 1 && self.orp_enabled
    }
}
