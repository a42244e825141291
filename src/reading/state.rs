use crate::engine::config::{ReadingSettings, SettingsPatch};
use crate::reading::timing::{effective_wpm, format_remaining, generate_timeline, schedule};
use crate::reading::tokenizer::tokenize_text;
use crate::reading::Token;

/// Playback phase derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Paused,
    Playing,
}

/// Tokens, their timings, the settings they were scheduled with, and the
/// playback position. Every transition rewrites these together, so a reader
/// never sees new tokens paired with stale timings.
#[derive(Debug, Clone, Default)]
pub struct ReadingState {
    raw_text: String,
    tokens: Vec<Token>,
    timings: Vec<f64>,
    settings: ReadingSettings,
    current_index: usize,
    is_playing: bool,
}

impl ReadingState {
    pub fn new(settings: ReadingSettings) -> Self {
        Self {
            settings: settings.normalized(),
            ..Self::default()
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn timings(&self) -> &[f64] {
        &self.timings
    }

    pub fn settings(&self) -> &ReadingSettings {
        &self.settings
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn chunk_size(&self) -> usize {
        self.settings.chunk_size.max(1)
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.tokens.is_empty() {
            PlaybackPhase::Idle
        } else if self.is_playing {
            PlaybackPhase::Playing
        } else {
            PlaybackPhase::Paused
        }
    }

    /// Replaces the content and every derived field; playback stops at the start.
    pub fn set_content(&mut self, text: &str) {
        let tokens = tokenize_text(text);
        let timings = schedule(&tokens, &self.settings);
        self.raw_text = text.to_string();
        self.tokens = tokens;
        self.timings = timings;
        self.current_index = 0;
        self.is_playing = false;
    }

    /// Merges `patch` into the settings and reschedules every token.
    ///
    /// Returns whether anything that drives playback timing changed
    /// (durations or chunk size).
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> bool {
        let settings = self.settings.merge(patch);
        let chunk_changed = settings.chunk_size != self.settings.chunk_size;
        self.settings = settings;

        if self.tokens.is_empty() {
            return chunk_changed;
        }

        let timings = schedule(&self.tokens, &self.settings);
        let timings_changed = timings != self.timings;
        self.timings = timings;
        debug_assert_eq!(self.timings.len(), self.tokens.len());
        timings_changed || chunk_changed
    }

    /// Starts playback. Without content there is nothing to play, so the flag stays off.
    pub fn play(&mut self) {
        if !self.tokens.is_empty() {
            self.is_playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_playback(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Moves to `index`, clamped into the token range. Playback flag is untouched.
    pub fn seek(&mut self, index: i64) {
        let last = self.tokens.len().saturating_sub(1) as i64;
        self.current_index = index.clamp(0, last) as usize;
    }

    /// Seeks to the start of the chunk containing `index` when chunks span several words.
    pub fn seek_snapped(&mut self, index: i64) {
        let chunk = self.chunk_size() as i64;
        let snapped = if chunk > 1 {
            index.max(0) / chunk * chunk
        } else {
            index
        };
        self.seek(snapped);
    }

    pub fn restart(&mut self) {
        self.seek(0);
    }

    pub fn skip_back(&mut self) {
        self.seek(self.current_index as i64 - self.chunk_size() as i64);
    }

    pub fn skip_forward(&mut self) {
        self.seek(self.current_index as i64 + self.chunk_size() as i64);
    }

    /// Steps to the next chunk. Past the end playback stops and the position holds.
    pub fn advance(&mut self) {
        let next_index = self.current_index + self.chunk_size();
        if next_index >= self.tokens.len() {
            self.is_playing = false;
        } else {
            self.current_index = next_index;
        }
    }

    /// Clears content and position.
    pub fn reset(&mut self) {
        self.raw_text.clear();
        self.tokens.clear();
        self.timings.clear();
        self.current_index = 0;
        self.is_playing = false;
    }

    fn chunk_end(&self) -> usize {
        (self.current_index + self.chunk_size()).min(self.tokens.len())
    }

    /// Tokens shown together at the current position.
    pub fn current_chunk(&self) -> &[Token] {
        if self.current_index >= self.tokens.len() {
            return &[];
        }
        &self.tokens[self.current_index..self.chunk_end()]
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current_index)
    }

    /// Summed duration of the current chunk. Missing timings count as zero.
    pub fn chunk_duration_ms(&self) -> f64 {
        (self.current_index..self.chunk_end())
            .map(|i| self.timings.get(i).copied().unwrap_or(0.0))
            .sum()
    }

    /// Whether a timer should be running: playing with a chunk to show.
    pub fn wants_tick(&self) -> bool {
        self.is_playing && self.current_index < self.tokens.len()
    }

    /// Time left from the current position to the end.
    pub fn time_remaining_ms(&self) -> f64 {
        self.timings
            .get(self.current_index..)
            .map(|rest| rest.iter().sum())
            .unwrap_or(0.0)
    }

    pub fn time_remaining_label(&self) -> String {
        format_remaining(self.time_remaining_ms())
    }

    /// Cumulative start time of every token.
    pub fn timeline(&self) -> Vec<f64> {
        generate_timeline(&self.timings)
    }

    /// Position as a percentage of the way to the last token.
    pub fn progress_percent(&self) -> f64 {
        if self.tokens.len() > 1 {
            self.current_index as f64 / (self.tokens.len() - 1) as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn position_label(&self) -> String {
        if self.tokens.is_empty() {
            "— / —".to_string()
        } else {
            format!("{} / {}", self.current_index + 1, self.tokens.len())
        }
    }

    /// Speed in effect at the current token, from the same ramp the scheduler uses.
    pub fn current_wpm(&self) -> f64 {
        effective_wpm(self.current_index, self.tokens.len(), &self.settings)
    }

    /// [`Self::current_wpm`] rounded for display.
    pub fn display_wpm(&self) -> u32 {
        self.current_wpm().round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

    fn loaded(text: &str) -> ReadingState {
        let mut state = ReadingState::new(ReadingSettings::default());
        state.set_content(text);
        state
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = ReadingState::new(ReadingSettings::default());
        assert_eq!(state.phase(), PlaybackPhase::Idle);
        assert_eq!(state.current_index(), 0);
        assert!(state.current_chunk().is_empty());
    }

    #[test]
    fn test_set_content_schedules_and_resets() {
        let mut state = loaded(TEN_WORDS);
        state.seek(5);
        state.play();

        state.set_content("fresh words here");
        assert_eq!(state.token_count(), 3);
        assert_eq!(state.timings().len(), 3);
        assert_eq!(state.current_index(), 0);
        assert!(!state.is_playing());
        assert_eq!(state.raw_text(), "fresh words here");
    }

    #[test]
    fn test_update_settings_reschedules() {
        let mut state = loaded(TEN_WORDS);
        assert!(state.update_settings(&SettingsPatch::wpm(600)));
        assert!(state.timings().iter().all(|&d| d == 100.0));
    }

    #[test]
    fn test_update_settings_empty_patch_is_idempotent() {
        let mut state = loaded(TEN_WORDS);
        state.seek(3);
        let tokens = state.tokens().to_vec();
        let timings = state.timings().to_vec();

        assert!(!state.update_settings(&SettingsPatch::default()));
        assert_eq!(state.tokens(), tokens.as_slice());
        assert_eq!(state.timings(), timings.as_slice());
        assert_eq!(state.current_index(), 3);
    }

    #[test]
    fn test_update_settings_without_content() {
        let mut state = ReadingState::new(ReadingSettings::default());
        state.update_settings(&SettingsPatch::wpm(500));
        assert_eq!(state.settings().wpm, 500);
        assert!(state.timings().is_empty());
    }

    #[test]
    fn test_display_fields_do_not_change_timing() {
        let mut state = loaded(TEN_WORDS);
        let patch = SettingsPatch {
            theme: Some("dark".to_string()),
            ..SettingsPatch::default()
        };
        assert!(!state.update_settings(&patch));
        assert_eq!(state.settings().theme, "dark");
    }

    #[test]
    fn test_play_on_empty_content_is_noop() {
        let mut state = ReadingState::new(ReadingSettings::default());
        state.play();
        assert!(!state.is_playing());
        assert!(!state.wants_tick());
    }

    #[test]
    fn test_toggle_playback() {
        let mut state = loaded(TEN_WORDS);
        state.toggle_playback();
        assert_eq!(state.phase(), PlaybackPhase::Playing);
        state.toggle_playback();
        assert_eq!(state.phase(), PlaybackPhase::Paused);
    }

    #[test]
    fn test_seek_clamps() {
        let mut state = loaded(TEN_WORDS);
        state.seek(-5);
        assert_eq!(state.current_index(), 0);
        state.seek(1000);
        assert_eq!(state.current_index(), 9);
    }

    #[test]
    fn test_seek_keeps_playing_flag() {
        let mut state = loaded(TEN_WORDS);
        state.play();
        state.seek(4);
        assert!(state.is_playing());
    }

    #[test]
    fn test_seek_on_empty_content() {
        let mut state = ReadingState::new(ReadingSettings::default());
        state.seek(7);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_seek_snapped_to_chunk_boundary() {
        let mut state = loaded(TEN_WORDS);
        state.update_settings(&SettingsPatch::chunk_size(3));
        state.seek_snapped(5);
        assert_eq!(state.current_index(), 3);
        state.seek_snapped(9);
        assert_eq!(state.current_index(), 9);
    }

    #[test]
    fn test_advance_by_chunk() {
        let mut state = loaded(TEN_WORDS);
        state.update_settings(&SettingsPatch::chunk_size(3));
        state.play();
        state.advance();
        assert_eq!(state.current_index(), 3);
        assert_eq!(state.current_chunk().len(), 3);
    }

    #[test]
    fn test_advance_past_end_stops_and_holds() {
        let mut state = loaded(TEN_WORDS);
        state.update_settings(&SettingsPatch::chunk_size(3));
        state.seek(9);
        state.play();
        state.advance();
        assert!(!state.is_playing());
        assert_eq!(state.current_index(), 9);
        assert_eq!(state.current_chunk().len(), 1);
    }

    #[test]
    fn test_advance_from_last_reachable_chunk_start() {
        let mut state = loaded(TEN_WORDS);
        state.update_settings(&SettingsPatch::chunk_size(4));
        state.seek(8);
        state.play();
        state.advance();
        assert!(!state.is_playing());
        assert_eq!(state.current_index(), 8);
    }

    #[test]
    fn test_skip_controls() {
        let mut state = loaded(TEN_WORDS);
        state.update_settings(&SettingsPatch::chunk_size(2));
        state.skip_forward();
        state.skip_forward();
        assert_eq!(state.current_index(), 4);
        state.skip_back();
        assert_eq!(state.current_index(), 2);
        state.skip_back();
        state.skip_back();
        assert_eq!(state.current_index(), 0);
        state.seek(9);
        state.skip_forward();
        assert_eq!(state.current_index(), 9);
        state.restart();
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = loaded(TEN_WORDS);
        state.seek(4);
        state.play();
        state.reset();
        assert_eq!(state.phase(), PlaybackPhase::Idle);
        assert!(state.tokens().is_empty());
        assert!(state.timings().is_empty());
        assert_eq!(state.raw_text(), "");
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_chunk_duration_sums_chunk() {
        let mut state = loaded("a b c d e");
        state.update_settings(&SettingsPatch::chunk_size(2));
        assert_eq!(state.chunk_duration_ms(), 400.0);
        state.seek(4);
        assert_eq!(state.chunk_duration_ms(), 200.0);
    }

    #[test]
    fn test_time_remaining() {
        let mut state = loaded(TEN_WORDS);
        assert_eq!(state.time_remaining_ms(), 2000.0);
        state.seek(5);
        assert_eq!(state.time_remaining_ms(), 1000.0);
        assert_eq!(state.time_remaining_label(), "0:01");
    }

    #[test]
    fn test_timeline_matches_timings() {
        let state = loaded("a b c");
        assert_eq!(state.timeline(), vec![0.0, 200.0, 400.0]);
    }

    #[test]
    fn test_progress_and_labels() {
        let mut state = ReadingState::new(ReadingSettings::default());
        assert_eq!(state.position_label(), "— / —");
        assert_eq!(state.progress_percent(), 0.0);

        state.set_content("only");
        assert_eq!(state.progress_percent(), 0.0);

        state.set_content("a b c d e");
        state.seek(2);
        assert_eq!(state.progress_percent(), 50.0);
        assert_eq!(state.position_label(), "3 / 5");
    }

    #[test]
    fn test_display_wpm_follows_training_ramp() {
        let mut state = loaded("a b c d e f g h i j k");
        let patch = SettingsPatch {
            training_mode_enabled: Some(true),
            training_start_wpm: Some(100),
            training_end_wpm: Some(500),
            ..SettingsPatch::default()
        };
        state.update_settings(&patch);
        assert_eq!(state.display_wpm(), 100);
        state.seek(8);
        assert_eq!(state.display_wpm(), 500);
        state.seek(1);
        assert_eq!(state.display_wpm(), 150);
    }
}
