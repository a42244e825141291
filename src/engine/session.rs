use crate::engine::config::{ReadingSettings, SettingsPatch};
use crate::engine::storage::SettingsStore;
use crate::engine::timer::{millis, Timer, TimerHandle};
use crate::reading::ReadingState;
use tracing::{debug, info, trace, warn};

/// The fields that decide whether (and for how long) a tick is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TickKey {
    is_playing: bool,
    current_index: usize,
    chunk_size: usize,
}

impl TickKey {
    fn of(state: &ReadingState) -> Self {
        Self {
            is_playing: state.is_playing(),
            current_index: state.current_index(),
            chunk_size: state.chunk_size(),
        }
    }
}

/// Owns one reading session: the reading state, the timer that paces it and
/// an optional settings store.
///
/// Every operation that changes the playing flag, the position, the timings
/// or the chunk size cancels the pending tick and, if still playing, arms a
/// new one for the current chunk. A tick fired for an older arming is ignored.
pub struct Session<T: Timer> {
    state: ReadingState,
    timer: T,
    pending: Option<TimerHandle>,
    store: Option<Box<dyn SettingsStore>>,
}

impl<T: Timer> Session<T> {
    pub fn new(settings: ReadingSettings, timer: T) -> Self {
        Self {
            state: ReadingState::new(settings),
            timer,
            pending: None,
            store: None,
        }
    }

    /// Starts from the settings in `store`, falling back to defaults when it
    /// is empty or unreadable. Later settings changes are saved back to it.
    pub fn with_store(store: Box<dyn SettingsStore>, timer: T) -> Self {
        let settings = match store.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => ReadingSettings::default(),
            Err(err) => {
                warn!(error = %err, "could not load settings, using defaults");
                ReadingSettings::default()
            }
        };
        let mut session = Self::new(settings, timer);
        session.store = Some(store);
        session
    }

    pub fn state(&self) -> &ReadingState {
        &self.state
    }

    pub fn settings(&self) -> &ReadingSettings {
        self.state.settings()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn store(&self) -> Option<&dyn SettingsStore> {
        self.store.as_deref()
    }

    /// Handle of the tick currently armed, if any.
    pub fn pending_tick(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn set_content(&mut self, text: &str) {
        self.state.set_content(text);
        debug!(tokens = self.state.token_count(), "content set");
        self.reschedule();
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        let before = self.state.settings().clone();
        let timing_changed = self.state.update_settings(patch);

        if timing_changed {
            self.reschedule();
        }

        if *self.state.settings() != before {
            self.persist_settings();
        }
    }

    pub fn play(&mut self) {
        self.transition(ReadingState::play);
    }

    pub fn pause(&mut self) {
        self.transition(ReadingState::pause);
    }

    pub fn toggle_playback(&mut self) {
        self.transition(ReadingState::toggle_playback);
    }

    pub fn seek(&mut self, index: i64) {
        self.transition(|state| state.seek(index));
    }

    pub fn seek_snapped(&mut self, index: i64) {
        self.transition(|state| state.seek_snapped(index));
    }

    pub fn restart(&mut self) {
        self.transition(ReadingState::restart);
    }

    pub fn skip_back(&mut self) {
        self.transition(ReadingState::skip_back);
    }

    pub fn skip_forward(&mut self) {
        self.transition(ReadingState::skip_forward);
    }

    /// Steps to the next chunk by hand, as a fired tick would.
    pub fn advance(&mut self) {
        self.transition(ReadingState::advance);
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.reschedule();
    }

    /// Delivers a fired timer. Returns `false` for a handle that is no longer
    /// the armed one; such ticks never move the position.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) {
            trace!(generation = handle.generation(), "stale tick ignored");
            return false;
        }
        self.pending = None;
        self.state.advance();
        if !self.state.is_playing() {
            debug!(index = self.state.current_index(), "playback reached the end");
        }
        self.reschedule();
        true
    }

    fn transition(&mut self, apply: impl FnOnce(&mut ReadingState)) {
        let before = TickKey::of(&self.state);
        apply(&mut self.state);
        if TickKey::of(&self.state) != before {
            self.reschedule();
        }
    }

    fn reschedule(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
        if self.state.wants_tick() {
            let delay = millis(self.state.chunk_duration_ms());
            self.pending = Some(self.timer.schedule(delay));
        }
    }

    fn persist_settings(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        match store.save(self.state.settings()) {
            Ok(()) => info!("settings saved"),
            Err(err) => warn!(error = %err, "could not save settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ReaderError;
    use crate::engine::storage::MemorySettingsStore;
    use crate::engine::timer::ManualTimer;
    use std::time::Duration;

    const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

    fn session() -> Session<ManualTimer> {
        let mut session = Session::new(ReadingSettings::default(), ManualTimer::new());
        session.set_content(TEN_WORDS);
        session
    }

    fn tick(session: &mut Session<ManualTimer>) -> bool {
        match session.timer_mut().fire_next() {
            Some(handle) => session.on_timer(handle),
            None => false,
        }
    }

    #[test]
    fn test_play_arms_one_tick_for_chunk() {
        let mut session = session();
        assert!(session.pending_tick().is_none());

        session.play();
        assert!(session.pending_tick().is_some());
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_tick_duration_sums_chunk() {
        let mut session = session();
        session.update_settings(&SettingsPatch::chunk_size(3));
        session.play();
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(600)));
    }

    #[test]
    fn test_ticks_advance_until_end() {
        let mut session = session();
        session.play();

        let mut ticks = 0;
        while tick(&mut session) {
            ticks += 1;
        }

        assert_eq!(ticks, 10);
        assert!(!session.state().is_playing());
        assert_eq!(session.state().current_index(), 9);
        assert!(session.pending_tick().is_none());
        assert_eq!(session.timer().now(), Duration::from_millis(2000));
    }

    #[test]
    fn test_pause_cancels_pending_tick() {
        let mut session = session();
        session.play();
        session.pause();
        assert!(session.pending_tick().is_none());
        assert!(!session.timer().is_armed());
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut session = session();
        session.play();
        let stale = session.pending_tick().unwrap();

        session.seek(5);
        assert_ne!(session.pending_tick(), Some(stale));

        assert!(!session.on_timer(stale));
        assert_eq!(session.state().current_index(), 5);
    }

    #[test]
    fn test_seek_while_playing_reschedules_from_new_position() {
        let mut session = session();
        session.play();
        session.timer_mut().advance_by(Duration::from_millis(150));

        session.seek(4);
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(200)));
        assert!(tick(&mut session));
        assert_eq!(session.state().current_index(), 5);
    }

    #[test]
    fn test_seek_to_same_index_keeps_tick() {
        let mut session = session();
        session.play();
        let armed = session.pending_tick();
        session.timer_mut().advance_by(Duration::from_millis(50));

        session.seek(0);
        assert_eq!(session.pending_tick(), armed);
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(150)));
    }

    #[test]
    fn test_settings_change_reschedules_immediately() {
        let mut session = session();
        session.play();
        session.update_settings(&SettingsPatch::wpm(600));
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_chunk_size_change_while_playing_rearms_tick() {
        let mut session = session();
        session.play();
        let armed = session.pending_tick();
        session.timer_mut().advance_by(Duration::from_millis(120));

        session.update_settings(&SettingsPatch::chunk_size(3));
        assert_ne!(session.pending_tick(), armed);
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(600)));

        assert!(tick(&mut session));
        assert_eq!(session.state().current_index(), 3);
    }

    #[test]
    fn test_seek_snapped_lands_on_chunk_start() {
        let mut session = session();
        session.update_settings(&SettingsPatch::chunk_size(3));
        session.play();
        let armed = session.pending_tick();

        session.seek_snapped(7);
        assert_eq!(session.state().current_index(), 6);
        assert_ne!(session.pending_tick(), armed);
        assert_eq!(session.timer().remaining(), Some(Duration::from_millis(600)));

        session.seek_snapped(-4);
        assert_eq!(session.state().current_index(), 0);
    }

    #[test]
    fn test_empty_settings_patch_keeps_tick() {
        let mut session = session();
        session.play();
        let armed = session.pending_tick();
        session.update_settings(&SettingsPatch::default());
        assert_eq!(session.pending_tick(), armed);
    }

    #[test]
    fn test_set_content_stops_playback() {
        let mut session = session();
        session.play();
        session.set_content("new text");
        assert!(!session.state().is_playing());
        assert!(session.pending_tick().is_none());
    }

    #[test]
    fn test_reset_cancels_tick() {
        let mut session = session();
        session.play();
        session.reset();
        assert!(session.state().is_empty());
        assert!(!session.timer().is_armed());
    }

    #[test]
    fn test_play_without_content_arms_nothing() {
        let mut session = Session::new(ReadingSettings::default(), ManualTimer::new());
        session.play();
        assert!(session.pending_tick().is_none());
    }

    #[test]
    fn test_manual_advance_while_playing() {
        let mut session = session();
        session.play();
        session.advance();
        assert_eq!(session.state().current_index(), 1);
        assert!(session.pending_tick().is_some());
    }

    #[test]
    fn test_store_loaded_on_start_and_saved_on_change() {
        let stored = ReadingSettings {
            wpm: 480,
            ..ReadingSettings::default()
        };
        let store = MemorySettingsStore::with_settings(stored);
        let mut session = Session::with_store(Box::new(store), ManualTimer::new());
        assert_eq!(session.settings().wpm, 480);

        session.update_settings(&SettingsPatch::wpm(520));
        let saved = session.store().unwrap().load().unwrap().unwrap();
        assert_eq!(saved.wpm, 520);
    }

    #[test]
    fn test_unchanged_settings_are_not_saved() {
        let mut session = Session::with_store(Box::new(MemorySettingsStore::new()), ManualTimer::new());
        session.update_settings(&SettingsPatch::default());
        assert!(session.store().unwrap().load().unwrap().is_none());
    }

    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn load(&self) -> Result<Option<ReadingSettings>, ReaderError> {
            Err(ReaderError::ConfigDirUnavailable)
        }

        fn save(&mut self, _settings: &ReadingSettings) -> Result<(), ReaderError> {
            Err(ReaderError::ConfigDirUnavailable)
        }
    }

    #[test]
    fn test_broken_store_falls_back_to_defaults() {
        let mut session = Session::with_store(Box::new(BrokenStore), ManualTimer::new());
        assert_eq!(*session.settings(), ReadingSettings::default());

        session.update_settings(&SettingsPatch::wpm(700));
        assert_eq!(session.settings().wpm, 700);
    }
}
