use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::{RenderState, CONTEXT_WINDOW};
use crate::engine::config::{
    SettingsPatch, CHUNK_SIZES, PUNCTUATION_SLOWDOWN_RANGE, PUNCTUATION_SLOWDOWN_STEP, WPM_STEP,
};
use crate::engine::timer::DeadlineTimer;
use crate::engine::Session;
use crate::input::{self, LoadError, LoadedDocument};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Terminal host around a reading session.
pub struct App {
    session: Session<DeadlineTimer>,
    command_input: Option<String>,
    status: Option<String>,
    show_help: bool,
    quit: bool,
}

impl App {
    pub fn new(session: Session<DeadlineTimer>) -> Self {
        Self {
            session,
            command_input: None,
            status: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn session(&self) -> &Session<DeadlineTimer> {
        &self.session
    }

    pub fn mode(&self) -> AppMode {
        if self.quit {
            AppMode::Quit
        } else if self.command_input.is_some() {
            AppMode::Command
        } else if self.session.state().is_playing() {
            AppMode::Reading
        } else {
            AppMode::Paused
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadFile(path) => self.load(input::load_path(&path)),
            AppEvent::LoadClipboard => self.load(input::clipboard::load()),
            AppEvent::LoadDemo => self.load(Ok(input::demo::load())),
            AppEvent::Clear => {
                self.session.reset();
                self.status = None;
            }
            AppEvent::UpdateSettings(patch) => self.session.update_settings(&patch),
            AppEvent::Goto(position) => self
                .session
                .seek_snapped(position.saturating_sub(1) as i64),
            AppEvent::Quit => self.quit = true,
            AppEvent::Help => self.show_help = !self.show_help,
            AppEvent::InvalidCommand(input) => {
                self.status = Some(format!("Unknown command: {}", input));
            }
            AppEvent::None => {}
        }
    }

    fn load(&mut self, result: Result<LoadedDocument, LoadError>) {
        match result {
            Ok(doc) => {
                self.session.set_content(&doc.text);
                info!(
                    source = %doc.source,
                    tokens = self.session.state().token_count(),
                    "document loaded"
                );
                self.status = Some(format!("Loaded {}", doc.source));
            }
            Err(err) => {
                warn!(error = %err, "load failed");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Reader-mode key bindings.
    pub fn handle_keypress(&mut self, c: char) {
        let settings = self.session.settings().clone();
        match c {
            ' ' => self.session.toggle_playback(),
            'h' => self.session.skip_back(),
            'l' => self.session.skip_forward(),
            '0' => self.session.restart(),
            '+' | '=' => self
                .session
                .update_settings(&SettingsPatch::wpm(settings.stepped_wpm(WPM_STEP as i32))),
            '-' => self
                .session
                .update_settings(&SettingsPatch::wpm(settings.stepped_wpm(-(WPM_STEP as i32)))),
            '[' | ']' => {
                let step = PUNCTUATION_SLOWDOWN_STEP as i64;
                let delta = if c == ']' { step } else { -step };
                let pause = (settings.punctuation_slowdown as i64 + delta).clamp(
                    *PUNCTUATION_SLOWDOWN_RANGE.start() as i64,
                    *PUNCTUATION_SLOWDOWN_RANGE.end() as i64,
                );
                self.session.update_settings(&SettingsPatch {
                    punctuation_slowdown: Some(pause as u32),
                    ..SettingsPatch::default()
                });
            }
            '1'..='9' => {
                let size = c.to_digit(10).unwrap_or(1) as usize;
                if CHUNK_SIZES.contains(&size) {
                    self.session.update_settings(&SettingsPatch::chunk_size(size));
                }
            }
            't' => self
                .session
                .update_settings(&SettingsPatch::training(!settings.training_mode_enabled)),
            'o' => self.session.update_settings(&SettingsPatch {
                orp_enabled: Some(!settings.orp_enabled),
                ..SettingsPatch::default()
            }),
            '?' => self.handle_event(AppEvent::Help),
            'q' => self.handle_event(AppEvent::Quit),
            ':' | '@' => self.open_command(c),
            _ => {}
        }
    }

    /// Opens the command deck pre-filled with `prefix`. Playback pauses while typing.
    pub fn open_command(&mut self, prefix: char) {
        self.session.pause();
        self.status = None;
        self.command_input = Some(prefix.to_string());
    }

    pub fn command_input(&self) -> Option<&str> {
        self.command_input.as_deref()
    }

    pub fn push_command_char(&mut self, c: char) {
        if let Some(input) = self.command_input.as_mut() {
            input.push(c);
        }
    }

    /// Deletes the last typed character; an emptied deck closes.
    pub fn pop_command_char(&mut self) {
        if let Some(input) = self.command_input.as_mut() {
            input.pop();
            if input.is_empty() {
                self.command_input = None;
            }
        }
    }

    pub fn cancel_command(&mut self) {
        self.command_input = None;
    }

    pub fn submit_command(&mut self) {
        if let Some(input) = self.command_input.take() {
            let command = crate::ui::command::parse_command(&input);
            self.handle_event(crate::ui::command::command_to_app_event(command));
        }
    }

    /// How long the event loop may block before the next playback tick is due.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.session.timer().time_until_due(now)
    }

    /// Delivers a due playback tick, if any. Returns whether the position moved on.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.session.timer_mut().poll_due(now) {
            Some(handle) => self.session.on_timer(handle),
            None => false,
        }
    }

    pub fn get_render_state(&self) -> RenderState {
        let mut render =
            RenderState::from_reading_state(self.mode(), self.session.state(), CONTEXT_WINDOW);
        render.command_input = self.command_input.clone();
        render.status = self.status.clone();
        render.show_help = self.show_help;
        render
    }
}
