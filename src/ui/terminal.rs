use crate::app::{mode::AppMode, App};
use crate::ui::reader::view::render_reader;
use crate::ui::terminal_guard::TerminalGuard;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest the loop blocks on input while no tick is pending, so resizes still redraw.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Runs until the app asks to quit. Input and playback ticks share one loop:
    /// the poll timeout is the time left until the next tick is due.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        self.render_frame(app)?;

        loop {
            if app.mode() == AppMode::Quit {
                return Ok(());
            }

            let poll_timeout = app
                .time_until_tick(Instant::now())
                .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));

            if event::poll(poll_timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                    Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                    _ => {}
                }
            }

            app.tick(Instant::now());
            self.render_frame(app)?;
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let render_state = app.get_render_state();
        self.terminal
            .draw(|frame| render_reader(frame, &render_state))?;
        Ok(())
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.handle_keypress('q');
        return;
    }

    if app.mode() == AppMode::Command {
        match key.code {
            KeyCode::Char(c) => app.push_command_char(c),
            KeyCode::Backspace => app.pop_command_char(),
            KeyCode::Enter => app.submit_command(),
            KeyCode::Esc => app.cancel_command(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char(c) => app.handle_keypress(c),
        KeyCode::Left => app.handle_keypress('h'),
        KeyCode::Right => app.handle_keypress('l'),
        KeyCode::Home => app.handle_keypress('0'),
        KeyCode::Up => app.handle_keypress('+'),
        KeyCode::Down => app.handle_keypress('-'),
        _ => {}
    }
}
