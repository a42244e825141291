//! Command parsing for the TUI command deck
//!
//! Supports:
//! - `:q` or `:quit` → Quit command
//! - `:h` or `:help` → Help command
//! - `:demo` → Load the built-in sample text
//! - `:clear` → Drop the current text
//! - `:wpm N`, `:chunk N`, `:pause MS` → Change one reading setting
//! - `:train on|off` or `:train START END` → Training mode
//! - `:goto N` → Jump to word N (1-based), snapped to its chunk
//! - `@filename` → Load file command (PDF, EPUB or plain text)
//! - `@@` or `@` → Load clipboard

use crate::app::AppEvent;
use crate::engine::config::SettingsPatch;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Demo,
    Clear,
    Settings(SettingsPatch),
    Goto(usize),
    LoadFile(String),
    LoadClipboard,
    Unknown(String),
}

fn parse_setting(name: &str, args: &[&str]) -> Option<SettingsPatch> {
    let patch = match (name, args) {
        ("wpm", [value]) => SettingsPatch::wpm(value.parse().ok()?),
        ("chunk", [value]) => SettingsPatch::chunk_size(value.parse().ok()?),
        ("pause", [value]) => SettingsPatch {
            punctuation_slowdown: Some(value.parse().ok()?),
            ..SettingsPatch::default()
        },
        ("train", ["on"]) => SettingsPatch::training(true),
        ("train", ["off"]) => SettingsPatch::training(false),
        ("train", [start, end]) => SettingsPatch {
            training_mode_enabled: Some(true),
            training_start_wpm: Some(start.parse().ok()?),
            training_end_wpm: Some(end.parse().ok()?),
            ..SettingsPatch::default()
        },
        _ => return None,
    };
    Some(patch)
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let mut parts = cmd.split_whitespace();
        let name = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match (name, args.as_slice()) {
            ("q" | "quit", []) => Command::Quit,
            ("h" | "help", []) => Command::Help,
            ("demo", []) => Command::Demo,
            ("clear", []) => Command::Clear,
            ("goto", [value]) => match value.parse() {
                Ok(position) => Command::Goto(position),
                Err(_) => Command::Unknown(input.to_string()),
            },
            (name, args) => parse_setting(name, args)
                .map(Command::Settings)
                .unwrap_or_else(|| Command::Unknown(input.to_string())),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

/// Convert a parsed command into an AppEvent
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::Demo => AppEvent::LoadDemo,
        Command::Clear => AppEvent::Clear,
        Command::Settings(patch) => AppEvent::UpdateSettings(patch),
        Command::Goto(position) => AppEvent::Goto(position),
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
