use crate::app::mode::AppMode;
use crate::reading::ReadingState;

/// Words of context shown on each side of the current chunk.
pub const CONTEXT_WINDOW: usize = 3;

/// The pivot split of a single displayed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusWord {
    pub left: String,
    pub pivot: String,
    pub right: String,
}

/// Render state for UI components
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: AppMode,
    /// Texts of the tokens flashed together right now.
    pub chunk: Vec<String>,
    /// Set only when a single word is shown with the focus letter enabled.
    pub focus: Option<FocusWord>,
    pub context_left: Vec<String>,
    pub context_right: Vec<String>,
    pub progress_percent: f64,
    pub position_label: String,
    pub time_remaining: String,
    pub wpm: u32,
    pub training: bool,
    pub chunk_size: usize,
    pub command_input: Option<String>,
    pub status: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    /// Create render state from reading state data
    pub fn from_reading_state(mode: AppMode, state: &ReadingState, context_window: usize) -> Self {
        let chunk = state.current_chunk();
        let current_index = state.current_index();
        let tokens = state.tokens();

        let focus = match chunk {
            [token] if state.settings().shows_focus_guides() => {
                let (left, pivot, right) = token.split_at_orp();
                Some(FocusWord {
                    left: left.to_string(),
                    pivot: pivot.to_string(),
                    right: right.to_string(),
                })
            }
            _ => None,
        };

        let start = current_index.saturating_sub(context_window).min(tokens.len());
        let context_left = tokens[start..current_index.min(tokens.len())]
            .iter()
            .map(|t| t.text.clone())
            .collect();

        let after = (current_index + chunk.len()).min(tokens.len());
        let end = (after + context_window).min(tokens.len());
        let context_right = tokens[after..end].iter().map(|t| t.text.clone()).collect();

        Self {
            mode,
            chunk: chunk.iter().map(|t| t.text.clone()).collect(),
            focus,
            context_left,
            context_right,
            progress_percent: state.progress_percent(),
            position_label: state.position_label(),
            time_remaining: if state.is_empty() {
                "—:——".to_string()
            } else {
                state.time_remaining_label()
            },
            wpm: state.display_wpm(),
            training: state.settings().training_mode_enabled,
            chunk_size: state.chunk_size(),
            command_input: None,
            status: None,
            show_help: false,
        }
    }

    pub fn has_content(&self) -> bool {
        !self.chunk.is_empty()
    }
}
