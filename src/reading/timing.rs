use crate::engine::config::ReadingSettings;
use crate::reading::token::{Token, TokenType};

/// Hard floor for any single token's display time.
pub const MIN_TOKEN_DURATION_MS: f64 = 30.0;

/// Words longer than this many characters get a linear penalty.
const LONG_WORD_THRESHOLD: usize = 7;
const LONG_WORD_PENALTY_MS: f64 = 10.0;

const NUMBER_BASE_PENALTY_MS: f64 = 20.0;
const NUMBER_PER_CHAR_MS: f64 = 10.0;

const PAUSE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Milliseconds one word occupies at `wpm`. Non-positive rates are floored at 1.
pub fn wpm_to_milliseconds(wpm: f64) -> f64 {
    60_000.0 / wpm.max(1.0)
}

/// Index at which the training ramp reaches its top speed: 80% of the way
/// through the tokens, never below 1.
pub fn ramp_end_index(token_count: usize) -> usize {
    (token_count.saturating_sub(1) * 4 / 5).max(1)
}

/// Reading speed in effect at `index` out of `token_count` tokens.
///
/// Constant `wpm` unless training mode is on and there are at least two
/// tokens; then speed climbs linearly from the slower to the faster
/// training bound, reaching it at [`ramp_end_index`], and holds there.
pub fn effective_wpm(index: usize, token_count: usize, settings: &ReadingSettings) -> f64 {
    if !settings.training_mode_enabled || token_count < 2 {
        return (settings.wpm as f64).max(1.0);
    }

    let (start, end) = settings.training_range();
    let (start, end) = (start as f64, end as f64);
    let ramp_end = ramp_end_index(token_count);

    let wpm = if index <= ramp_end {
        start + (end - start) * (index as f64 / ramp_end as f64)
    } else {
        end
    };
    wpm.max(1.0)
}

fn has_pause_punctuation(token: &Token) -> bool {
    token.kind == TokenType::Punctuation || token.text.contains(PAUSE_PUNCTUATION)
}

/// Display time for one token at the given speed.
pub fn token_duration(token: &Token, wpm: f64, settings: &ReadingSettings) -> f64 {
    let mut duration = wpm_to_milliseconds(wpm);

    if has_pause_punctuation(token) {
        duration += settings.punctuation_slowdown as f64;
    }

    let length = token.char_len();
    if length > LONG_WORD_THRESHOLD {
        duration += (length - LONG_WORD_THRESHOLD) as f64 * LONG_WORD_PENALTY_MS;
    }

    if token.kind == TokenType::Number {
        duration += NUMBER_BASE_PENALTY_MS + length as f64 * NUMBER_PER_CHAR_MS;
    }

    duration.max(MIN_TOKEN_DURATION_MS)
}

/// Per-token display durations in milliseconds, index-aligned with `tokens`.
pub fn schedule(tokens: &[Token], settings: &ReadingSettings) -> Vec<f64> {
    let count = tokens.len();
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| token_duration(token, effective_wpm(index, count, settings), settings))
        .collect()
}

/// Cumulative start time of each token. Always starts with `0.0`, even for
/// no durations; the last token's own duration is never added.
pub fn generate_timeline(durations: &[f64]) -> Vec<f64> {
    let mut timeline = Vec::with_capacity(durations.len().max(1));
    let mut elapsed = 0.0;
    timeline.push(elapsed);
    for duration in durations.iter().take(durations.len().saturating_sub(1)) {
        elapsed += duration;
        timeline.push(elapsed);
    }
    timeline
}

/// Formats milliseconds as `m:ss`, rounding down to the second.
pub fn format_remaining(ms: f64) -> String {
    let total_ms = ms.max(0.0) as u64;
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}
