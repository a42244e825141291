use crate::reading::orp::calculate_orp_index;
use crate::reading::token::{Token, TokenId, TokenType};
use std::sync::atomic::{AtomicU64, Ordering};

static TOKENIZE_PASS: AtomicU64 = AtomicU64::new(0);

/// Letters (ASCII and the Latin-1 supplement block) and ASCII digits.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{C0}'..='\u{FF}').contains(&c)
}

fn is_clean_char(c: char) -> bool {
    is_word_char(c) || c == '\'' || c == '-'
}

/// Straightens curly quotes and turns byte-order marks into plain spaces.
fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{FEFF}' => ' ',
            other => other,
        })
        .collect()
}

fn classify(clean_text: &str) -> Option<TokenType> {
    if clean_text.is_empty() {
        None
    } else if clean_text.chars().all(|c| c.is_ascii_digit()) {
        Some(TokenType::Number)
    } else {
        Some(TokenType::Word)
    }
}

/// Pivot index into the raw chunk: the ORP of the cleaned word, shifted past
/// any leading punctuation and clamped to the last character.
fn pivot_index(chunk: &str, clean_text: &str) -> usize {
    let leading = chunk.chars().take_while(|&c| !is_word_char(c)).count();
    let last = chunk.chars().count().saturating_sub(1);
    (leading + calculate_orp_index(clean_text)).min(last)
}

/// Splits raw text into display tokens.
///
/// Chunks are whitespace-delimited and keep their attached punctuation, so
/// "hello." is one token. Chunks with no letters or digits at all ("...",
/// "—") are dropped. `offset` counts every chunk, dropped ones included,
/// so offsets of emitted tokens can skip values.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    let pass = TOKENIZE_PASS.fetch_add(1, Ordering::Relaxed);
    let normalized = normalize_text(text);

    normalized
        .split_whitespace()
        .enumerate()
        .filter_map(|(offset, chunk)| {
            let clean_text: String = chunk.chars().filter(|&c| is_clean_char(c)).collect();
            let kind = classify(&clean_text)?;
            Some(Token {
                id: TokenId { pass, offset },
                orp_index: pivot_index(chunk, &clean_text),
                text: chunk.to_string(),
                clean_text,
                kind,
                offset,
            })
        })
        .collect()
}
