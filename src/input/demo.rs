use super::LoadedDocument;

/// Sample passage offered when there is nothing else to read.
pub const DEMO_TEXT: &str = "Rapid serial visual presentation shows one word at a time, \
always in the same place. Your eyes stop jumping across the line, so the only work left \
is reading. Each word is aligned on its focus letter, highlighted in red. Longer words \
and numbers like 1984 stay on screen a little longer, and so do words that end a clause \
or a sentence. Try training mode: it starts slow and speeds up until the last fifth of \
the text, where it holds the target pace.";

pub fn load() -> LoadedDocument {
    LoadedDocument {
        text: DEMO_TEXT.to_string(),
        source: "demo".to_string(),
    }
}
