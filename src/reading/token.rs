use serde::Serialize;
use std::fmt;

/// Classification of a token. Only `Word` and `Number` come out of the
/// tokenizer; the other variants exist for callers that build tokens by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Word,
    Number,
    Punctuation,
    Whitespace,
}

/// Display key for a token. Unique per tokenization pass; carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenId {
    pub pass: u64,
    pub offset: usize,
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tok_{}_{}", self.pass, self.offset)
    }
}

/// Token struct for RSVP reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub id: TokenId,
    /// The whitespace-delimited chunk exactly as it appeared, punctuation included.
    pub text: String,
    /// `text` reduced to letters, digits, apostrophes and hyphens.
    pub clean_text: String,
    pub kind: TokenType,
    /// Char index into `text` of the pivot character.
    pub orp_index: usize,
    /// Ordinal of the chunk among all whitespace-delimited chunks of the input.
    pub offset: usize,
}

impl Token {
    /// Length of `text` in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Splits `text` around the pivot character into `(left, pivot, right)`.
    pub fn split_at_orp(&self) -> (&str, &str, &str) {
        let mut indices = self.text.char_indices().skip(self.orp_index);
        match indices.next() {
            Some((start, ch)) => {
                let end = start + ch.len_utf8();
                (&self.text[..start], &self.text[start..end], &self.text[end..])
            }
            None => (self.text.as_str(), "", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, orp_index: usize) -> Token {
        Token {
            id: TokenId { pass: 0, offset: 0 },
            text: text.to_string(),
            clean_text: text.to_string(),
            kind: TokenType::Word,
            orp_index,
            offset: 0,
        }
    }

    #[test]
    fn test_split_at_orp() {
        assert_eq!(token("reading", 2).split_at_orp(), ("re", "a", "ding"));
        assert_eq!(token("I", 0).split_at_orp(), ("", "I", ""));
    }

    #[test]
    fn test_split_at_orp_multibyte() {
        assert_eq!(token("café", 3).split_at_orp(), ("caf", "é", ""));
    }

    #[test]
    fn test_split_at_orp_out_of_range() {
        assert_eq!(token("hi", 5).split_at_orp(), ("hi", "", ""));
    }

    #[test]
    fn test_token_id_display() {
        let id = TokenId { pass: 3, offset: 12 };
        assert_eq!(id.to_string(), "tok_3_12");
    }
}
