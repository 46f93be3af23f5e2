//! Tokens and validated token streams

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Reserved zero-width delimiter joining the tokens of a multi-token term
pub const TOKEN_DELIMITER: char = '\u{200B}';

/// Text of the synthetic token emitted between paragraphs
pub const PARAGRAPH_MARKER: &str = "¶";

/// Smallest unit produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token text exactly as it appears after normalization
    pub text: String,
    /// Whether the token is a run of word characters
    pub is_word: bool,
    /// Whether a sentence ends with this token
    pub is_end_of_sentence: bool,
}

impl Token {
    /// A word token
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_word: true,
            is_end_of_sentence: false,
        }
    }

    /// A non-word token (punctuation, space, digit)
    pub fn non_word(text: impl Into<String>, is_end_of_sentence: bool) -> Self {
        Self {
            text: text.into(),
            is_word: false,
            is_end_of_sentence,
        }
    }

    /// The paragraph marker, which always ends a sentence
    pub fn paragraph_marker() -> Self {
        Self::non_word(PARAGRAPH_MARKER, true)
    }

    /// Whether this is the synthetic paragraph marker
    pub fn is_paragraph_marker(&self) -> bool {
        !self.is_word && self.text == PARAGRAPH_MARKER
    }

    /// Whether this is a single literal space
    pub fn is_space(&self) -> bool {
        self.text == " "
    }
}

/// Ordered, gap-free sequence of tokens
///
/// Positions handed to the locator and resolver are indexes into this
/// stream (0..len). `first_order` records where the stream sits inside a
/// larger text so results can be mapped back to persisted token orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    first_order: usize,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Stream whose tokens are numbered 0..len
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::with_first_order(0, tokens)
    }

    /// Stream whose first token carries the given order
    pub fn with_first_order(first_order: usize, tokens: Vec<Token>) -> Self {
        Self {
            first_order,
            tokens,
        }
    }

    /// Build a stream from tokens carrying external orders
    ///
    /// Tokens are sorted by order first. Any gap or duplicate is a
    /// contract violation.
    pub fn from_ordered(mut tokens: Vec<(usize, Token)>) -> Result<Self> {
        tokens.sort_by_key(|(order, _)| *order);

        let first_order = tokens.first().map(|(order, _)| *order).unwrap_or(0);
        for pair in tokens.windows(2) {
            let (prev_order, prev) = &pair[0];
            let (order, token) = &pair[1];
            if *order != prev_order + 1 {
                return Err(CoreError::ContractViolation(format!(
                    "bad token ordering: {}; {}; {}; {}",
                    prev.text, prev_order, token.text, order
                )));
            }
        }

        Ok(Self {
            first_order,
            tokens: tokens.into_iter().map(|(_, token)| token).collect(),
        })
    }

    /// All tokens in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consume the stream, returning its tokens
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Order of the first token
    pub fn first_order(&self) -> usize {
        self.first_order
    }

    /// Persisted order of the token at `position`
    pub fn order_of(&self, position: usize) -> usize {
        self.first_order + position
    }

    /// Token texts in order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|t| t.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_marker_ends_sentence() {
        let marker = Token::paragraph_marker();
        assert!(marker.is_paragraph_marker());
        assert!(marker.is_end_of_sentence);
        assert!(!marker.is_word);
        assert!(!Token::word("¶").is_paragraph_marker());
    }

    #[test]
    fn test_from_ordered_sorts_tokens() {
        let stream = TokenStream::from_ordered(vec![
            (11, Token::word("b")),
            (10, Token::word("a")),
            (12, Token::non_word(".", true)),
        ])
        .unwrap();

        assert_eq!(stream.first_order(), 10);
        assert_eq!(stream.texts().collect::<Vec<_>>(), vec!["a", "b", "."]);
        assert_eq!(stream.order_of(2), 12);
    }

    #[test]
    fn test_from_ordered_rejects_gaps() {
        let result = TokenStream::from_ordered(vec![(1, Token::word("a")), (3, Token::word("b"))]);
        match result {
            Err(CoreError::ContractViolation(msg)) => assert!(msg.contains("bad token ordering")),
            other => panic!("Expected contract violation, got {other:?}"),
        }
    }

    #[test]
    fn test_from_ordered_rejects_duplicates() {
        let result = TokenStream::from_ordered(vec![(1, Token::word("a")), (1, Token::word("b"))]);
        assert!(matches!(result, Err(CoreError::ContractViolation(_))));
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::from_ordered(Vec::new()).unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.first_order(), 0);
    }
}
