//! Vocabulary terms
//!
//! A term is a word or multi-word expression the learner has recorded.
//! Multi-token terms keep their tokens joined by [`TOKEN_DELIMITER`] so a
//! match can never start or end inside a token.

use crate::error::{CoreError, Result};
use crate::token::TOKEN_DELIMITER;
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted term
pub type TermId = u64;

/// Status code used in statistics for words with no vocabulary entry
pub const UNKNOWN_STATUS_CODE: u8 = 0;

/// Learner status of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TermStatus {
    /// Learning level 1 (new) to 5 (learned)
    Learning(u8),
    /// Excluded from study
    Ignored,
    /// Known without study
    WellKnown,
}

impl TermStatus {
    /// Numeric status code (1-5, 98, 99)
    pub fn code(self) -> u8 {
        match self {
            TermStatus::Learning(level) => level,
            TermStatus::Ignored => 98,
            TermStatus::WellKnown => 99,
        }
    }

    /// Status for a numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=5 => Some(TermStatus::Learning(code)),
            98 => Some(TermStatus::Ignored),
            99 => Some(TermStatus::WellKnown),
            _ => None,
        }
    }
}

impl Default for TermStatus {
    fn default() -> Self {
        TermStatus::Learning(1)
    }
}

impl TryFrom<u8> for TermStatus {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        TermStatus::from_code(code).ok_or_else(|| format!("invalid term status code: {code}"))
    }
}

impl From<TermStatus> for u8 {
    fn from(status: TermStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for TermStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A word or expression in the learner's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    id: Option<TermId>,
    text: String,
    text_lc: String,
    token_count: usize,
    status: TermStatus,
    parent_id: Option<TermId>,
}

impl Term {
    /// Build a term from already-joined text
    ///
    /// `text` must hold `token_count` tokens separated by
    /// [`TOKEN_DELIMITER`].
    pub fn new(text: impl Into<String>, token_count: usize, status: TermStatus) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(CoreError::ContractViolation("term text is empty".to_string()));
        }
        if text.split(TOKEN_DELIMITER).any(str::is_empty) {
            return Err(CoreError::ContractViolation(format!(
                "term '{}' has an empty token",
                text.replace(TOKEN_DELIMITER, "/")
            )));
        }

        let delimiters = text.matches(TOKEN_DELIMITER).count();
        if token_count != delimiters + 1 {
            return Err(CoreError::ContractViolation(format!(
                "term '{}' has {} tokens but token count {}",
                text.replace(TOKEN_DELIMITER, "/"),
                delimiters + 1,
                token_count
            )));
        }

        Ok(Self {
            id: None,
            text_lc: lowercase_tokens(&text),
            text,
            token_count,
            status,
            parent_id: None,
        })
    }

    /// Build a term by tokenizing its text with the language's tokenizer
    pub fn parse(text: &str, tokenizer: &Tokenizer<'_>, status: TermStatus) -> Result<Self> {
        let cleaned = text
            .trim()
            .replace(TOKEN_DELIMITER, "")
            .replace('\u{00A0}', " ");

        let parts: Vec<String> = tokenizer
            .tokenize(&cleaned)
            .into_iter()
            .filter(|t| !t.is_paragraph_marker())
            .map(|t| t.text)
            .collect();

        if parts.is_empty() {
            return Err(CoreError::ContractViolation(format!(
                "term '{}' has no tokens",
                text.trim()
            )));
        }

        let token_count = parts.len();
        Self::new(parts.join(&TOKEN_DELIMITER.to_string()), token_count, status)
    }

    /// Attach a persisted identifier
    pub fn with_id(mut self, id: TermId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a parent term
    pub fn with_parent(mut self, parent_id: TermId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn id(&self) -> Option<TermId> {
        self.id
    }

    /// Text as stored, tokens joined by the delimiter
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased text, the key used for matching
    pub fn text_lc(&self) -> &str {
        &self.text_lc
    }

    /// Text with the delimiters removed
    pub fn display_text(&self) -> String {
        self.text.replace(TOKEN_DELIMITER, "")
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn is_multi_token(&self) -> bool {
        self.token_count > 1
    }

    pub fn status(&self) -> TermStatus {
        self.status
    }

    pub fn parent_id(&self) -> Option<TermId> {
        self.parent_id
    }
}

/// Lowercase each delimiter-separated token on its own
///
/// Lowercasing the joined string could differ (context dependent case
/// mappings see through the delimiter), and the locator lowercases tokens
/// one at a time.
pub(crate) fn lowercase_tokens(text: &str) -> String {
    if !text.contains(TOKEN_DELIMITER) {
        return text.to_lowercase();
    }
    text.split(TOKEN_DELIMITER)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(&TOKEN_DELIMITER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;

    #[test]
    fn test_parse_multi_token_term() {
        let registry = LanguageRegistry::with_builtin().unwrap();
        let rules = registry.rules("es").unwrap();
        let tokenizer = Tokenizer::new(&rules);

        let term = Term::parse("  Tengo  un ", &tokenizer, TermStatus::Learning(2)).unwrap();
        assert_eq!(term.text(), "Tengo\u{200B} \u{200B}un");
        assert_eq!(term.text_lc(), "tengo\u{200B} \u{200B}un");
        assert_eq!(term.token_count(), 3);
        assert_eq!(term.display_text(), "Tengo un");
        assert!(term.is_multi_token());
    }

    #[test]
    fn test_parse_drops_paragraph_markers() {
        let registry = LanguageRegistry::with_builtin().unwrap();
        let rules = registry.rules("en").unwrap();
        let tokenizer = Tokenizer::new(&rules);

        let term = Term::parse("a\nb", &tokenizer, TermStatus::default()).unwrap();
        assert_eq!(term.token_count(), 2);
        assert_eq!(term.text(), "a\u{200B}b");
    }

    #[test]
    fn test_parse_empty_text_fails() {
        let registry = LanguageRegistry::with_builtin().unwrap();
        let rules = registry.rules("en").unwrap();
        let tokenizer = Tokenizer::new(&rules);

        let result = Term::parse("   ", &tokenizer, TermStatus::default());
        assert!(matches!(result, Err(CoreError::ContractViolation(_))));
    }

    #[test]
    fn test_new_validates_token_count() {
        assert!(Term::new("a\u{200B} \u{200B}b", 3, TermStatus::WellKnown).is_ok());

        let result = Term::new("a\u{200B} \u{200B}b", 2, TermStatus::WellKnown);
        match result {
            Err(CoreError::ContractViolation(msg)) => assert!(msg.contains("a/ /b")),
            other => panic!("Expected contract violation, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_empty_tokens() {
        for text in ["a\u{200B}\u{200B}b", "\u{200B}a", "a\u{200B}", "\u{200B}"] {
            let count = text.matches(TOKEN_DELIMITER).count() + 1;
            let result = Term::new(text, count, TermStatus::WellKnown);
            assert!(
                matches!(result, Err(CoreError::ContractViolation(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_builders() {
        let term = Term::new("gato", 1, TermStatus::Learning(3))
            .unwrap()
            .with_id(7)
            .with_parent(3);
        assert_eq!(term.id(), Some(7));
        assert_eq!(term.parent_id(), Some(3));
        assert_eq!(term.status().code(), 3);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TermStatus::from_code(98), Some(TermStatus::Ignored));
        assert_eq!(TermStatus::from_code(99), Some(TermStatus::WellKnown));
        assert_eq!(TermStatus::from_code(0), None);
        assert_eq!(TermStatus::from_code(6), None);
        assert_eq!(TermStatus::WellKnown.to_string(), "99");
        assert!(TermStatus::try_from(42).is_err());
    }

    #[test]
    fn test_lowercase_tokens_per_token() {
        // Final sigma is decided per token
        assert_eq!(lowercase_tokens("ΟΔΟΣ\u{200B}Α"), "οδο\u{3C2}\u{200B}α");
        assert_eq!(lowercase_tokens("Hola"), "hola");
    }
}
