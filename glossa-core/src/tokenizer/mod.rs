//! Text tokenizer
//!
//! Turns raw text into an ordered sequence of [`Token`]s for one language.
//! There is exactly one implementation; everything language specific comes
//! from [`LanguageRules`], which are validated when loaded, so tokenizing
//! itself cannot fail.
//!
//! # Example
//!
//! ```
//! use glossa_core::{LanguageRegistry, Tokenizer};
//!
//! let registry = LanguageRegistry::with_builtin().unwrap();
//! let rules = registry.rules("es").unwrap();
//! let tokens = Tokenizer::new(&rules).tokenize("Hola. Adiós.");
//!
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["Hola", ".", " ", "Adiós", "."]);
//! assert!(tokens[1].is_end_of_sentence);
//! ```

mod sentence;

use crate::language::LanguageRules;
use crate::token::{Token, TokenStream, PARAGRAPH_MARKER, TOKEN_DELIMITER};
use sentence::SentenceEndDetector;

/// Tokenizer bound to one language's rules
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'r> {
    rules: &'r LanguageRules,
}

impl<'r> Tokenizer<'r> {
    /// Create a tokenizer for the given rules
    pub fn new(rules: &'r LanguageRules) -> Self {
        Self { rules }
    }

    /// The rules this tokenizer applies
    pub fn rules(&self) -> &'r LanguageRules {
        self.rules
    }

    /// Tokenize `text`
    ///
    /// Paragraphs are separated by a [`Token::paragraph_marker`]; no marker
    /// follows the last paragraph. Empty text yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }

        let normalized = self.normalize(text);
        let detector = SentenceEndDetector::new(self.rules);
        let mut tokens = Vec::new();

        for (i, raw) in normalized.split('\n').enumerate() {
            if i > 0 {
                tokens.push(Token::paragraph_marker());
            }
            let paragraph = self.prepare_paragraph(raw);
            let ends = detector.sentence_ends(&paragraph);
            self.tokenize_paragraph(&paragraph, &ends, &mut tokens);
        }

        if self.rules.remove_spaces() {
            tokens.retain(|t| !t.is_space());
        }

        tracing::trace!(
            language = self.rules.code(),
            tokens = tokens.len(),
            "tokenized text"
        );
        tokens
    }

    /// Tokenize `text` into a stream numbered from 0
    pub fn tokenize_stream(&self, text: &str) -> TokenStream {
        TokenStream::from_tokens(self.tokenize(text))
    }

    /// Substitutions, line endings and reserved characters
    fn normalize(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (from, to) in self.rules.substitutions() {
            if text.contains(from) {
                text = text.replace(from, to);
            }
        }

        let text = text.replace("\r\n", "\n");
        text.chars()
            .filter_map(|c| match c {
                TOKEN_DELIMITER => None,
                '\r' => Some('\n'),
                '{' => Some('['),
                '}' => Some(']'),
                '\u{00A0}' => Some(' '),
                c if PARAGRAPH_MARKER.starts_with(c) => Some('\n'),
                c => Some(c),
            })
            .collect()
    }

    /// Character splitting and whitespace collapsing for one paragraph
    fn prepare_paragraph(&self, paragraph: &str) -> String {
        let mut out = String::with_capacity(paragraph.len() * 2);
        let mut in_space = false;
        let mut chars = paragraph.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_whitespace() {
                if !in_space {
                    out.push(' ');
                    in_space = true;
                }
                continue;
            }

            out.push(c);
            in_space = false;
            if self.rules.split_each_character() && chars.peek().is_some_and(|n| !n.is_whitespace())
            {
                out.push(' ');
                in_space = true;
            }
        }

        out
    }

    fn tokenize_paragraph(&self, paragraph: &str, ends: &[usize], out: &mut Vec<Token>) {
        let mut pos = 0;
        for m in self.rules.word_pattern().find_iter(paragraph) {
            push_non_words(&paragraph[pos..m.start()], pos, ends, out);

            // A word may only end a sentence when the language puts
            // terminators in its word class
            let first_end = ends.partition_point(|&e| e < m.start());
            out.push(Token {
                text: m.as_str().to_string(),
                is_word: true,
                is_end_of_sentence: ends.get(first_end).is_some_and(|&e| e < m.end()),
            });
            pos = m.end();
        }
        push_non_words(&paragraph[pos..], pos, ends, out);
    }
}

fn push_non_words(segment: &str, offset: usize, ends: &[usize], out: &mut Vec<Token>) {
    for (i, ch) in segment.char_indices() {
        let is_end = ends.binary_search(&(offset + i)).is_ok();
        out.push(Token::non_word(ch.to_string(), is_end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;
    use std::sync::Arc;

    fn rules(code: &str) -> Arc<LanguageRules> {
        LanguageRegistry::with_builtin().unwrap().rules(code).unwrap()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn eos_texts(tokens: &[Token]) -> Vec<(usize, &str)> {
        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_end_of_sentence)
            .map(|(i, t)| (i, t.text.as_str()))
            .collect()
    }

    #[test]
    fn test_basic_sentence() {
        let rules = rules("es");
        let tokens = Tokenizer::new(&rules).tokenize("Tengo un gato.");

        assert_eq!(texts(&tokens), vec!["Tengo", " ", "un", " ", "gato", "."]);
        let words: Vec<bool> = tokens.iter().map(|t| t.is_word).collect();
        assert_eq!(words, vec![true, false, true, false, true, false]);
        assert_eq!(eos_texts(&tokens), vec![(5, ".")]);
    }

    #[test]
    fn test_empty_text() {
        let rules = rules("es");
        assert!(Tokenizer::new(&rules).tokenize("").is_empty());
    }

    #[test]
    fn test_paragraph_markers_between_paragraphs_only() {
        let rules = rules("es");
        let tokens = Tokenizer::new(&rules).tokenize("Hola.\r\nAdiós.");

        assert_eq!(texts(&tokens), vec!["Hola", ".", "¶", "Adiós", "."]);
        assert!(tokens[2].is_paragraph_marker());
        assert_eq!(eos_texts(&tokens), vec![(1, "."), (2, "¶"), (4, ".")]);
    }

    #[test]
    fn test_lone_carriage_return_is_paragraph_break() {
        let rules = rules("en");
        let tokens = Tokenizer::new(&rules).tokenize("one\rtwo");
        assert_eq!(texts(&tokens), vec!["one", "¶", "two"]);
    }

    #[test]
    fn test_literal_pilcrow_becomes_paragraph_break() {
        let rules = rules("en");
        let tokens = Tokenizer::new(&rules).tokenize("one¶two");
        assert_eq!(texts(&tokens), vec!["one", "¶", "two"]);
        assert!(tokens[1].is_paragraph_marker());
    }

    #[test]
    fn test_whitespace_collapses() {
        let rules = rules("en");
        let tokens = Tokenizer::new(&rules).tokenize("a  \t b\u{00A0}\u{00A0}c");
        assert_eq!(texts(&tokens), vec!["a", " ", "b", " ", "c"]);
    }

    #[test]
    fn test_reserved_characters_are_remapped() {
        let rules = rules("en");
        let tokens = Tokenizer::new(&rules).tokenize("{a}b\u{200B}c");
        assert_eq!(texts(&tokens), vec!["[", "a", "]", "bc"]);
    }

    #[test]
    fn test_substitutions_apply_before_tokenizing() {
        let rules = rules("en");
        let tokens = Tokenizer::new(&rules).tokenize("don´t");
        assert_eq!(texts(&tokens), vec!["don", "'", "t"]);
    }

    #[test]
    fn test_digits_are_non_word_and_decimals_do_not_end_sentences() {
        let rules = rules("es");
        let tokens = Tokenizer::new(&rules).tokenize("Cuesta 3.50 euros.");

        assert_eq!(
            texts(&tokens),
            vec!["Cuesta", " ", "3", ".", "5", "0", " ", "euros", "."]
        );
        assert_eq!(eos_texts(&tokens), vec![(8, ".")]);
    }

    #[test]
    fn test_exceptions_are_exact() {
        let rules = rules("es");
        let tokenizer = Tokenizer::new(&rules);

        let tokens = tokenizer.tokenize("Sra. López llegó.");
        assert_eq!(eos_texts(&tokens).len(), 1);

        let tokens = tokenizer.tokenize("SRA. López llegó.");
        assert_eq!(eos_texts(&tokens).len(), 2);
    }

    #[test]
    fn test_abbreviations_do_not_end_sentences() {
        let rules = rules("en");
        let tokens = Tokenizer::new(&rules).tokenize("Dr. Who came. Then J. Doe left.");
        let ends: Vec<&str> = eos_texts(&tokens).into_iter().map(|(_, t)| t).collect();
        assert_eq!(ends.len(), 2);
    }

    #[test]
    fn test_split_each_character_and_remove_spaces() {
        let rules = rules("lzh");
        let tokens = Tokenizer::new(&rules).tokenize("學而時習之。不亦說乎");

        assert_eq!(
            texts(&tokens),
            vec!["學", "而", "時", "習", "之", "。", "不", "亦", "說", "乎"]
        );
        assert!(tokens.iter().filter(|t| t.text != "。").all(|t| t.is_word));
        assert_eq!(eos_texts(&tokens), vec![(5, "。")]);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let rules = rules("es");
        let tokenizer = Tokenizer::new(&rules);
        let text = "¿Qué tal? Bien, gracias.\nY tú...";
        assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
    }

    #[test]
    fn test_tokenize_stream_numbers_from_zero() {
        let rules = rules("en");
        let stream = Tokenizer::new(&rules).tokenize_stream("a b");
        assert_eq!(stream.first_order(), 0);
        assert_eq!(stream.len(), 3);
    }
}
