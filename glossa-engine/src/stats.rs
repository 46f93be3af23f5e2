//! Book statistics
//!
//! Counts how much of a book the learner already knows. A book's texts are
//! tokenized in order (joined by a paragraph marker), chunked on sentence
//! ends, and each chunk is located and resolved against the language's
//! vocabulary. Word units that resolve to a term are known; plain word
//! tokens are unknown.

use crate::chunker::SentenceChunker;
use crate::config::ChunkPolicy;
use crate::error::Result;
use crate::provider::BookText;
use glossa_core::{
    LanguageRules, Token, TokenStream, Tokenizer, Vocabulary, UNKNOWN_STATUS_CODE,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Aggregate known/unknown counts for one book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStats {
    /// Number of word tokens
    pub total_word_tokens: usize,
    /// Number of distinct word tokens, compared in lowercase
    pub distinct_word_tokens: usize,
    /// Number of distinct unknown words, compared in lowercase
    pub distinct_unknown_tokens: usize,
    /// `distinct_unknown_tokens` as a rounded percentage of
    /// `distinct_word_tokens`; 0 when there are no words
    pub unknown_percent: u32,
    /// Rendered word units per status code, 0 meaning unknown
    pub status_counts: BTreeMap<u8, usize>,
}

/// Computes [`BookStats`] for texts of one language
#[derive(Debug)]
pub struct StatsAggregator<'a> {
    rules: &'a LanguageRules,
    vocabulary: &'a Vocabulary,
    policy: ChunkPolicy,
}

impl<'a> StatsAggregator<'a> {
    /// Create an aggregator over a language's rules and vocabulary
    pub fn new(rules: &'a LanguageRules, vocabulary: &'a Vocabulary, policy: ChunkPolicy) -> Self {
        Self {
            rules,
            vocabulary,
            policy,
        }
    }

    /// Statistics for a book's texts
    ///
    /// Texts are processed in the given order; callers pass them sorted by
    /// their persisted order.
    pub fn compute(&self, texts: &[BookText]) -> Result<BookStats> {
        let tokenizer = Tokenizer::new(self.rules);
        let mut chunker = SentenceChunker::new(self.policy);
        let mut counts = Counts::default();
        let mut chunks = 0usize;

        for (i, text) in texts.iter().enumerate() {
            let mut tokens = tokenizer.tokenize(&text.text);
            if i > 0 {
                tokens.insert(0, Token::paragraph_marker());
            }
            for token in tokens {
                if let Some(chunk) = chunker.push(token) {
                    counts.add_chunk(&chunk, self.vocabulary)?;
                    chunks += 1;
                }
            }
        }
        if let Some(chunk) = chunker.finish() {
            counts.add_chunk(&chunk, self.vocabulary)?;
            chunks += 1;
        }

        let stats = counts.finish();
        tracing::debug!(
            language = self.rules.code(),
            texts = texts.len(),
            chunks,
            words = stats.total_word_tokens,
            unknown_percent = stats.unknown_percent,
            "computed book stats"
        );
        Ok(stats)
    }
}

#[derive(Debug, Default)]
struct Counts {
    total_words: usize,
    distinct_words: HashSet<String>,
    distinct_unknown: HashSet<String>,
    status_counts: BTreeMap<u8, usize>,
}

impl Counts {
    fn add_chunk(&mut self, chunk: &TokenStream, vocabulary: &Vocabulary) -> Result<()> {
        for token in chunk.tokens().iter().filter(|t| t.is_word) {
            self.total_words += 1;
            self.distinct_words.insert(token.text.to_lowercase());
        }

        for unit in vocabulary.render(chunk)? {
            if !unit.is_word() {
                continue;
            }
            let status = match unit.matched_term() {
                Some(term) => term.status().code(),
                None => {
                    self.distinct_unknown.insert(unit.candidate.text.to_lowercase());
                    UNKNOWN_STATUS_CODE
                }
            };
            *self.status_counts.entry(status).or_insert(0) += 1;
        }

        Ok(())
    }

    fn finish(self) -> BookStats {
        let distinct = self.distinct_words.len();
        let unknown = self.distinct_unknown.len();
        BookStats {
            total_word_tokens: self.total_words,
            distinct_word_tokens: distinct,
            distinct_unknown_tokens: unknown,
            unknown_percent: unknown_percent(unknown, distinct),
            status_counts: self.status_counts,
        }
    }
}

fn unknown_percent(unknown: usize, distinct: usize) -> u32 {
    if distinct == 0 {
        return 0;
    }
    (100.0 * unknown as f64 / distinct as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::{LanguageRegistry, Term, TermStatus};

    fn spanish_stats(known: &[(&str, TermStatus)], texts: &[&str], policy: ChunkPolicy) -> BookStats {
        let registry = LanguageRegistry::with_builtin().unwrap();
        let rules = registry.rules("es").unwrap();
        let tokenizer = Tokenizer::new(&rules);
        let vocabulary: Vocabulary = known
            .iter()
            .map(|(text, status)| Term::parse(text, &tokenizer, *status).unwrap())
            .collect();
        let texts: Vec<BookText> = texts
            .iter()
            .enumerate()
            .map(|(order, text)| BookText {
                order,
                text: text.to_string(),
            })
            .collect();

        StatsAggregator::new(&rules, &vocabulary, policy)
            .compute(&texts)
            .unwrap()
    }

    #[test]
    fn test_unknown_percent_rounding() {
        assert_eq!(unknown_percent(1, 3), 33);
        assert_eq!(unknown_percent(2, 3), 67);
        assert_eq!(unknown_percent(1, 8), 13);
        assert_eq!(unknown_percent(0, 0), 0);
    }

    #[test]
    fn test_status_counts_include_unknown() {
        let stats = spanish_stats(
            &[("gato", TermStatus::Learning(3)), ("un", TermStatus::WellKnown)],
            &["Tengo un gato. Un gato."],
            ChunkPolicy::default(),
        );

        assert_eq!(stats.total_word_tokens, 5);
        assert_eq!(stats.status_counts.get(&0), Some(&1));
        assert_eq!(stats.status_counts.get(&3), Some(&2));
        assert_eq!(stats.status_counts.get(&99), Some(&2));
    }

    #[test]
    fn test_chunk_size_does_not_change_counts() {
        let texts = ["Tengo un gato. Mi gato come. El perro duerme.", "Tengo un perro."];
        let known = [("tengo un", TermStatus::Learning(2)), ("gato", TermStatus::WellKnown)];

        let whole = spanish_stats(&known, &texts, ChunkPolicy::default());
        let tiny = spanish_stats(&known, &texts, ChunkPolicy::new(1));
        assert_eq!(whole, tiny);
    }

    #[test]
    fn test_no_texts() {
        let stats = spanish_stats(&[], &[], ChunkPolicy::default());
        assert_eq!(stats, BookStats::default());
    }
}
