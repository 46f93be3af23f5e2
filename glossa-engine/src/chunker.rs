//! Sentence-aligned token chunking
//!
//! Statistics are computed chunk by chunk so memory stays proportional to
//! the chunk size. Chunks only ever end on an end-of-sentence token, so a
//! term can never be cut in half unless it spans a sentence boundary
//! itself.

use crate::config::ChunkPolicy;
use glossa_core::{Token, TokenStream};

/// Incremental chunker fed one token at a time
#[derive(Debug)]
pub struct SentenceChunker {
    policy: ChunkPolicy,
    next_order: usize,
    first_order: usize,
    current: Vec<Token>,
    sentence_start: usize,
}

impl SentenceChunker {
    /// Create a chunker for the given policy
    pub fn new(policy: ChunkPolicy) -> Self {
        Self {
            policy,
            next_order: 0,
            first_order: 0,
            current: Vec::new(),
            sentence_start: 0,
        }
    }

    /// Add a token; returns a chunk when this token closes one
    pub fn push(&mut self, token: Token) -> Option<TokenStream> {
        if self.current.is_empty() {
            self.first_order = self.next_order;
        }
        self.next_order += 1;

        let ends_sentence = token.is_end_of_sentence;
        self.current.push(token);
        if !ends_sentence {
            return None;
        }

        let sentence_len = self.current.len() - self.sentence_start;
        if sentence_len > self.policy.target_tokens {
            tracing::warn!(
                tokens = sentence_len,
                target = self.policy.target_tokens,
                "sentence exceeds chunk target, keeping it whole"
            );
        }
        self.sentence_start = self.current.len();

        if self.current.len() >= self.policy.target_tokens {
            Some(self.take())
        } else {
            None
        }
    }

    /// Flush the remaining tokens, if any
    pub fn finish(mut self) -> Option<TokenStream> {
        if self.current.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    fn take(&mut self) -> TokenStream {
        self.sentence_start = 0;
        let tokens = std::mem::take(&mut self.current);
        tracing::debug!(first_order = self.first_order, tokens = tokens.len(), "closed chunk");
        TokenStream::with_first_order(self.first_order, tokens)
    }
}

/// Split `tokens` into sentence-aligned chunks
pub fn chunk_tokens(tokens: Vec<Token>, policy: ChunkPolicy) -> Vec<TokenStream> {
    let mut chunker = SentenceChunker::new(policy);
    let mut chunks: Vec<TokenStream> = tokens
        .into_iter()
        .filter_map(|token| chunker.push(token))
        .collect();
    chunks.extend(chunker.finish());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(words: usize) -> Vec<Token> {
        let mut tokens: Vec<Token> = (0..words).map(|i| Token::word(format!("w{i}"))).collect();
        tokens.push(Token::non_word(".", true));
        tokens
    }

    #[test]
    fn test_closes_at_first_sentence_end_after_target() {
        let tokens: Vec<Token> = [sentence(2), sentence(2), sentence(2)].concat();
        let chunks = chunk_tokens(tokens, ChunkPolicy::new(4));

        let sizes: Vec<usize> = chunks.iter().map(TokenStream::len).collect();
        assert_eq!(sizes, vec![6, 3]);
        assert_eq!(chunks[1].first_order(), 6);
    }

    #[test]
    fn test_oversized_sentence_stays_whole() {
        let chunks = chunk_tokens(sentence(10), ChunkPolicy::new(3));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 11);
    }

    #[test]
    fn test_trailing_tokens_without_sentence_end() {
        let mut tokens = sentence(1);
        tokens.push(Token::word("tail"));
        let chunks = chunk_tokens(tokens, ChunkPolicy::new(1));

        let sizes: Vec<usize> = chunks.iter().map(TokenStream::len).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn test_no_tokens_no_chunks() {
        assert!(chunk_tokens(Vec::new(), ChunkPolicy::default()).is_empty());
    }
}
