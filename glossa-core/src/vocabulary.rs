//! Vocabulary index
//!
//! Indexes the terms of one language for matching against token streams:
//! single-token terms by lowercased text, multi-token terms in a list that
//! is searched with the [`TokenLocator`].

use crate::error::Result;
use crate::locator::TokenLocator;
use crate::resolver::{resolve, MatchCandidate, RenderableUnit};
use crate::term::{Term, TermId};
use crate::token::TokenStream;
use std::collections::HashMap;

/// Terms of one language, indexed by lowercased text
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<Term>,
    by_text: HashMap<String, usize>,
    multi_token: Vec<usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term; a term with the same lowercased text is replaced
    pub fn insert(&mut self, term: Term) {
        if let Some(&index) = self.by_text.get(term.text_lc()) {
            tracing::debug!(text = %term.display_text(), "replacing duplicate term");
            self.terms[index] = term;
            return;
        }

        let index = self.terms.len();
        self.by_text.insert(term.text_lc().to_string(), index);
        if term.is_multi_token() {
            self.multi_token.push(index);
        }
        self.terms.push(term);
    }

    /// Term by lowercased text
    pub fn get(&self, text_lc: &str) -> Option<&Term> {
        self.by_text.get(text_lc).map(|&index| &self.terms[index])
    }

    /// Term by persisted id
    pub fn get_by_id(&self, id: TermId) -> Option<&Term> {
        self.terms.iter().find(|t| t.id() == Some(id))
    }

    /// All terms in insertion order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every occurrence of every term in `stream`
    ///
    /// Single-token matches come first, in position order, followed by the
    /// multi-token matches of each term in insertion order.
    pub fn candidates<'v>(&'v self, stream: &TokenStream) -> Result<Vec<MatchCandidate<'v>>> {
        let locator = TokenLocator::new(stream);
        let tokens = stream.tokens();
        let mut candidates = Vec::new();

        for (position, text) in locator.lowercase_tokens().enumerate() {
            if let Some(term) = self.get(text).filter(|t| !t.is_multi_token()) {
                candidates.push(MatchCandidate::term(
                    term,
                    position,
                    tokens[position].text.clone(),
                    tokens[position].is_word,
                ));
            }
        }

        for &index in &self.multi_token {
            let term = &self.terms[index];
            for found in locator.locate(term.text_lc(), term.token_count())? {
                let span = &tokens[found.position..found.position + term.token_count()];
                let is_word = span.iter().any(|t| t.is_word);
                candidates.push(MatchCandidate::term(term, found.position, found.text, is_word));
            }
        }

        tracing::trace!(
            tokens = stream.len(),
            candidates = candidates.len(),
            "located vocabulary terms"
        );
        Ok(candidates)
    }

    /// Locate and resolve in one step
    pub fn render<'v>(&'v self, stream: &TokenStream) -> Result<Vec<RenderableUnit<'v>>> {
        resolve(stream, self.candidates(stream)?)
    }
}

impl FromIterator<Term> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for term in iter {
            vocabulary.insert(term);
        }
        vocabulary
    }
}
