//! Collaborator interfaces and in-memory implementations
//!
//! The engine never owns persistence. Books, texts and terms come from the
//! providers defined here; the in-memory versions back tests and the CLI.

use crate::error::{EngineError, Result};
use glossa_core::{LanguageRegistry, LanguageRules, Term, TermId, Token, TOKEN_DELIMITER};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Identifier of a book
pub type BookId = u64;

/// Book metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book id
    pub id: BookId,
    /// Language code of the book's texts
    pub language: String,
    /// Human readable title
    pub title: String,
}

/// One text (page) of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookText {
    /// Persisted order of the text within its book
    pub order: usize,
    /// Raw text
    pub text: String,
}

/// Source of vocabulary terms
pub trait VocabularyProvider: Send + Sync {
    /// All terms of a language
    fn terms_for_language(&self, language: &str) -> Result<Vec<Term>>;

    /// Terms that may occur in `tokens`, plus their parents
    fn terms_matching_tokens(&self, tokens: &[Token], language: &str) -> Result<Vec<Term>>;
}

/// Source of books and their texts
pub trait TextProvider: Send + Sync {
    /// Book metadata; [`EngineError::UnknownBook`] when missing
    fn book(&self, id: BookId) -> Result<Book>;

    /// Texts of a book in persisted order
    fn texts_for_book(&self, id: BookId) -> Result<Vec<BookText>>;

    /// Ids of every book the provider knows
    fn book_ids(&self) -> Result<Vec<BookId>>;
}

/// Source of compiled language rules
pub trait LanguageRulesProvider: Send + Sync {
    /// Rules for a language code
    fn rules_for_language(&self, language: &str) -> Result<Arc<LanguageRules>>;
}

impl LanguageRulesProvider for LanguageRegistry {
    fn rules_for_language(&self, language: &str) -> Result<Arc<LanguageRules>> {
        self.get(language).ok_or_else(|| EngineError::UnknownLanguage {
            code: language.to_string(),
        })
    }
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::Provider("in-memory store lock poisoned".to_string())
}

/// Vocabulary kept in memory, per language
#[derive(Debug, Default)]
pub struct InMemoryVocabulary {
    terms: RwLock<HashMap<String, Vec<Term>>>,
}

impl InMemoryVocabulary {
    /// Empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term to a language
    pub fn add_term(&self, language: &str, term: Term) -> Result<()> {
        self.terms
            .write()
            .map_err(poisoned)?
            .entry(language.to_string())
            .or_default()
            .push(term);
        Ok(())
    }

    /// Replace all terms of a language
    pub fn set_terms(&self, language: &str, terms: Vec<Term>) -> Result<()> {
        self.terms
            .write()
            .map_err(poisoned)?
            .insert(language.to_string(), terms);
        Ok(())
    }
}

impl VocabularyProvider for InMemoryVocabulary {
    fn terms_for_language(&self, language: &str) -> Result<Vec<Term>> {
        let terms = self.terms.read().map_err(poisoned)?;
        Ok(terms.get(language).cloned().unwrap_or_default())
    }

    fn terms_matching_tokens(&self, tokens: &[Token], language: &str) -> Result<Vec<Term>> {
        let terms = self.terms.read().map_err(poisoned)?;
        let Some(all) = terms.get(language) else {
            return Ok(Vec::new());
        };

        let present: HashSet<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let mut matched: Vec<Term> = all
            .iter()
            .filter(|term| {
                term.text_lc()
                    .split(TOKEN_DELIMITER)
                    .all(|part| present.contains(part))
            })
            .cloned()
            .collect();

        let mut seen: HashSet<TermId> = matched.iter().filter_map(Term::id).collect();
        let parent_ids: Vec<TermId> = matched.iter().filter_map(Term::parent_id).collect();
        for parent_id in parent_ids {
            if seen.insert(parent_id) {
                if let Some(parent) = all.iter().find(|t| t.id() == Some(parent_id)) {
                    matched.push(parent.clone());
                }
            }
        }

        Ok(matched)
    }
}

/// Books and texts kept in memory
#[derive(Debug, Default)]
pub struct InMemoryTexts {
    books: RwLock<BTreeMap<BookId, (Book, Vec<BookText>)>>,
}

impl InMemoryTexts {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a book and its texts
    pub fn add_book(&self, book: Book, texts: Vec<BookText>) -> Result<()> {
        self.books
            .write()
            .map_err(poisoned)?
            .insert(book.id, (book, texts));
        Ok(())
    }

    /// Replace the texts of an existing book
    pub fn set_texts(&self, id: BookId, texts: Vec<BookText>) -> Result<()> {
        let mut books = self.books.write().map_err(poisoned)?;
        let entry = books.get_mut(&id).ok_or(EngineError::UnknownBook { id })?;
        entry.1 = texts;
        Ok(())
    }

    /// Remove a book, returning it if it existed
    pub fn remove_book(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self
            .books
            .write()
            .map_err(poisoned)?
            .remove(&id)
            .map(|(book, _)| book))
    }
}

impl TextProvider for InMemoryTexts {
    fn book(&self, id: BookId) -> Result<Book> {
        self.books
            .read()
            .map_err(poisoned)?
            .get(&id)
            .map(|(book, _)| book.clone())
            .ok_or(EngineError::UnknownBook { id })
    }

    fn texts_for_book(&self, id: BookId) -> Result<Vec<BookText>> {
        let books = self.books.read().map_err(poisoned)?;
        let (_, texts) = books.get(&id).ok_or(EngineError::UnknownBook { id })?;
        let mut texts = texts.clone();
        texts.sort_by_key(|t| t.order);
        Ok(texts)
    }

    fn book_ids(&self) -> Result<Vec<BookId>> {
        Ok(self.books.read().map_err(poisoned)?.keys().copied().collect())
    }
}
