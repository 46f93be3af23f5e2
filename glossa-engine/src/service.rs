//! Cached book statistics
//!
//! [`StatsService`] memoizes [`BookStats`] per book. Invalidation only marks
//! entries stale; the next read recomputes lazily and takes every other
//! stale book of the same language along, so the vocabulary is loaded once
//! per batch. Computation happens outside the cache lock.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::provider::{BookId, LanguageRulesProvider, TextProvider, VocabularyProvider};
use crate::stats::{BookStats, StatsAggregator};
use glossa_core::{LanguageRules, Vocabulary};
use std::collections::{hash_map::Entry, BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
struct CacheEntry {
    language: String,
    /// Bumped on every invalidation; a computation only stores its result
    /// when the generation it started from is still current
    generation: u64,
    stats: Option<BookStats>,
}

/// Statistics service with a per-book cache
pub struct StatsService {
    texts: Arc<dyn TextProvider>,
    vocabulary: Arc<dyn VocabularyProvider>,
    languages: Arc<dyn LanguageRulesProvider>,
    config: EngineConfig,
    cache: Mutex<HashMap<BookId, CacheEntry>>,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StatsService {
    /// Create a service over the given providers
    pub fn new(
        texts: Arc<dyn TextProvider>,
        vocabulary: Arc<dyn VocabularyProvider>,
        languages: Arc<dyn LanguageRulesProvider>,
        config: EngineConfig,
    ) -> Self {
        Self {
            texts,
            vocabulary,
            languages,
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<BookId, CacheEntry>> {
        // Entries are only replaced whole, so a poisoned map is still usable
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Statistics for a book, computing them when missing or stale
    pub fn stats(&self, book: BookId) -> Result<BookStats> {
        if let Some(stats) = self.cached_stats(book) {
            return Ok(stats);
        }

        let language = self.texts.book(book)?.language;
        let mut batch = self.stale_books(&language);
        if !batch.contains(&book) {
            batch.push(book);
        }

        let mut results = self.compute_batch(&language, &batch, Some(book))?;
        results
            .remove(&book)
            .ok_or(EngineError::UnknownBook { id: book })
    }

    /// Cached statistics; `None` when the book has no fresh entry
    pub fn cached_stats(&self, book: BookId) -> Option<BookStats> {
        self.lock().get(&book).and_then(|entry| entry.stats.clone())
    }

    /// Invalidate one book, e.g. after its texts changed
    pub fn mark_stale(&self, book: BookId) {
        if let Some(entry) = self.lock().get_mut(&book) {
            entry.stats = None;
            entry.generation += 1;
            tracing::debug!(book, "marked book stats stale");
        }
    }

    /// Invalidate every book of a language, e.g. after a term changed
    pub fn mark_language_stale(&self, language: &str) {
        let mut cache = self.lock();
        let mut marked = 0usize;
        for entry in cache.values_mut().filter(|e| e.language == language) {
            entry.stats = None;
            entry.generation += 1;
            marked += 1;
        }
        tracing::debug!(language, books = marked, "marked language stats stale");
    }

    /// Recompute every stale or never computed book now, batched by language
    ///
    /// Returns the number of books recomputed. A book that can no longer be
    /// computed (e.g. deleted) is dropped from the cache.
    pub fn refresh(&self) -> Result<usize> {
        let known = self.texts.book_ids()?;
        let mut by_language: BTreeMap<String, BTreeSet<BookId>> = BTreeMap::new();
        let mut uncached = Vec::new();
        {
            let cache = self.lock();
            for (id, entry) in cache.iter().filter(|(_, e)| e.stats.is_none()) {
                by_language.entry(entry.language.clone()).or_default().insert(*id);
            }
            uncached.extend(known.into_iter().filter(|id| !cache.contains_key(id)));
        }
        for id in uncached {
            match self.texts.book(id) {
                Ok(book) => {
                    by_language.entry(book.language).or_default().insert(id);
                }
                Err(EngineError::UnknownBook { .. }) => {
                    tracing::debug!(book = id, "book vanished before refresh");
                }
                Err(e) => return Err(e),
            }
        }

        let batches: Vec<(String, Vec<BookId>)> = by_language
            .into_iter()
            .map(|(language, books)| (language, books.into_iter().collect()))
            .collect();
        let counts = self.refresh_batches(&batches)?;
        Ok(counts.into_iter().sum())
    }

    #[cfg(feature = "parallel")]
    fn refresh_batches(&self, batches: &[(String, Vec<BookId>)]) -> Result<Vec<usize>> {
        use rayon::prelude::*;
        batches
            .par_iter()
            .map(|(language, books)| self.refresh_batch(language, books))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn refresh_batches(&self, batches: &[(String, Vec<BookId>)]) -> Result<Vec<usize>> {
        batches
            .iter()
            .map(|(language, books)| self.refresh_batch(language, books))
            .collect()
    }

    fn refresh_batch(&self, language: &str, books: &[BookId]) -> Result<usize> {
        match self.compute_batch(language, books, None) {
            Ok(results) => Ok(results.len()),
            Err(EngineError::UnknownLanguage { code }) => {
                tracing::warn!(
                    language = %code,
                    books = books.len(),
                    "skipping books of unknown language"
                );
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    /// Number of books with a cache entry, fresh or stale
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no book has been seen yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn stale_books(&self, language: &str) -> Vec<BookId> {
        let mut books: Vec<BookId> = self
            .lock()
            .iter()
            .filter(|(_, e)| e.language == language && e.stats.is_none())
            .map(|(id, _)| *id)
            .collect();
        books.sort_unstable();
        books
    }

    /// Compute a batch of books of one language and store the results
    ///
    /// Errors for `required` propagate; errors for other books evict them.
    /// Books without a cache entry get a stale placeholder before anything
    /// is read, so an invalidation during their first computation is seen.
    fn compute_batch(
        &self,
        language: &str,
        books: &[BookId],
        required: Option<BookId>,
    ) -> Result<HashMap<BookId, BookStats>> {
        let mut placeholders = Vec::new();
        let generations: HashMap<BookId, u64> = {
            let mut cache = self.lock();
            let generations = books
                .iter()
                .map(|&id| match cache.entry(id) {
                    Entry::Occupied(entry) => (id, entry.get().generation),
                    Entry::Vacant(slot) => {
                        slot.insert(CacheEntry {
                            language: language.to_string(),
                            generation: 0,
                            stats: None,
                        });
                        placeholders.push(id);
                        (id, 0)
                    }
                })
                .collect();
            generations
        };

        let loaded = self.load_language(language);
        let (rules, vocabulary) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                self.evict_unfilled(&placeholders);
                return Err(e);
            }
        };
        tracing::debug!(
            language,
            books = books.len(),
            terms = vocabulary.len(),
            "computing stats batch"
        );

        let aggregator = StatsAggregator::new(&rules, &vocabulary, self.config.chunk_policy);
        let mut results = HashMap::with_capacity(books.len());
        for &book in books {
            let computed = self
                .texts
                .texts_for_book(book)
                .and_then(|texts| aggregator.compute(&texts));
            match computed {
                Ok(stats) => {
                    results.insert(book, stats);
                }
                Err(e) if required == Some(book) => {
                    self.evict_unfilled(&placeholders);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(book, error = %e, "dropping book from stats cache");
                    self.lock().remove(&book);
                }
            }
        }

        let mut cache = self.lock();
        for (book, stats) in &results {
            let started = generations.get(book).copied().unwrap_or(0);
            match cache.get_mut(book) {
                Some(entry) if entry.generation == started => entry.stats = Some(stats.clone()),
                Some(_) => {
                    tracing::debug!(book, "book invalidated while computing, not caching");
                }
                None => {
                    tracing::debug!(book, "book evicted while computing, not caching");
                }
            }
        }

        Ok(results)
    }

    fn load_language(&self, language: &str) -> Result<(Arc<LanguageRules>, Vocabulary)> {
        let rules = self.languages.rules_for_language(language)?;
        let vocabulary = self
            .vocabulary
            .terms_for_language(language)?
            .into_iter()
            .collect();
        Ok((rules, vocabulary))
    }

    /// Drop placeholders that never received statistics
    fn evict_unfilled(&self, books: &[BookId]) {
        let mut cache = self.lock();
        for book in books {
            if cache.get(book).is_some_and(|e| e.stats.is_none()) {
                cache.remove(book);
            }
        }
    }
}
