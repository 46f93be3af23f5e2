//! Rendering texts for reading
//!
//! Only the terms that can occur in the text are loaded from the
//! vocabulary provider, so a page renders without loading the whole
//! vocabulary of its language.

use crate::dto::RenderedUnit;
use crate::error::Result;
use crate::provider::{LanguageRulesProvider, VocabularyProvider};
use glossa_core::{TokenStream, Tokenizer, Vocabulary};
use std::sync::Arc;

/// Renders texts against the learner's vocabulary
pub struct Reader {
    languages: Arc<dyn LanguageRulesProvider>,
    vocabulary: Arc<dyn VocabularyProvider>,
}

impl Reader {
    /// Create a reader over the given providers
    pub fn new(
        languages: Arc<dyn LanguageRulesProvider>,
        vocabulary: Arc<dyn VocabularyProvider>,
    ) -> Self {
        Self {
            languages,
            vocabulary,
        }
    }

    /// Tokenize `text` and resolve it against the vocabulary
    pub fn render(&self, language: &str, text: &str) -> Result<Vec<RenderedUnit>> {
        let rules = self.languages.rules_for_language(language)?;
        let stream = Tokenizer::new(&rules).tokenize_stream(text);
        self.render_stream(language, &stream)
    }

    /// Resolve an already tokenized stream
    pub fn render_stream(&self, language: &str, stream: &TokenStream) -> Result<Vec<RenderedUnit>> {
        let vocabulary: Vocabulary = self
            .vocabulary
            .terms_matching_tokens(stream.tokens(), language)?
            .into_iter()
            .collect();

        let units = vocabulary.render(stream)?;
        tracing::debug!(
            language,
            tokens = stream.len(),
            terms = vocabulary.len(),
            units = units.len(),
            "rendered text"
        );
        Ok(units
            .iter()
            .map(|unit| RenderedUnit::from_unit(unit, stream))
            .collect())
    }
}
