//! Vocabulary files
//!
//! A small TOML list of terms used to try the reader and statistics from
//! the command line:
//!
//! ```toml
//! [[terms]]
//! text = "tengo un"
//! status = 2
//!
//! [[terms]]
//! text = "gatos"
//! status = 1
//! parent = "gato"
//! ```
//!
//! Terms get ids in file order starting at 1. A `parent` names another
//! term of the same file.

use crate::error::CliError;
use anyhow::{Context, Result};
use glossa_core::{Term, TermId, TermStatus, Tokenizer};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    terms: Vec<TermEntry>,
}

#[derive(Debug, Deserialize)]
struct TermEntry {
    text: String,
    #[serde(default = "default_status")]
    status: u8,
    #[serde(default)]
    parent: Option<String>,
}

fn default_status() -> u8 {
    TermStatus::default().code()
}

/// Read and parse a vocabulary file
pub fn load_terms(path: &Path, tokenizer: &Tokenizer<'_>) -> Result<Vec<Term>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
    let terms = parse_terms(&content, tokenizer)
        .with_context(|| format!("Invalid vocabulary file: {}", path.display()))?;
    log::info!("Loaded {} term(s) from {}", terms.len(), path.display());
    Ok(terms)
}

/// Parse vocabulary TOML, tokenizing each term with `tokenizer`
pub fn parse_terms(content: &str, tokenizer: &Tokenizer<'_>) -> Result<Vec<Term>> {
    let file: VocabularyFile =
        toml::from_str(content).map_err(|e| CliError::VocabularyError(e.to_string()))?;

    let mut terms = Vec::with_capacity(file.terms.len());
    for (index, entry) in file.terms.iter().enumerate() {
        let status = TermStatus::try_from(entry.status)
            .map_err(|e| CliError::VocabularyError(format!("term '{}': {e}", entry.text)))?;
        let term = Term::parse(&entry.text, tokenizer, status)
            .with_context(|| format!("term #{}", index + 1))?;
        terms.push(term.with_id(index as TermId + 1));
    }

    let ids: HashMap<String, TermId> = terms
        .iter()
        .filter_map(|t| t.id().map(|id| (t.text_lc().to_string(), id)))
        .collect();

    for (term, entry) in terms.iter_mut().zip(&file.terms) {
        let Some(parent) = &entry.parent else {
            continue;
        };
        let key = Term::parse(parent, tokenizer, TermStatus::default())
            .with_context(|| format!("parent of '{}'", entry.text))?;
        let parent_id = ids.get(key.text_lc()).copied().ok_or_else(|| {
            CliError::VocabularyError(format!(
                "parent '{}' of '{}' is not in the file",
                parent, entry.text
            ))
        })?;
        *term = term.clone().with_parent(parent_id);
    }

    Ok(terms)
}
