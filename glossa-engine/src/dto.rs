//! Owned results for presentation layers

use glossa_core::{RenderableUnit, TermId, TokenStream, TOKEN_DELIMITER, UNKNOWN_STATUS_CODE};
use serde::{Deserialize, Serialize};

/// One displayed unit of a rendered text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedUnit {
    /// Persisted order of the unit's first token
    pub order: usize,
    /// Number of tokens the unit spans
    pub length: usize,
    /// Full matched text
    pub text: String,
    /// Text to display, without tokens already shown by the previous unit
    pub display_text: String,
    /// Whether the unit holds a word
    pub is_word: bool,
    /// Whether the unit is a vocabulary term
    pub is_term: bool,
    /// Matched term id, if persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_id: Option<TermId>,
    /// Term status code, 0 when the unit is not a term
    pub status: u8,
    /// Parent of the matched term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TermId>,
}

impl RenderedUnit {
    /// Convert a resolved unit of `stream`
    pub fn from_unit(unit: &RenderableUnit<'_>, stream: &TokenStream) -> Self {
        let term = unit.matched_term();
        Self {
            order: stream.order_of(unit.start()),
            length: unit.length(),
            text: unit.candidate.text.replace(TOKEN_DELIMITER, ""),
            display_text: unit.display_text.clone(),
            is_word: unit.is_word(),
            is_term: term.is_some(),
            term_id: term.and_then(|t| t.id()),
            status: term.map_or(UNKNOWN_STATUS_CODE, |t| t.status().code()),
            parent_id: term.and_then(|t| t.parent_id()),
        }
    }
}
