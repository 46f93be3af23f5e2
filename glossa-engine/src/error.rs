//! Engine error types
//!
//! Wraps core errors and adds the failures of the collaborators the engine
//! talks to (book and vocabulary stores, language rules).

use glossa_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core pipeline error
    #[error("core pipeline error: {0}")]
    Core(#[from] CoreError),

    /// No book with this id
    #[error("unknown book: {id}")]
    UnknownBook {
        /// The requested book id
        id: u64,
    },

    /// No rules for this language
    #[error("language '{code}' not supported")]
    UnknownLanguage {
        /// The requested language code
        code: String,
    },

    /// A collaborator (text or vocabulary store) failed
    #[error("provider error: {0}")]
    Provider(String),
}

impl EngineError {
    /// Whether the error names something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownBook { .. } | EngineError::UnknownLanguage { .. }
        )
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
