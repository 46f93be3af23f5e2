//! Core error types
//!
//! Only two kinds of failure exist in the core: bad language rules, caught
//! when the rules are loaded, and broken preconditions on the token stream.
//! Ordinary data conditions (empty text, empty vocabulary) are not errors.

use thiserror::Error;

/// Errors raised by the tokenize-match-resolve pipeline
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid language rules
    #[error("invalid language configuration: {0}")]
    Configuration(String),

    /// The word character class could not be compiled
    #[error("invalid word character class '{class}': {source}")]
    InvalidCharacterClass {
        /// The class as written in the configuration
        class: String,
        /// Compilation error from the regex engine
        #[source]
        source: regex::Error,
    },

    /// A caller broke a precondition (token ordering, term shape)
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Reading a configuration file failed
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path of the file being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Whether this error comes from rule loading rather than from a caller bug
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CoreError::Configuration(_) | CoreError::InvalidCharacterClass { .. } | CoreError::Io { .. }
        )
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
