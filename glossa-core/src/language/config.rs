//! Configuration structures and validation
//!
//! This module defines the TOML schema for language configuration.

use crate::error::{CoreError, Result};
use crate::token::{PARAGRAPH_MARKER, TOKEN_DELIMITER};
use serde::{Deserialize, Serialize};

/// Root language configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    pub words: Words,
    #[serde(default)]
    pub sentences: Sentences,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    #[serde(default)]
    pub options: Options,
}

/// Language metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Word character configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Words {
    /// Body of a regex character class, without the surrounding brackets
    pub character_class: String,
}

/// Sentence end configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentences {
    /// Characters that may end a sentence, e.g. ".!?"
    #[serde(default)]
    pub end_chars: String,
    /// Apparent sentence ends that are not, e.g. "Mr."
    #[serde(default)]
    pub exceptions: Vec<String>,
}

/// Literal replacement applied before tokenizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

/// Tokenizer switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Treat every character as its own word (no word separators)
    #[serde(default)]
    pub split_each_character: bool,
    /// Drop space tokens from the output
    #[serde(default)]
    pub remove_spaces: bool,
}

impl LanguageConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CoreError::Configuration(format!("failed to parse TOML: {e}")))
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| CoreError::Configuration(format!("failed to serialize TOML: {e}")))
    }

    /// Validate configuration
    ///
    /// Only checks what can be checked without compiling the character
    /// class; `LanguageRules::from_config` compiles and checks the rest.
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(CoreError::Configuration(
                "language code must not be empty".to_string(),
            ));
        }

        if self.words.character_class.trim().is_empty() {
            return Err(CoreError::Configuration(
                "no word characters defined".to_string(),
            ));
        }

        if self.sentences.end_chars.contains(TOKEN_DELIMITER)
            || self.sentences.end_chars.contains(PARAGRAPH_MARKER)
        {
            return Err(CoreError::Configuration(
                "sentence end characters may not include reserved markers".to_string(),
            ));
        }

        if let Some(pos) = self.substitutions.iter().position(|s| s.from.is_empty()) {
            return Err(CoreError::Configuration(format!(
                "substitution #{} has an empty source",
                pos + 1
            )));
        }

        Ok(())
    }
}
