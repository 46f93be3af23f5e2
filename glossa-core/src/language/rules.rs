//! Compiled language rules
//!
//! `LanguageRules` is the validated, ready-to-use form of a
//! [`LanguageConfig`]. All checks happen here so the tokenizer itself can
//! never fail.

use crate::error::{CoreError, Result};
use crate::language::config::LanguageConfig;
use crate::token::{PARAGRAPH_MARKER, TOKEN_DELIMITER};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Tokenizer rules for one language
#[derive(Debug, Clone)]
pub struct LanguageRules {
    config: LanguageConfig,
    word_pattern: Regex,
    sentence_end_chars: HashSet<char>,
    exceptions: HashSet<String>,
}

impl LanguageRules {
    /// Compile rules from configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        config.validate()?;

        let class = config.words.character_class.as_str();
        let word_pattern = Regex::new(&format!("[{class}]+")).map_err(|source| {
            CoreError::InvalidCharacterClass {
                class: class.to_string(),
                source,
            }
        })?;

        let reserved = [TOKEN_DELIMITER.to_string(), PARAGRAPH_MARKER.to_string()];
        if reserved.iter().any(|r| word_pattern.is_match(r)) {
            return Err(CoreError::Configuration(format!(
                "word character class '{class}' matches a reserved marker"
            )));
        }
        if word_pattern.is_match(" ") || word_pattern.is_match("\n") {
            return Err(CoreError::Configuration(format!(
                "word character class '{class}' matches whitespace"
            )));
        }

        Ok(Self {
            config: config.clone(),
            word_pattern,
            sentence_end_chars: config.sentences.end_chars.chars().collect(),
            exceptions: config.sentences.exceptions.iter().cloned().collect(),
        })
    }

    /// Parse and compile rules from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = LanguageConfig::from_toml_str(content)?;
        Self::from_config(&config)
    }

    /// Load rules from an external TOML file
    pub fn from_file(path: &Path, language_code: Option<&str>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = LanguageConfig::from_toml_str(&content).map_err(|e| {
            CoreError::Configuration(format!("{} ({})", e, path.display()))
        })?;

        // Override language code if provided
        if let Some(code) = language_code {
            config.metadata.code = code.to_string();
        }

        Self::from_config(&config)
    }

    /// Language code, e.g. "es"
    pub fn code(&self) -> &str {
        &self.config.metadata.code
    }

    /// Human readable language name
    pub fn name(&self) -> &str {
        &self.config.metadata.name
    }

    /// The configuration these rules were compiled from
    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    /// Compiled pattern matching one maximal run of word characters
    pub fn word_pattern(&self) -> &Regex {
        &self.word_pattern
    }

    /// Whether `ch` may end a sentence
    #[inline]
    pub fn is_sentence_end_char(&self, ch: char) -> bool {
        self.sentence_end_chars.contains(&ch)
    }

    /// Whether `candidate` is listed as an apparent-but-not sentence end
    pub fn is_exception(&self, candidate: &str) -> bool {
        self.exceptions.contains(candidate)
    }

    /// Literal substitutions in application order
    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.config
            .substitutions
            .iter()
            .map(|s| (s.from.as_str(), s.to.as_str()))
    }

    /// Whether every character is its own word
    pub fn split_each_character(&self) -> bool {
        self.config.options.split_each_character
    }

    /// Whether space tokens are dropped
    pub fn remove_spaces(&self) -> bool {
        self.config.options.remove_spaces
    }
}
