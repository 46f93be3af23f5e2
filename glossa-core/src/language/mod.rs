//! Language-specific tokenizer rules
//!
//! Rules are described in TOML ([`config`]), compiled and validated into
//! [`LanguageRules`], and collected in a [`LanguageRegistry`].

pub mod config;
pub mod registry;
pub mod rules;

pub use config::{LanguageConfig, Metadata, Options, Sentences, Substitution, Words};
pub use registry::LanguageRegistry;
pub use rules::LanguageRules;
