//! Language rules registry
//!
//! Holds compiled rules keyed by language code and by lowercase name.
//! The registry is an ordinary value: callers build one and pass it where
//! rules are needed.

use crate::error::{CoreError, Result};
use crate::language::{config::LanguageConfig, rules::LanguageRules};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Embedded language configurations, as (code, TOML)
const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../../configs/languages/english.toml")),
    ("es", include_str!("../../configs/languages/spanish.toml")),
    (
        "lzh",
        include_str!("../../configs/languages/classical_chinese.toml"),
    ),
];

/// Compiled language rules by code
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    by_code: BTreeMap<String, Arc<LanguageRules>>,
    aliases: BTreeMap<String, String>,
}

impl LanguageRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the embedded languages
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        for (code, toml_str) in EMBEDDED {
            let config = LanguageConfig::from_toml_str(toml_str).map_err(|e| {
                CoreError::Configuration(format!("failed to load embedded '{code}' config: {e}"))
            })?;
            registry.register(LanguageRules::from_config(&config)?);
        }
        Ok(registry)
    }

    /// Add or replace rules; the language name becomes an alias
    pub fn register(&mut self, rules: LanguageRules) -> Arc<LanguageRules> {
        let code = rules.code().to_string();
        self.aliases.insert(rules.name().to_lowercase(), code.clone());
        let rules = Arc::new(rules);
        self.by_code.insert(code, Arc::clone(&rules));
        rules
    }

    /// Look up rules by code or (case-insensitive) name
    pub fn get(&self, code_or_name: &str) -> Option<Arc<LanguageRules>> {
        if let Some(rules) = self.by_code.get(code_or_name) {
            return Some(Arc::clone(rules));
        }
        self.aliases
            .get(&code_or_name.to_lowercase())
            .and_then(|code| self.by_code.get(code))
            .cloned()
    }

    /// Look up rules, failing for an unknown language
    pub fn rules(&self, code_or_name: &str) -> Result<Arc<LanguageRules>> {
        self.get(code_or_name).ok_or_else(|| {
            CoreError::Configuration(format!("unknown language code: {code_or_name}"))
        })
    }

    /// Registered (code, name) pairs in code order
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.by_code
            .iter()
            .map(|(code, rules)| (code.as_str(), rules.name()))
    }
}
