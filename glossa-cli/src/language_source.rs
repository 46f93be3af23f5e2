//! Language source management for CLI

use anyhow::{Context, Result};
use glossa_core::{LanguageRegistry, LanguageRules};
use std::path::PathBuf;
use std::sync::Arc;

/// Source of language rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// Built-in language, by code or name
    BuiltIn(String),
    /// External configuration file
    External {
        /// Path to the configuration file
        path: PathBuf,
        /// Optional language code override
        language_code: Option<String>,
    },
}

impl LanguageSource {
    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn(code) => format!("Built-in: {code}"),
            LanguageSource::External {
                path,
                language_code,
            } => {
                if let Some(code) = language_code {
                    format!("External: {} (code: {})", path.display(), code)
                } else {
                    format!("External: {}", path.display())
                }
            }
        }
    }

    /// Build a registry holding the built-in languages plus this source,
    /// and return it with the selected rules
    ///
    /// External rules replace a built-in language with the same code.
    pub fn load(&self) -> Result<(LanguageRegistry, Arc<LanguageRules>)> {
        let mut registry =
            LanguageRegistry::with_builtin().context("Failed to load built-in languages")?;

        let rules = match self {
            LanguageSource::BuiltIn(code) => registry
                .rules(code)
                .with_context(|| format!("Unsupported language '{code}'"))?,
            LanguageSource::External {
                path,
                language_code,
            } => {
                let rules = LanguageRules::from_file(path, language_code.as_deref())
                    .with_context(|| {
                        format!("Failed to load language config: {}", path.display())
                    })?;
                registry.register(rules)
            }
        };

        log::info!(
            "Using language {} ({}) from {}",
            rules.name(),
            rules.code(),
            self.display_name()
        );
        Ok((registry, rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CUSTOM: &str = r#"
[metadata]
code = "xx"
name = "Custom"

[words]
character_class = "a-z"

[sentences]
end_chars = "."
"#;

    #[test]
    fn test_display_names() {
        assert_eq!(
            LanguageSource::BuiltIn("es".to_string()).display_name(),
            "Built-in: es"
        );

        let external = LanguageSource::External {
            path: PathBuf::from("custom.toml"),
            language_code: Some("yy".to_string()),
        };
        assert_eq!(external.display_name(), "External: custom.toml (code: yy)");
    }

    #[test]
    fn test_builtin_by_code_and_name() {
        let (_, rules) = LanguageSource::BuiltIn("es".to_string()).load().unwrap();
        assert_eq!(rules.code(), "es");

        let (_, rules) = LanguageSource::BuiltIn("Spanish".to_string()).load().unwrap();
        assert_eq!(rules.code(), "es");
    }

    #[test]
    fn test_unknown_builtin_fails() {
        let err = LanguageSource::BuiltIn("tlh".to_string()).load().unwrap_err();
        assert!(err.to_string().contains("Unsupported language 'tlh'"));
    }

    #[test]
    fn test_external_is_registered() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{CUSTOM}").unwrap();

        let source = LanguageSource::External {
            path: file.path().to_path_buf(),
            language_code: None,
        };
        let (registry, rules) = source.load().unwrap();
        assert_eq!(rules.code(), "xx");
        assert!(registry.get("xx").is_some());
        assert!(registry.get("en").is_some());
    }

    #[test]
    fn test_external_code_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{CUSTOM}").unwrap();

        let source = LanguageSource::External {
            path: file.path().to_path_buf(),
            language_code: Some("zz".to_string()),
        };
        let (registry, rules) = source.load().unwrap();
        assert_eq!(rules.code(), "zz");
        assert!(registry.get("zz").is_some());
    }
}
