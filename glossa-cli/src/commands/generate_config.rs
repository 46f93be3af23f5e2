//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Language code for the new configuration
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating language configuration template...");
        println!("  Language code: {}", self.language_code);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the word characters and sentence rules for your language");
        println!("2. Validate your configuration:");
        println!(
            "   glossa validate --language-config {}",
            self.output.display()
        );
        println!("3. Use it for reading:");
        println!(
            "   glossa render -i chapter.txt --language-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        format!(
            r#"# Reading rules for {code}

[metadata]
code = "{code}"
name = "Custom Language"

[words]
# Body of a regex character class, without the brackets.
# One maximal run of these characters is one word token.
character_class = 'a-zA-ZÀ-ÖØ-öø-ȳ'

[sentences]
# Characters that may end a sentence ('.' always may)
end_chars = ".!?"

# Apparent sentence ends that are not, matched exactly
# (the word followed by its punctuation)
exceptions = ["Mr.", "Mrs.", "Dr."]

# Literal replacements applied before tokenizing, in order
[[substitutions]]
from = "´"
to = "'"

[options]
# Languages written without spaces: every character is a word
split_each_character = false

# Drop space tokens from the output
remove_spaces = false
"#,
            code = self.language_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::LanguageRules;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_args_debug() {
        let args = GenerateConfigArgs {
            language_code: "fr".to_string(),
            output: PathBuf::from("french.toml"),
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("GenerateConfigArgs"));
        assert!(debug_str.contains("fr"));
        assert!(debug_str.contains("french.toml"));
    }

    #[test]
    fn test_generated_template_loads() {
        let args = GenerateConfigArgs {
            language_code: "fr".to_string(),
            output: PathBuf::from("fr.toml"),
        };

        let rules = LanguageRules::from_toml_str(&args.generate_template()).unwrap();
        assert_eq!(rules.code(), "fr");
        assert!(rules.is_exception("Dr."));
        assert!(!rules.split_each_character());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("test_config.toml");

        let args = GenerateConfigArgs {
            language_code: "test".to_string(),
            output: output_path.clone(),
        };

        assert!(args.execute().is_ok());

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("code = \"test\""));
    }

    #[test]
    fn test_execute_unwritable_path() {
        let args = GenerateConfigArgs {
            language_code: "test".to_string(),
            output: PathBuf::from("/nonexistent/dir/test.toml"),
        };

        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
