//! Validate command implementation

use anyhow::Result;
use clap::Args;
use glossa_core::{LanguageRules, Tokenizer};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_config: PathBuf,

    /// Sample text to tokenize with the loaded rules
    #[arg(short, long, value_name = "TEXT")]
    pub sample: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating language configuration: {}",
            self.language_config.display()
        );

        let rules = match LanguageRules::from_file(&self.language_config, None) {
            Ok(rules) => rules,
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        };

        let config = rules.config();
        println!("✓ Configuration is valid!");
        println!("  Language code: {}", rules.code());
        println!("  Language name: {}", rules.name());
        println!("  Word characters: [{}]", config.words.character_class);
        println!("  Sentence ends: {:?}", config.sentences.end_chars);
        println!("  Exceptions: {}", config.sentences.exceptions.len());
        println!("  Substitutions: {}", config.substitutions.len());
        println!(
            "  Split each character: {}",
            rules.split_each_character()
        );
        println!("  Remove spaces: {}", rules.remove_spaces());

        if let Some(sample) = &self.sample {
            let tokens = Tokenizer::new(&rules).tokenize(sample);
            let shown: Vec<String> = tokens
                .iter()
                .map(|t| {
                    if t.is_end_of_sentence {
                        format!("{:?}|", t.text)
                    } else {
                        format!("{:?}", t.text)
                    }
                })
                .collect();
            println!("  Sample tokens: {}", shown.join(" "));
        }

        Ok(())
    }
}
