//! Render command implementation

use super::args::{InputArgs, LanguageArgs, OutputArgs};
use crate::vocabulary::load_terms;
use anyhow::Result;
use clap::Args;
use glossa_core::Tokenizer;
use glossa_engine::{InMemoryVocabulary, Reader};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub language: LanguageArgs,

    /// Vocabulary file with the learner's terms
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let config = self.output.load_config()?;
        let (registry, rules) = self.language.source(&config).load()?;

        let vocabulary = InMemoryVocabulary::new();
        if let Some(path) = &self.vocab {
            vocabulary.set_terms(rules.code(), load_terms(path, &Tokenizer::new(&rules))?)?;
        }
        let reader = Reader::new(Arc::new(registry), Arc::new(vocabulary));

        let inputs = self.input.read(quiet)?;
        let mut formatter = self.output.formatter(&config, inputs.len() > 1)?;

        for input in &inputs {
            let units = reader.render(rules.code(), &input.text)?;
            log::info!(
                "{}: {} units, {} terms",
                input.label,
                units.len(),
                units.iter().filter(|u| u.is_term).count()
            );
            formatter.write_units(&input.label, &units)?;
        }

        formatter.finish()
    }
}
