//! Tokenize command implementation

use super::args::{InputArgs, LanguageArgs, OutputArgs};
use anyhow::Result;
use clap::Args;
use glossa_core::Tokenizer;

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub language: LanguageArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let config = self.output.load_config()?;
        let (_, rules) = self.language.source(&config).load()?;
        let tokenizer = Tokenizer::new(&rules);

        let inputs = self.input.read(quiet)?;
        let mut formatter = self.output.formatter(&config, inputs.len() > 1)?;

        for input in &inputs {
            let stream = tokenizer.tokenize_stream(&input.text);
            log::info!("{}: {} tokens", input.label, stream.len());
            formatter.write_tokens(&input.label, &stream)?;
        }

        formatter.finish()
    }
}
