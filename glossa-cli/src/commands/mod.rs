//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use glossa_core::LanguageRegistry;

pub mod args;
pub mod generate_config;
pub mod render;
pub mod stats;
pub mod tokenize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text into word and non-word tokens
    Tokenize(tokenize::TokenizeArgs),

    /// Show text with vocabulary terms resolved
    Render(render::RenderArgs),

    /// Count known and unknown words of a book
    Stats(stats::StatsArgs),

    /// Validate a language configuration file
    Validate(validate::ValidateArgs),

    /// Write a language configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in languages
    Languages,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::Tokenize(args) => args.execute(quiet),
            Commands::Render(args) => args.execute(quiet),
            Commands::Stats(args) => args.execute(quiet),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

impl ListCommands {
    /// Print the requested list
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Languages => {
                let registry = LanguageRegistry::with_builtin()?;
                println!("Available languages:");
                for (code, name) in registry.languages() {
                    println!("  {code:<6} {name}");
                }
            }
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text   Tokens one per line, terms as [text](status)");
                println!("  json   JSON array with one entry per input");
            }
        }
        Ok(())
    }
}
