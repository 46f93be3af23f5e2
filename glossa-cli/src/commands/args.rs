//! Arguments shared by the text processing commands

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputText};
use crate::language_source::LanguageSource;
use crate::output::{OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Where the text comes from
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Input files or patterns (supports glob)
    #[arg(
        short,
        long,
        value_name = "FILE/PATTERN",
        required_unless_present = "text"
    )]
    pub input: Vec<String>,

    /// Text to process instead of files
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,
}

impl InputArgs {
    /// Read every input, files in sorted path order
    pub fn read(&self, quiet: bool) -> Result<Vec<InputText>> {
        if let Some(text) = &self.text {
            return Ok(vec![InputText {
                label: "<text>".to_string(),
                text: text.clone(),
            }]);
        }

        let files = resolve_patterns(&self.input)?;
        let mut progress = ProgressReporter::new(quiet);
        progress.init_files(files.len() as u64);

        let mut inputs = Vec::with_capacity(files.len());
        for path in &files {
            let input = FileReader::read_input(path)?;
            progress.file_completed(&input.label);
            inputs.push(input);
        }
        progress.finish();

        Ok(inputs)
    }
}

/// Which language rules to use
#[derive(Debug, Clone, Default, Args)]
pub struct LanguageArgs {
    /// Built-in language code or name [default: from config, else "en"]
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE", conflicts_with = "language")]
    pub language_config: Option<PathBuf>,

    /// Override the code declared in the external configuration
    #[arg(long, value_name = "CODE", requires = "language_config")]
    pub language_code: Option<String>,
}

impl LanguageArgs {
    /// The language source selected by the flags, falling back to `config`
    pub fn source(&self, config: &CliConfig) -> LanguageSource {
        match &self.language_config {
            Some(path) => LanguageSource::External {
                path: path.clone(),
                language_code: self.language_code.clone(),
            },
            None => LanguageSource::BuiltIn(
                self.language
                    .clone()
                    .unwrap_or_else(|| config.processing.default_language.clone()),
            ),
        }
    }
}

/// Where and how results are written
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output format [default: from config, else text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// CLI configuration file
    #[arg(short, long, value_name = "FILE", env = "GLOSSA_CONFIG")]
    pub config: Option<PathBuf>,
}

impl OutputArgs {
    /// Load the CLI configuration named by `--config`
    pub fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load(self.config.as_deref())
    }

    /// The output format selected by the flags, falling back to `config`
    pub fn format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                config.output.default_format
            ))
            .into()
        })
    }

    /// Create the formatter for this output
    pub fn formatter(
        &self,
        config: &CliConfig,
        show_labels: bool,
    ) -> Result<Box<dyn OutputFormatter>> {
        let format = self.format(config)?;
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        Ok(format.formatter(writer, config.output.pretty_json, show_labels))
    }
}
