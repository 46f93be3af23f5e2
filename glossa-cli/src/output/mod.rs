//! Output formatting module

use anyhow::Result;
use glossa_core::TokenStream;
use glossa_engine::{BookStats, RenderedUnit};
use std::io::Write;

/// Trait for output formatters
///
/// Every write carries a label naming the input (file name or book title).
pub trait OutputFormatter: Send + Sync {
    /// Output the tokens of one text
    fn write_tokens(&mut self, label: &str, stream: &TokenStream) -> Result<()>;

    /// Output the rendered units of one text
    fn write_units(&mut self, label: &str, units: &[RenderedUnit]) -> Result<()>;

    /// Output the statistics of one book
    fn write_stats(&mut self, label: &str, stats: &BookStats) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    Text,
    /// JSON array with one entry per input
    Json,
}

impl OutputFormat {
    /// Format for a configuration value such as "json"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Create a formatter writing to `writer`
    pub fn formatter(
        self,
        writer: Box<dyn Write + Send + Sync>,
        pretty_json: bool,
        show_labels: bool,
    ) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer).with_labels(show_labels)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        }
    }
}
