//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_core::TokenStream;
use glossa_engine::{BookStats, RenderedUnit};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::Write;

/// JSON formatter - outputs one array entry per input
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    entries: Vec<Value>,
}

/// Token data for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenData {
    /// Persisted order of the token
    pub order: usize,
    /// Token text
    pub text: String,
    /// Whether the token is a word
    pub is_word: bool,
    /// Whether a sentence ends with the token
    pub is_end_of_sentence: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            entries: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn write_tokens(&mut self, label: &str, stream: &TokenStream) -> Result<()> {
        let tokens: Vec<TokenData> = stream
            .tokens()
            .iter()
            .enumerate()
            .map(|(position, token)| TokenData {
                order: stream.order_of(position),
                text: token.text.clone(),
                is_word: token.is_word,
                is_end_of_sentence: token.is_end_of_sentence,
            })
            .collect();
        self.entries.push(json!({ "input": label, "tokens": tokens }));
        Ok(())
    }

    fn write_units(&mut self, label: &str, units: &[RenderedUnit]) -> Result<()> {
        self.entries.push(json!({ "input": label, "units": units }));
        Ok(())
    }

    fn write_stats(&mut self, label: &str, stats: &BookStats) -> Result<()> {
        self.entries.push(json!({ "book": label, "stats": stats }));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.entries)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
