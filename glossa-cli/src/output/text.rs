//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_core::{TokenStream, PARAGRAPH_MARKER};
use glossa_engine::{BookStats, RenderedUnit};
use std::io::Write;

/// Plain text formatter
///
/// Tokens are listed one per line. Rendered text is reprinted with every
/// term in brackets followed by its status, e.g. `[Tengo un](2) gato.`.
pub struct TextFormatter<W: Write> {
    writer: W,
    show_labels: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_labels: false,
        }
    }

    /// Print a header line before each input
    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    fn header(&mut self, label: &str) -> Result<()> {
        if self.show_labels {
            writeln!(self.writer, "==> {label} <==")?;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn write_tokens(&mut self, label: &str, stream: &TokenStream) -> Result<()> {
        self.header(label)?;
        for (position, token) in stream.tokens().iter().enumerate() {
            let kind = if token.is_paragraph_marker() {
                "para"
            } else if token.is_word {
                "word"
            } else if token.is_end_of_sentence {
                "eos"
            } else {
                "other"
            };
            writeln!(
                self.writer,
                "{:>6}  {:<5}  {:?}",
                stream.order_of(position),
                kind,
                token.text
            )?;
        }
        Ok(())
    }

    fn write_units(&mut self, label: &str, units: &[RenderedUnit]) -> Result<()> {
        self.header(label)?;
        let mut line = String::new();
        for unit in units {
            if unit.display_text == PARAGRAPH_MARKER && !unit.is_term {
                writeln!(self.writer, "{}", line.trim_end())?;
                line.clear();
            } else if unit.is_term {
                line.push_str(&format!("[{}]({})", unit.display_text, unit.status));
            } else {
                line.push_str(&unit.display_text);
            }
        }
        if !line.is_empty() {
            writeln!(self.writer, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn write_stats(&mut self, label: &str, stats: &BookStats) -> Result<()> {
        writeln!(self.writer, "{label}")?;
        writeln!(self.writer, "  words:            {}", stats.total_word_tokens)?;
        writeln!(self.writer, "  distinct words:   {}", stats.distinct_word_tokens)?;
        writeln!(self.writer, "  distinct unknown: {}", stats.distinct_unknown_tokens)?;
        writeln!(self.writer, "  unknown:          {}%", stats.unknown_percent)?;
        let by_status: Vec<String> = stats
            .status_counts
            .iter()
            .map(|(status, count)| format!("{status}={count}"))
            .collect();
        writeln!(self.writer, "  by status:        {}", by_status.join(" "))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::Token;
    use std::collections::BTreeMap;

    fn unit(display: &str, is_term: bool, status: u8) -> RenderedUnit {
        RenderedUnit {
            order: 0,
            length: 1,
            text: display.to_string(),
            display_text: display.to_string(),
            is_word: true,
            is_term,
            term_id: None,
            status,
            parent_id: None,
        }
    }

    fn output(formatter: TextFormatter<Vec<u8>>) -> String {
        String::from_utf8(formatter.writer).unwrap()
    }

    #[test]
    fn test_tokens_one_per_line() {
        let stream = TokenStream::from_tokens(vec![
            Token::word("Hola"),
            Token::non_word(".", true),
            Token::paragraph_marker(),
        ]);
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.write_tokens("a.txt", &stream).unwrap();

        let text = output(formatter);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("word") && lines[0].contains("\"Hola\""));
        assert!(lines[1].contains("eos"));
        assert!(lines[2].contains("para"));
    }

    #[test]
    fn test_units_mark_terms_and_break_paragraphs() {
        let units = vec![
            unit("Tengo un", true, 2),
            unit(" ", false, 0),
            unit("gato", false, 0),
            unit(".", false, 0),
            unit(PARAGRAPH_MARKER, false, 0),
            unit("Adiós", true, 99),
        ];
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.write_units("a.txt", &units).unwrap();

        assert_eq!(output(formatter), "[Tengo un](2) gato.\n[Adiós](99)\n");
    }

    #[test]
    fn test_labels_only_when_enabled() {
        let mut formatter = TextFormatter::new(Vec::new()).with_labels(true);
        formatter.write_units("a.txt", &[unit("x", false, 0)]).unwrap();
        assert_eq!(output(formatter), "==> a.txt <==\nx\n");
    }

    #[test]
    fn test_stats_block() {
        let stats = BookStats {
            total_word_tokens: 4,
            distinct_word_tokens: 4,
            distinct_unknown_tokens: 1,
            unknown_percent: 25,
            status_counts: BTreeMap::from([(0, 1), (99, 3)]),
        };
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.write_stats("libro", &stats).unwrap();

        let text = output(formatter);
        assert!(text.starts_with("libro\n"));
        assert!(text.contains("unknown:          25%"));
        assert!(text.contains("0=1 99=3"));
    }
}
