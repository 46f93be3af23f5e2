//! Stats command implementation

use super::args::{InputArgs, LanguageArgs, OutputArgs};
use crate::input::InputText;
use crate::vocabulary::load_terms;
use anyhow::Result;
use clap::Args;
use glossa_core::Tokenizer;
use glossa_engine::{
    Book, BookText, EngineConfig, InMemoryTexts, InMemoryVocabulary, StatsService,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub language: LanguageArgs,

    /// Vocabulary file with the learner's terms
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    /// Treat every input file as its own book
    ///
    /// By default all inputs are the texts of one book, in sorted order.
    #[arg(long)]
    pub per_file: bool,

    /// Target chunk size in tokens [default: from config, else 2000]
    #[arg(long, value_name = "TOKENS", value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_tokens: Option<u64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        let config = self.output.load_config()?;
        let (registry, rules) = self.language.source(&config).load()?;
        let language = rules.code().to_string();

        let vocabulary = InMemoryVocabulary::new();
        if let Some(path) = &self.vocab {
            vocabulary.set_terms(&language, load_terms(path, &Tokenizer::new(&rules))?)?;
        }

        let inputs = self.input.read(quiet)?;
        let books = group_books(inputs, self.per_file);
        let texts = InMemoryTexts::new();
        for (id, (title, book_texts)) in (1..).zip(&books) {
            texts.add_book(
                Book {
                    id,
                    language: language.clone(),
                    title: title.clone(),
                },
                book_texts.clone(),
            )?;
        }

        let chunk_tokens = self
            .chunk_tokens
            .map(|n| n as usize)
            .unwrap_or(config.stats.chunk_tokens);
        let service = StatsService::new(
            Arc::new(texts),
            Arc::new(vocabulary),
            Arc::new(registry),
            EngineConfig::with_chunk_tokens(chunk_tokens),
        );

        let mut formatter = self.output.formatter(&config, books.len() > 1)?;
        for (id, (title, _)) in (1..).zip(&books) {
            let stats = service.stats(id)?;
            formatter.write_stats(title, &stats)?;
        }

        formatter.finish()
    }
}

/// Group inputs into (title, texts) books, text orders starting at 1
fn group_books(inputs: Vec<InputText>, per_file: bool) -> Vec<(String, Vec<BookText>)> {
    if per_file {
        return inputs
            .into_iter()
            .map(|input| {
                let text = BookText {
                    order: 1,
                    text: input.text,
                };
                (input.label, vec![text])
            })
            .collect();
    }

    let title = match inputs.as_slice() {
        [] => return Vec::new(),
        [only] => only.label.clone(),
        [first, ..] => format!("{} (+{} more)", first.label, inputs.len() - 1),
    };
    let texts = (1..)
        .zip(inputs)
        .map(|(order, input)| BookText {
            order,
            text: input.text,
        })
        .collect();
    vec![(title, texts)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(label: &str, text: &str) -> InputText {
        InputText {
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_inputs_form_one_book_by_default() {
        let books = group_books(vec![input("a.txt", "uno"), input("b.txt", "dos")], false);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].0, "a.txt (+1 more)");
        let orders: Vec<usize> = books[0].1.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_per_file_books() {
        let books = group_books(vec![input("a.txt", "uno"), input("b.txt", "dos")], true);
        assert_eq!(books.len(), 2);
        assert_eq!(books[1].0, "b.txt");
        assert_eq!(books[1].1[0].text, "dos");
    }

    #[test]
    fn test_single_input_keeps_its_label() {
        let books = group_books(vec![input("<text>", "Hola.")], false);
        assert_eq!(books[0].0, "<text>");
    }
}
