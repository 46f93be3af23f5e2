//! Term locator
//!
//! Finds every occurrence of a term in a token stream. The stream is
//! lowercased and flattened into one string in which every token is wrapped
//! by [`TOKEN_DELIMITER`]; a term is wrapped the same way before searching,
//! so a match always begins and ends on token boundaries ("cat" is never
//! found inside "concatenate").

use crate::error::{CoreError, Result};
use crate::term::lowercase_tokens;
use crate::token::{TokenStream, TOKEN_DELIMITER};
use std::collections::HashMap;

const DELIMITER_LEN: usize = TOKEN_DELIMITER.len_utf8();

/// One occurrence of a term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedMatch {
    /// The matched tokens in their original case, joined by the delimiter
    pub text: String,
    /// Position of the first matched token
    pub position: usize,
}

/// Search index over one token stream
#[derive(Debug)]
pub struct TokenLocator<'s> {
    stream: &'s TokenStream,
    lowered: Vec<String>,
    subject: String,
    delimiter_offsets: Vec<usize>,
    positions_by_text: HashMap<String, Vec<usize>>,
}

impl<'s> TokenLocator<'s> {
    /// Index `stream` for searching
    pub fn new(stream: &'s TokenStream) -> Self {
        let lowered: Vec<String> = stream
            .tokens()
            .iter()
            .map(|t| t.text.replace(TOKEN_DELIMITER, "").to_lowercase())
            .collect();

        let capacity = lowered.iter().map(|t| t.len() + DELIMITER_LEN).sum::<usize>();
        let mut subject = String::with_capacity(capacity + DELIMITER_LEN);
        let mut delimiter_offsets = Vec::with_capacity(lowered.len() + 1);
        let mut positions_by_text: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, text) in lowered.iter().enumerate() {
            delimiter_offsets.push(subject.len());
            subject.push(TOKEN_DELIMITER);
            subject.push_str(text);
            positions_by_text
                .entry(text.clone())
                .or_default()
                .push(position);
        }
        delimiter_offsets.push(subject.len());
        subject.push(TOKEN_DELIMITER);

        Self {
            stream,
            lowered,
            subject,
            delimiter_offsets,
            positions_by_text,
        }
    }

    /// The indexed stream
    pub fn stream(&self) -> &'s TokenStream {
        self.stream
    }

    /// Lowercased token texts by position
    pub fn lowercase_tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.lowered.iter().map(String::as_str)
    }

    /// Every occurrence of a term, in ascending position order
    ///
    /// `text_lc` is the term's lowercased text with tokens joined by the
    /// delimiter. Overlapping occurrences are all reported.
    pub fn locate(&self, text_lc: &str, token_count: usize) -> Result<Vec<LocatedMatch>> {
        let delimiters = text_lc.matches(TOKEN_DELIMITER).count();
        if token_count != delimiters + 1 {
            return Err(CoreError::ContractViolation(format!(
                "term has {} tokens but token count {}",
                delimiters + 1,
                token_count
            )));
        }
        if text_lc.is_empty() {
            return Ok(Vec::new());
        }

        let key = lowercase_tokens(text_lc);
        let positions = if token_count == 1 {
            self.positions_by_text
                .get(&key)
                .cloned()
                .unwrap_or_default()
        } else {
            self.substring_positions(&key)
        };

        positions
            .into_iter()
            .map(|position| self.located(position, token_count))
            .collect()
    }

    fn substring_positions(&self, text_lc: &str) -> Vec<usize> {
        let pattern = format!("{TOKEN_DELIMITER}{text_lc}{TOKEN_DELIMITER}");
        let mut positions = Vec::new();
        let mut from = 0;

        while let Some(found) = self.subject[from..].find(&pattern) {
            let offset = from + found;
            // Every match starts on a delimiter, so this lookup is exact
            if let Ok(position) = self.delimiter_offsets.binary_search(&offset) {
                positions.push(position);
            }
            // Step past the leading delimiter only, so a match may reuse
            // the trailing delimiter of the previous one
            from = offset + DELIMITER_LEN;
        }

        positions
    }

    fn located(&self, position: usize, token_count: usize) -> Result<LocatedMatch> {
        let end = position + token_count;
        if end > self.stream.len() {
            return Err(CoreError::ContractViolation(format!(
                "match at {} with {} tokens extends past the end of {} tokens",
                position,
                token_count,
                self.stream.len()
            )));
        }

        let text = self.stream.tokens()[position..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(&TOKEN_DELIMITER.to_string());

        Ok(LocatedMatch { text, position })
    }
}
