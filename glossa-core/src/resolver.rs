//! Candidate resolver
//!
//! Given every term match found in a stream, decides which of them are
//! shown. Each token also contributes a plain candidate of length 1, so the
//! result always covers the whole stream.
//!
//! Precedence is a total order: longer spans first, then the smaller start,
//! then term matches before plain tokens, then supply order. Candidates
//! claim the positions of their span that are still free, in precedence
//! order; every candidate that claimed at least one position becomes a
//! [`RenderableUnit`], listed in position order.

use crate::error::{CoreError, Result};
use crate::term::Term;
use crate::token::{Token, TokenStream};
use std::cmp::Reverse;

/// What a candidate stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind<'a> {
    /// A single token with no vocabulary entry
    PlainToken,
    /// An occurrence of a vocabulary term
    TermMatch(&'a Term),
}

/// A span of the stream that could be shown as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate<'a> {
    pub kind: CandidateKind<'a>,
    /// Position of the first token
    pub start: usize,
    /// Number of tokens covered
    pub length: usize,
    /// Matched text, original case, tokens joined by the delimiter
    pub text: String,
    /// Whether the span holds at least one word token
    pub is_word: bool,
}

impl<'a> MatchCandidate<'a> {
    /// Candidate for the token at `position`
    pub fn plain(position: usize, token: &Token) -> Self {
        Self {
            kind: CandidateKind::PlainToken,
            start: position,
            length: 1,
            text: token.text.clone(),
            is_word: token.is_word,
        }
    }

    /// Candidate for a term occurrence starting at `start`
    pub fn term(term: &'a Term, start: usize, text: impl Into<String>, is_word: bool) -> Self {
        Self {
            kind: CandidateKind::TermMatch(term),
            start,
            length: term.token_count(),
            text: text.into(),
            is_word,
        }
    }

    /// The matched term, if any
    pub fn matched_term(&self) -> Option<&'a Term> {
        match self.kind {
            CandidateKind::TermMatch(term) => Some(term),
            CandidateKind::PlainToken => None,
        }
    }

    pub fn is_term(&self) -> bool {
        matches!(self.kind, CandidateKind::TermMatch(_))
    }

    /// One past the last covered position
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// A candidate that won at least one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableUnit<'a> {
    pub candidate: MatchCandidate<'a>,
    /// Leading tokens of the span already shown by the previous unit
    pub hidden_leading: usize,
    /// Text to show: the span's tokens minus the hidden ones
    pub display_text: String,
}

impl<'a> RenderableUnit<'a> {
    pub fn start(&self) -> usize {
        self.candidate.start
    }

    pub fn length(&self) -> usize {
        self.candidate.length
    }

    /// First position this unit displays
    pub fn display_start(&self) -> usize {
        self.candidate.start + self.hidden_leading
    }

    /// One past the last displayed position
    pub fn end(&self) -> usize {
        self.candidate.end()
    }

    pub fn matched_term(&self) -> Option<&'a Term> {
        self.candidate.matched_term()
    }

    pub fn is_word(&self) -> bool {
        self.candidate.is_word
    }
}

/// Sort key: longer, then leftmost, then terms, then supply order
fn precedence((supply, candidate): &(usize, MatchCandidate<'_>)) -> (Reverse<usize>, usize, bool, usize) {
    (
        Reverse(candidate.length),
        candidate.start,
        !candidate.is_term(),
        *supply,
    )
}

/// Pick the units to show for `stream`
///
/// `candidates` are usually the term matches of a vocabulary; plain
/// candidates for every token are added here. A candidate that is empty or
/// reaches past the stream is a contract violation.
pub fn resolve<'a>(
    stream: &TokenStream,
    candidates: Vec<MatchCandidate<'a>>,
) -> Result<Vec<RenderableUnit<'a>>> {
    let len = stream.len();
    if let Some(bad) = candidates.iter().find(|c| c.length == 0 || c.end() > len) {
        return Err(CoreError::ContractViolation(format!(
            "candidate '{}' at {} with {} tokens does not fit a stream of {} tokens",
            bad.text, bad.start, bad.length, len
        )));
    }

    let mut ordered: Vec<(usize, MatchCandidate<'a>)> = candidates
        .into_iter()
        .chain(
            stream
                .tokens()
                .iter()
                .enumerate()
                .map(|(position, token)| MatchCandidate::plain(position, token)),
        )
        .enumerate()
        .collect();
    ordered.sort_by_key(precedence);

    let mut owner: Vec<Option<usize>> = vec![None; len];
    let mut unclaimed = len;
    for (index, (_, candidate)) in ordered.iter().enumerate() {
        if unclaimed == 0 {
            break;
        }
        for slot in &mut owner[candidate.start..candidate.end()] {
            if slot.is_none() {
                *slot = Some(index);
                unclaimed -= 1;
            }
        }
    }

    let mut winners: Vec<usize> = Vec::new();
    for index in owner.into_iter().flatten() {
        if winners.last() != Some(&index) {
            winners.push(index);
        }
    }

    let mut slots: Vec<Option<MatchCandidate<'a>>> =
        ordered.into_iter().map(|(_, c)| Some(c)).collect();
    let mut units: Vec<RenderableUnit<'a>> = Vec::with_capacity(winners.len());
    for index in winners {
        let Some(candidate) = slots[index].take() else {
            continue;
        };

        let hidden_leading = units
            .last()
            .map(|prev| prev.end().saturating_sub(candidate.start))
            .unwrap_or(0)
            .min(candidate.length);

        let display_text = stream.tokens()[candidate.start + hidden_leading..candidate.end()]
            .iter()
            .map(|t| t.text.as_str())
            .collect();

        units.push(RenderableUnit {
            candidate,
            hidden_leading,
            display_text,
        });
    }

    tracing::trace!(tokens = len, units = units.len(), "resolved candidates");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::TermStatus;
    use crate::token::TOKEN_DELIMITER;

    fn letters(texts: &[&str]) -> TokenStream {
        TokenStream::from_tokens(texts.iter().map(|t| Token::word(*t)).collect())
    }

    fn term(parts: &[&str]) -> Term {
        Term::new(
            parts.join(&TOKEN_DELIMITER.to_string()),
            parts.len(),
            TermStatus::Learning(1),
        )
        .unwrap()
    }

    fn display(units: &[RenderableUnit<'_>]) -> Vec<String> {
        units.iter().map(|u| u.display_text.clone()).collect()
    }

    #[test]
    fn test_no_candidates_gives_plain_tokens() {
        let stream = letters(&["A", "B", "C"]);
        let units = resolve(&stream, Vec::new()).unwrap();
        assert_eq!(display(&units), vec!["A", "B", "C"]);
        assert!(units.iter().all(|u| !u.candidate.is_term()));
    }

    #[test]
    fn test_longest_match_wins() {
        let stream = letters(&["A", "B", "C", "D"]);
        let bc = term(&["B", "C"]);
        let cd = term(&["C", "D"]);
        let bcd = term(&["B", "C", "D"]);
        let candidates = vec![
            MatchCandidate::term(&bc, 1, "BC", true),
            MatchCandidate::term(&cd, 2, "CD", true),
            MatchCandidate::term(&bcd, 1, "BCD", true),
        ];

        let units = resolve(&stream, candidates).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].candidate.text, "A");
        assert_eq!(units[1].matched_term(), Some(&bcd));
    }

    #[test]
    fn test_leftmost_wins_equal_lengths() {
        let stream = letters(&["A", "B", "C"]);
        let ab = term(&["A", "B"]);
        let bc = term(&["B", "C"]);
        let candidates = vec![
            MatchCandidate::term(&bc, 1, "BC", true),
            MatchCandidate::term(&ab, 0, "AB", true),
        ];

        let units = resolve(&stream, candidates).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].matched_term(), Some(&ab));
        assert_eq!(units[1].matched_term(), Some(&bc));
        assert_eq!(units[1].hidden_leading, 1);
        assert_eq!(display(&units), vec!["AB", "C"]);
    }

    #[test]
    fn test_shorter_trailing_overlap_is_trimmed() {
        // "A B" only keeps A; "B C D" shows as "C D" after it
        let stream = letters(&["A", "B", "C", "D"]);
        let ab = term(&["A", "B"]);
        let bcd = term(&["B", "C", "D"]);
        let candidates = vec![
            MatchCandidate::term(&ab, 0, "AB", true),
            MatchCandidate::term(&bcd, 1, "BCD", true),
        ];

        let units = resolve(&stream, candidates).unwrap();
        assert_eq!(display(&units), vec!["AB", "CD"]);
        assert_eq!(units[1].display_start(), 2);
    }

    #[test]
    fn test_term_beats_plain_token_of_same_span() {
        let stream = letters(&["gato"]);
        let gato = term(&["gato"]);
        let units = resolve(&stream, vec![MatchCandidate::term(&gato, 0, "gato", true)]).unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].candidate.is_term());
    }

    #[test]
    fn test_supply_order_breaks_full_ties() {
        let stream = letters(&["A"]);
        let first = term(&["A"]).with_id(1);
        let second = term(&["A"]).with_id(2);
        let candidates = vec![
            MatchCandidate::term(&first, 0, "A", true),
            MatchCandidate::term(&second, 0, "A", true),
        ];

        let units = resolve(&stream, candidates).unwrap();
        assert_eq!(units[0].matched_term().and_then(Term::id), Some(1));
    }

    #[test]
    fn test_candidate_past_end_is_contract_violation() {
        let stream = letters(&["A", "B"]);
        let bc = term(&["B", "C"]);
        let result = resolve(&stream, vec![MatchCandidate::term(&bc, 1, "BC", true)]);
        assert!(matches!(result, Err(CoreError::ContractViolation(_))));
    }

    #[test]
    fn test_empty_stream() {
        let units = resolve(&TokenStream::default(), Vec::new()).unwrap();
        assert!(units.is_empty());
    }
}
