//! Sentence end detection
//!
//! A potential sentence end is a *terminator group*: a run of sentence-end
//! characters (dots are always candidates) plus any closing punctuation
//! right after it. Whether the group really ends the sentence depends on the
//! non-space run before it and the run after it.

use crate::language::LanguageRules;

/// Characters that may trail a terminator and still belong to its group
pub(crate) const CLOSING_PUNCTUATION: &[char] =
    &[']', ')', '"', '\'', '”', '’', '»', '」', '』'];

/// Finds sentence ends inside one whitespace-collapsed paragraph
pub(crate) struct SentenceEndDetector<'r> {
    rules: &'r LanguageRules,
}

impl<'r> SentenceEndDetector<'r> {
    pub(crate) fn new(rules: &'r LanguageRules) -> Self {
        Self { rules }
    }

    #[inline]
    fn is_terminator(&self, ch: char) -> bool {
        ch == '.' || self.rules.is_sentence_end_char(ch)
    }

    /// Byte offsets of the characters that end a sentence, ascending
    pub(crate) fn sentence_ends(&self, paragraph: &str) -> Vec<usize> {
        let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
        let mut ends = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            if !self.is_terminator(chars[i].1) {
                i += 1;
                continue;
            }

            let group_start = i;
            let mut j = i;
            while j < chars.len() && self.is_terminator(chars[j].1) {
                j += 1;
            }
            while j < chars.len() && CLOSING_PUNCTUATION.contains(&chars[j].1) {
                j += 1;
            }

            if self.ends_sentence(&chars, group_start, j) {
                ends.push(chars[j - 1].0);
            }
            i = j;
        }

        ends
    }

    fn ends_sentence(&self, chars: &[(usize, char)], group_start: usize, group_end: usize) -> bool {
        // Preceding run; one space may sit between it and the group
        let mut k = group_start;
        if k > 0 && chars[k - 1].1 == ' ' {
            k -= 1;
        }
        let preceding_end = k;
        while k > 0 && !chars[k - 1].1.is_whitespace() {
            k -= 1;
        }
        if k == preceding_end {
            return false;
        }
        let preceding: String = chars[k..preceding_end].iter().map(|(_, c)| *c).collect();
        let group: String = chars[group_start..group_end].iter().map(|(_, c)| *c).collect();

        // Following run
        let mut f = group_end;
        let spaced = f < chars.len() && chars[f].1.is_whitespace();
        while f < chars.len() && chars[f].1.is_whitespace() {
            f += 1;
        }
        let following_start = f;
        while f < chars.len() && !chars[f].1.is_whitespace() {
            f += 1;
        }
        let following: String = chars[following_start..f].iter().map(|(_, c)| *c).collect();

        let is_end = self.classify(&preceding, &group, &following, spaced);
        tracing::trace!(%preceding, %group, %following, is_end, "sentence end candidate");
        is_end
    }

    fn classify(&self, preceding: &str, group: &str, following: &str, spaced: bool) -> bool {
        let last = preceding.chars().last();

        // "3.14", "U.S.A": glued to the next run
        if !spaced && !following.is_empty() && last.is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }

        if let Some(digits) = numeric_body(preceding) {
            if digits.chars().count() < 3 {
                return false;
            }
        } else if group.starts_with('.') && looks_like_abbreviation(preceding) {
            return false;
        }

        if group.contains(['.', ':']) && following.starts_with(|c: char| c.is_ascii_lowercase()) {
            return false;
        }

        let candidate = format!("{preceding}{group}");
        !self.rules.is_exception(&candidate)
    }
}

/// The number without its sign, when `s` is a plain decimal number
fn numeric_body(s: &str) -> Option<&str> {
    let body = s
        .strip_prefix('+')
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s);
    let numeric = body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.matches('.').count() <= 1;
    numeric.then_some(body)
}

/// "Mr", "Dr", "St": a consonant followed only by lowercase consonants,
/// or a lone uppercase vowel such as an initial.
fn looks_like_abbreviation(word: &str) -> bool {
    const CONSONANTS: &str = "bcdfghjklmnpqrstvwxz";

    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if "AEIOUY".contains(first) && word.chars().count() == 1 {
        return true;
    }

    CONSONANTS.contains(first.to_ascii_lowercase())
        && first.is_ascii_alphabetic()
        && chars.all(|c| c == 'ñ' || (c.is_ascii_lowercase() && CONSONANTS.contains(c)))
}
