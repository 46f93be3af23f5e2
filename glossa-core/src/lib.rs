//! Tokenize, match and resolve for language-learning readers
//!
//! This crate turns foreign-language text into tokens, finds the learner's
//! vocabulary terms (including multi-word expressions) in those tokens, and
//! decides which overlapping matches are shown: a longer expression hides
//! the shorter pieces it contains.
//!
//! # Architecture
//!
//! - [`language`]: TOML language rules, compiled into [`LanguageRules`]
//! - [`tokenizer`]: the single [`Tokenizer`], driven by those rules
//! - [`term`] and [`vocabulary`]: the learner's terms and their index
//! - [`locator`]: boundary-safe search of a term in a [`TokenStream`]
//! - [`resolver`]: precedence sweep producing [`RenderableUnit`]s
//!
//! # Example
//!
//! ```rust
//! use glossa_core::{LanguageRegistry, Term, TermStatus, Tokenizer, Vocabulary};
//!
//! let registry = LanguageRegistry::with_builtin().unwrap();
//! let rules = registry.rules("es").unwrap();
//! let tokenizer = Tokenizer::new(&rules);
//!
//! let vocabulary: Vocabulary = ["tengo un", "un"]
//!     .iter()
//!     .map(|text| Term::parse(text, &tokenizer, TermStatus::Learning(1)).unwrap())
//!     .collect();
//!
//! let stream = tokenizer.tokenize_stream("Tengo un gato.");
//! let units = vocabulary.render(&stream).unwrap();
//!
//! let shown: Vec<&str> = units.iter().map(|u| u.display_text.as_str()).collect();
//! assert_eq!(shown, vec!["Tengo un", " ", "gato", "."]);
//! ```

pub mod error;
pub mod language;
pub mod locator;
pub mod resolver;
pub mod term;
pub mod token;
pub mod tokenizer;
pub mod vocabulary;

pub use error::{CoreError, Result};
pub use language::{LanguageConfig, LanguageRegistry, LanguageRules};
pub use locator::{LocatedMatch, TokenLocator};
pub use resolver::{resolve, CandidateKind, MatchCandidate, RenderableUnit};
pub use term::{Term, TermId, TermStatus, UNKNOWN_STATUS_CODE};
pub use token::{Token, TokenStream, PARAGRAPH_MARKER, TOKEN_DELIMITER};
pub use tokenizer::Tokenizer;
pub use vocabulary::Vocabulary;
