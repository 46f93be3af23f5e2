//! Book statistics and reading orchestration for Glossa
//!
//! This crate connects the core pipeline to the outside world: it defines
//! the provider traits through which books, texts, terms and language rules
//! are obtained, computes per-book statistics on sentence-aligned chunks,
//! caches them per book, and renders texts into owned units.

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod dto;
pub mod error;
pub mod provider;
pub mod reader;
pub mod service;
pub mod stats;

// Re-export key types
pub use chunker::{chunk_tokens, SentenceChunker};
pub use config::{ChunkPolicy, EngineConfig};
pub use dto::RenderedUnit;
pub use error::{EngineError, Result};
pub use provider::{
    Book, BookId, BookText, InMemoryTexts, InMemoryVocabulary, LanguageRulesProvider,
    TextProvider, VocabularyProvider,
};
pub use reader::Reader;
pub use service::StatsService;
pub use stats::{BookStats, StatsAggregator};

// Re-export from core for convenience
pub use glossa_core::{LanguageRegistry, LanguageRules, Term, TermStatus};
