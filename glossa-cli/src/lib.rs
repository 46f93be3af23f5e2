//! Glossa CLI library
//!
//! This library provides the command-line interface for the Glossa
//! reading pipeline: tokenizing, rendering against a vocabulary, and book
//! statistics.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod language_source;
pub mod output;
pub mod progress;
pub mod vocabulary;

pub use error::{CliError, CliResult};
