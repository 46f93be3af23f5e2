//! Error handling for the CLI application

use std::fmt;

/// Errors raised by the CLI itself, as opposed to the library crates
#[derive(Debug)]
pub enum CliError {
    /// No input files matched
    NoInput(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// CLI configuration error
    ConfigError(String),
    /// Malformed vocabulary file
    VocabularyError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput(what) => write!(f, "No input: {what}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::VocabularyError(msg) => write!(f, "Vocabulary error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_error_display() {
        let error = CliError::NoInput("no files matched '*.txt'".to_string());
        assert_eq!(error.to_string(), "No input: no files matched '*.txt'");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_vocabulary_error_display() {
        let error = CliError::VocabularyError("unknown parent 'ir'".to_string());
        assert_eq!(error.to_string(), "Vocabulary error: unknown parent 'ir'");
    }

    #[test]
    fn test_cli_error_converts_into_anyhow() {
        let result: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
