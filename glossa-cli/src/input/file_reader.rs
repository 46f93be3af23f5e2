//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One text handed to a command, with a label for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    /// File name, or "<text>" for inline text
    pub label: String,
    /// Raw content
    pub text: String,
}

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a file into a labelled input
    pub fn read_input(path: &Path) -> Result<InputText> {
        let text = Self::read_text(path)?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(InputText { label, text })
    }
}
