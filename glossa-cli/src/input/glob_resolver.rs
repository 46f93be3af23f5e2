//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Resolve file patterns to existing files, sorted and deduplicated
///
/// The sorted order is the order in which the files become a book's texts.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInput(format!(
            "no files found matching {}",
            patterns.join(", ")
        ))
        .into());
    }

    files.sort();
    files.dedup();

    log::debug!("Resolved {} input file(s)", files.len());
    Ok(files)
}
