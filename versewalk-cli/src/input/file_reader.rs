//! File reading utilities

use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use versewalk_api::dto::DOCUMENT_SEPARATOR;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }

    /// Read several files into one corpus, separated by blank lines
    pub fn read_corpus(paths: &[PathBuf], progress: &mut ProgressReporter) -> Result<String> {
        progress.init_files(paths.len() as u64);

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            log::debug!(
                "reading corpus file {} ({} bytes)",
                path.display(),
                Self::file_size(path)?
            );
            documents.push(Self::read_text(path)?);
            progress.file_completed(&path.display().to_string());
        }

        Ok(documents.join(DOCUMENT_SEPARATOR))
    }
}
