//! Error types for layout loading, extraction and export.
//!
//! Geometric inference never fails: degenerate input is skipped where it
//! is found. Errors only surface for I/O, configuration and document
//! loading, so a batch driver can report them per document.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by the extraction library.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl ExtractError {
    /// Build an [`ExtractError::Open`] for a document that could not be read.
    pub fn open(path: &Path, reason: impl Display) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_names_the_document() {
        let err = ExtractError::open(Path::new("/tmp/report.json"), "unexpected EOF");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/report.json"));
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ExtractError = io.into();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
