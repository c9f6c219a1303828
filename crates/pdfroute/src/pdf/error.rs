//! Failures of the lopdf backend.
//!
//! Every variant names the document or page it concerns, so the message alone is
//! enough for the detail recorded on a `Failed` outcome.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not a readable PDF: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("'{}' is encrypted; encrypted PDFs are not processed", path.display())]
    Encrypted { path: PathBuf },

    #[error("Page {page} not found; the document has {page_count} pages")]
    PageNotFound { page: usize, page_count: usize },

    #[error("Text extraction failed on page {page}: {message}")]
    PageText { page: usize, message: String },
}

impl PdfError {
    /// Classify a `Document::load` failure for `path`.
    pub(crate) fn load(path: &Path, err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(source) => PdfError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => PdfError::Malformed {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}
