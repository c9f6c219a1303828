//! Error types for pdfroute.
//!
//! Two layers of failure exist in a batch run and they are handled differently:
//!
//! **Run-level precondition errors propagate:**
//! - `PdfRouteError::FolderNotFound` - the input folder does not exist
//! - `PdfRouteError::Listing` - the input folder exists but cannot be enumerated
//! - `PdfRouteError::FolderSetup` - a destination folder cannot be created
//!
//! These short-circuit a run before any document is touched and are returned to
//! the caller from [`BatchRunner::run`](crate::core::batch::BatchRunner::run).
//!
//! **Per-file errors become data:**
//! - `Parsing` - the document could not be opened or a page could not be read
//! - `Io` - the text artifact could not be written
//!
//! The pipeline turns these into an [`Outcome`](crate::types::Outcome) and never
//! lets them escape past a single file.
//!
//! # Example
//!
//! ```rust
//! use pdfroute::{PdfRouteError, Result};
//!
//! fn read_settings(path: &str) -> Result<String> {
//!     // IO errors bubble up automatically via ?
//!     let content = std::fs::read_to_string(path)?;
//!
//!     if content.is_empty() {
//!         return Err(PdfRouteError::validation(format!("Settings file is empty: {}", path)));
//!     }
//!
//!     Ok(content)
//! }
//! ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PdfRouteError`.
pub type Result<T> = std::result::Result<T, PdfRouteError>;

/// Main error type for all pdfroute operations.
#[derive(Debug, Error)]
pub enum PdfRouteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input folder '{}' not found.", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("Error listing files in input folder '{}': {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating folder '{}': {source}", path.display())]
    FolderSetup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PdfRouteError {
    fn from(err: serde_json::Error) -> Self {
        PdfRouteError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::ser::Error> for PdfRouteError {
    fn from(err: toml::ser::Error) -> Self {
        PdfRouteError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::pdf::error::PdfError> for PdfRouteError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        PdfRouteError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl PdfRouteError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Whether this error stops a batch run before any file is processed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PdfRouteError::FolderNotFound { .. } | PdfRouteError::Listing { .. } | PdfRouteError::FolderSetup { .. }
        )
    }
}
