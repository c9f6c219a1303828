//! PDF text extraction adapter.
//!
//! The pipeline never parses PDF bytes itself. It talks to a [`TextExtractor`],
//! which opens a file and hands back a [`PdfDocument`] handle that yields the
//! text of each page in document order.
//!
//! The boxed document is the scoped resource: dropping it closes the document.
//! Because the pipeline owns the box for exactly one invocation, the handle is
//! released once on every exit path, whether extraction succeeds, yields no
//! text, or fails half way through.
//!
//! # Example
//!
//! ```rust,no_run
//! use pdfroute::pdf::{LopdfExtractor, TextExtractor};
//! use std::path::Path;
//!
//! # fn example() -> pdfroute::Result<()> {
//! let extractor = LopdfExtractor::new();
//! let mut document = extractor.open(Path::new("scan.pdf"))?;
//!
//! let mut text = String::new();
//! for index in 0..document.page_count() {
//!     text.push_str(&document.page_text(index)?);
//! }
//! println!("{} pages, {} chars", document.page_count(), text.len());
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod text;

use crate::Result;
use std::path::Path;

pub use error::PdfError;
pub use text::LopdfExtractor;

/// An open document whose pages can be read one at a time.
pub trait PdfDocument {
    /// Number of pages. Zero-page documents are valid and report `0`.
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns `PdfRouteError::Parsing` when the page cannot be decoded.
    fn page_text(&mut self, index: usize) -> Result<String>;
}

/// Opens documents for text extraction.
///
/// Implementations must be `Send + Sync` so a single extractor can be shared
/// with the dedicated batch worker.
pub trait TextExtractor: Send + Sync {
    /// Short identifier used in log output.
    fn name(&self) -> &str;

    /// Open the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `PdfRouteError::Parsing` for corrupt or unreadable documents and
    /// `PdfRouteError::Io` when the file itself cannot be read.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>>;
}
