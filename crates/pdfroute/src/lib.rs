//! pdfroute - batch PDF text extraction and routing
//!
//! pdfroute drains an input folder of PDFs. For every file it extracts the text
//! of all pages, writes non-empty text to `<output>/<stem>.txt`, copies files
//! without usable text to a failure folder, and moves every original into an
//! archive folder. File moves and copies are retried to ride out transient
//! locks on shared folders.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pdfroute::{BatchRunner, LopdfExtractor, PipelineConfig, Status};
//! use std::sync::Arc;
//!
//! # fn main() -> pdfroute::Result<()> {
//! let config = PipelineConfig::from_file("pdfroute.toml")?;
//! let status = Status::new(Arc::new(|line: &str| println!("{}", line)));
//! let runner = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status);
//!
//! let report = runner.run()?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): configuration, folder listing, relocation, the
//!   per-file pipeline, and the batch runner
//! - **PDF Module** (`pdf`): the text extractor seam and its lopdf backend
//! - **Status** (`status`): the human-readable progress channel
//!
//! # Features
//!
//! - `tokio-runtime` (default): run a batch on Tokio's blocking pool with
//!   [`spawn_batch`] and stream status lines asynchronously

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod pdf;
pub mod status;
pub mod types;

pub use error::{PdfRouteError, Result};
pub use types::*;

pub use core::batch::{BatchRunner, CancelFlag};
pub use core::config::{FolderSet, PipelineConfig, RelocationConfig};
pub use core::pipeline::Pipeline;
pub use core::relocate::{RelocationMode, Relocator};

#[cfg(feature = "tokio-runtime")]
pub use core::worker::{BatchHandle, spawn_batch};

pub use pdf::{LopdfExtractor, PdfDocument, TextExtractor};
pub use status::{NullSink, Status, StatusLog, StatusSink};
