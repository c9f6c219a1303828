//! Core processing pipeline.
//!
//! This module holds everything between "a folder of PDFs" and "a summary":
//!
//! - [`config`] - folder layout and retry settings, loaded from TOML, YAML, or JSON
//! - [`io`] - input folder enumeration
//! - [`relocate`] - retry-protected move and copy
//! - [`pipeline`] - one file from open to archive
//! - [`batch`] - the sequential run over the input folder
//! - `worker` - the same run on Tokio's blocking pool (feature `tokio-runtime`)

pub mod batch;
pub mod config;
pub mod io;
pub mod pipeline;
pub mod relocate;

#[cfg(feature = "tokio-runtime")]
pub mod worker;

pub use batch::{BatchRunner, CancelFlag};
pub use config::{FolderSet, PipelineConfig, RelocationConfig};
pub use io::{is_pdf_name, list_candidates};
pub use pipeline::Pipeline;
pub use relocate::{RelocationMode, Relocator};

#[cfg(feature = "tokio-runtime")]
pub use worker::{BatchHandle, spawn_batch};
