//! Batch runs over the input folder.
//!
//! A run lists the input folder once, then hands each candidate to the
//! [`Pipeline`] strictly one after another, in listing order. Outcomes are
//! tallied into a [`BatchSummary`] that is only reported once the listing has
//! been consumed.
//!
//! # Example
//!
//! ```rust,no_run
//! use pdfroute::core::batch::BatchRunner;
//! use pdfroute::core::config::PipelineConfig;
//! use pdfroute::pdf::LopdfExtractor;
//! use pdfroute::status::Status;
//! use std::sync::Arc;
//!
//! # fn example() -> pdfroute::Result<()> {
//! let config = PipelineConfig::discover()?.unwrap_or_default();
//! let runner = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), Status::silent());
//! let report = runner.run()?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```

use crate::core::config::PipelineConfig;
use crate::core::io::list_candidates;
use crate::core::pipeline::Pipeline;
use crate::pdf::TextExtractor;
use crate::status::Status;
use crate::types::BatchReport;
use crate::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag, checked between files only.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Runs the pipeline over every candidate file of the input folder.
pub struct BatchRunner {
    pipeline: Pipeline,
    status: Status,
    cancel: CancelFlag,
}

impl BatchRunner {
    pub fn new(config: PipelineConfig, extractor: Arc<dyn TextExtractor>, status: Status) -> Self {
        Self {
            pipeline: Pipeline::new(config, extractor, status.clone()),
            status,
            cancel: CancelFlag::new(),
        }
    }

    /// Use `cancel` instead of the runner's own flag.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    /// Process every candidate in the input folder.
    ///
    /// Per-file problems never fail the run; they are counted as outcomes. An
    /// empty input folder yields an empty report without touching the pipeline.
    ///
    /// # Errors
    ///
    /// Precondition failures stop the run before any file is processed and
    /// after a single `Error: ` status line; nothing is created on this path:
    ///
    /// - `PdfRouteError::FolderNotFound` - the input folder does not exist
    /// - `PdfRouteError::Listing` - the input folder could not be listed
    /// - `PdfRouteError::FolderSetup` - a destination folder could not be created
    ///
    /// Callers render [`BatchSummary::default`](crate::types::BatchSummary) in
    /// that case.
    pub fn run(&self) -> Result<BatchReport> {
        let folders = &self.config().folders;
        let input = &folders.input_pdf_folder;

        let candidates = list_candidates(input).inspect_err(|e| self.status.error(e.to_string()))?;

        self.status
            .info(format!("Starting PDF processing from: {}...", input.display()));

        let mut report = BatchReport {
            candidates: candidates.len(),
            ..Default::default()
        };

        if candidates.is_empty() {
            self.status
                .info(format!("No PDF files found in '{}'.", input.display()));
            self.status.info("Processing complete.");
            return Ok(report);
        }

        folders
            .prepare(&self.status)
            .inspect_err(|e| self.status.error(e.to_string()))?;

        let total = candidates.len();
        self.status
            .info(format!("Found {} PDF files to process.", total));

        for (index, path) in candidates.iter().enumerate() {
            if self.cancel.is_cancelled() {
                self.status.warn(format!(
                    "Processing cancelled after {} of {} files.",
                    index, total
                ));
                report.cancelled = true;
                break;
            }

            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.status
                .info(format!("Processing file {}/{}: {}", index + 1, total, name));

            report.push(self.pipeline.process(path));
        }

        self.report_completion(&report);
        Ok(report)
    }

    fn report_completion(&self, report: &BatchReport) {
        let folders = &self.config().folders;
        let summary = &report.summary;

        self.status.info("--- Processing Complete ---");
        self.status
            .info(format!("Total Files Processed: {}", summary.total));
        self.status.info(format!(
            "Successfully Extracted Text: {} files (Text to '{}')",
            summary.success,
            folders.output_text_folder.display()
        ));
        self.status.info(format!(
            "No Text Extracted: {} files (Copies to '{}')",
            summary.no_text,
            folders.failed_text_extraction_folder.display()
        ));
        self.status.info(format!(
            "Failed to Process: {} files (Copies to '{}')",
            summary.failed,
            folders.failed_text_extraction_folder.display()
        ));
        self.status.info(format!(
            "All original PDFs moved to: '{}' (if successful)",
            folders.archive_folder.display()
        ));
        self.status.info("---------------------------");
    }
}
