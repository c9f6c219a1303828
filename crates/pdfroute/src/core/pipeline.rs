//! Per-file processing.
//!
//! [`Pipeline::process`] takes one candidate file through a fixed sequence:
//!
//! 1. **Open** the document through the [`TextExtractor`].
//! 2. **Extract** the text of every page in order. The document handle is owned
//!    by this step and dropped on every exit path.
//! 3. **Classify & write**: blank text is `NoText`; otherwise the text is written
//!    to `<output>/<stem>.txt` and the file is `Success`, or `Failed` if the
//!    write fails.
//! 4. **Relocate** the original: `NoText`/`Failed` files are first copied to the
//!    failed-extraction folder, then every file is moved to the archive. A failed
//!    archive move turns the outcome into `FailedArchive`.
//!
//! No step loops back and no error escapes: every problem ends up in the
//! returned [`Outcome`].

use crate::core::config::PipelineConfig;
use crate::core::relocate::{RelocationMode, Relocator};
use crate::pdf::TextExtractor;
use crate::status::Status;
use crate::types::{Outcome, OutcomeKind};
use crate::Result;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Detail recorded when the original could not be archived.
pub const ARCHIVE_FAILURE_DETAIL: &str = "Could not archive original PDF.";

/// Classification reached before the original is relocated.
struct Pending {
    kind: OutcomeKind,
    detail: String,
    text_path: Option<PathBuf>,
}

impl Pending {
    fn failed(detail: String) -> Self {
        Self {
            kind: OutcomeKind::Failed,
            detail,
            text_path: None,
        }
    }
}

/// Runs single files through extraction, classification, and relocation.
pub struct Pipeline {
    config: PipelineConfig,
    extractor: Arc<dyn TextExtractor>,
    relocator: Relocator,
    status: Status,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, extractor: Arc<dyn TextExtractor>, status: Status) -> Self {
        let relocator = Relocator::new(config.relocation, status.clone());
        Self {
            config,
            extractor,
            relocator,
            status,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one file and return its outcome.
    ///
    /// Never fails: extraction, write, and relocation problems are all reported
    /// through the returned [`Outcome`] and the status channel.
    pub fn process(&self, path: &Path) -> Outcome {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.status.info(format!("Attempting to process: {}", file_name));

        let pending = match self.read_text(path, &file_name) {
            Ok(text) => self.classify_and_write(path, &file_name, text),
            Err(e) => {
                let detail = e.to_string();
                self.status.info(format!(
                    "An unexpected error occurred while processing {}: {}",
                    file_name, detail
                ));
                Pending::failed(detail)
            }
        };

        self.relocate_original(path, file_name, pending)
    }

    /// Steps 1 and 2: open the document and concatenate its page text.
    fn read_text(&self, path: &Path, file_name: &str) -> Result<String> {
        self.status.info(format!("Opening PDF: {}", path.display()));
        let extractor = self.extractor.name();
        tracing::debug!(extractor, "Opening {}", path.display());
        let mut document = self.extractor.open(path)?;
        self.status.info(format!("Successfully opened PDF: {}", file_name));

        let page_count = document.page_count();
        let mut full_text = String::new();
        self.status
            .info(format!("Starting text extraction for {}...", file_name));

        let extracted = (0..page_count).try_for_each(|index| {
            let page_text = document.page_text(index)?;
            full_text.push_str(&page_text);
            self.status.info(format!(
                "Extracted text from page {} of {}. Current text length: {}.",
                index + 1,
                file_name,
                full_text.chars().count()
            ));
            Ok::<(), crate::PdfRouteError>(())
        });

        self.status.info(format!("Closing PDF document: {}", file_name));
        drop(document);
        extracted?;

        self.status.info(format!(
            "Finished text extraction for {}. Total text length: {}.",
            file_name,
            full_text.chars().count()
        ));
        Ok(full_text)
    }

    /// Step 3: decide between `NoText`, `Success`, and a write failure.
    fn classify_and_write(&self, path: &Path, file_name: &str, text: String) -> Pending {
        if text.trim().is_empty() {
            self.status
                .info(format!("No significant text extracted from {}.", file_name));
            return Pending {
                kind: OutcomeKind::NoText,
                detail: String::new(),
                text_path: None,
            };
        }

        self.status.info(format!(
            "Text extracted from {}. Text file will go to output folder.",
            file_name
        ));

        let text_path = self.text_path_for(path);
        let text_name = text_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.status
            .info(format!("Attempting to write text to: {}", text_name));
        match std::fs::write(&text_path, text.as_bytes()) {
            Ok(()) => {
                self.status
                    .info(format!("Successfully wrote text to: {}", text_name));
                Pending {
                    kind: OutcomeKind::Success,
                    detail: String::new(),
                    text_path: Some(text_path),
                }
            }
            Err(e) => {
                self.status
                    .info(format!("Error writing text file {}: {}", text_name, e));
                Pending::failed(e.to_string())
            }
        }
    }

    /// Step 4: failure copy when needed, then the archive move.
    fn relocate_original(&self, path: &Path, file_name: String, pending: Pending) -> Outcome {
        let folders = &self.config.folders;
        // Destinations keep the exact on-disk name; `file_name` is for display.
        let dest_name = path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from(&file_name));

        if pending.kind.needs_failure_copy() {
            let failed_copy = folders.failed_text_extraction_folder.join(&dest_name);
            if !self
                .relocator
                .relocate(path, &failed_copy, RelocationMode::Copy, "failed PDF copy")
            {
                self.status.warn(format!(
                    "Could not copy original PDF {} to failed text extraction folder.",
                    file_name
                ));
            }
        }

        let archive_path = folders.archive_folder.join(&dest_name);
        if self
            .relocator
            .relocate(path, &archive_path, RelocationMode::Move, "original PDF")
        {
            return Outcome {
                kind: pending.kind,
                file_name,
                detail: pending.detail,
                text_path: pending.text_path,
            };
        }

        self.status.warn(format!(
            "Original PDF {} could not be archived. It remains in the source folder.",
            file_name
        ));
        Outcome {
            kind: OutcomeKind::FailedArchive,
            file_name,
            detail: ARCHIVE_FAILURE_DETAIL.to_string(),
            text_path: pending.text_path,
        }
    }

    /// `<output>/<stem>.txt` for `path`.
    pub fn text_path_for(&self, path: &Path) -> PathBuf {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.config
            .folders
            .output_text_folder
            .join(format!("{}.txt", stem))
    }
}
