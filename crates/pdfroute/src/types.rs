use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Per-file outcomes
// ============================================================================

/// Terminal classification of one candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Text was extracted and written; the original was archived.
    Success,
    /// The document opened but held no extractable text.
    NoText,
    /// Opening, extraction, or writing the text artifact failed.
    Failed,
    /// The text stage finished but the original could not be archived.
    FailedArchive,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::NoText => "no_text",
            OutcomeKind::Failed => "failed",
            OutcomeKind::FailedArchive => "failed_archive",
        }
    }

    /// Whether the original should also be copied to the failed-extraction folder.
    pub fn needs_failure_copy(&self) -> bool {
        matches!(self, OutcomeKind::NoText | OutcomeKind::Failed)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one file through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    /// Base name of the original file, e.g. `scan.pdf`.
    pub file_name: String,
    /// Error detail; empty on a clean outcome.
    pub detail: String,
    /// Text artifact written for this file, if any.
    ///
    /// A `FailedArchive` outcome can still carry a path: the artifact is kept
    /// even though archiving the original failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_path: Option<PathBuf>,
}

// ============================================================================
// Batch totals
// ============================================================================

/// Aggregate counts for one batch run.
///
/// Counts are only ever incremented through [`BatchSummary::record`], so
/// `total == success + no_text + failed` holds by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub no_text: usize,
    /// Includes `FailedArchive` outcomes.
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome.kind {
            OutcomeKind::Success => self.success += 1,
            OutcomeKind::NoText => self.no_text += 1,
            OutcomeKind::Failed | OutcomeKind::FailedArchive => self.failed += 1,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.success + self.no_text + self.failed
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Processing Summary ---")?;
        writeln!(f, "Total Files Processed: {}", self.total)?;
        writeln!(f, "Successfully Extracted Text: {} files", self.success)?;
        writeln!(f, "No Text Extracted: {} files", self.no_text)?;
        writeln!(f, "Failed to Process: {} files", self.failed)?;
        write!(f, "---------------------------")
    }
}

/// Everything a finished batch run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    /// Per-file outcomes in processing order.
    pub outcomes: Vec<Outcome>,
    /// Number of candidate files found when the input folder was listed.
    pub candidates: usize,
    /// Set when the run stopped early at a file boundary.
    #[serde(default)]
    pub cancelled: bool,
}

impl BatchReport {
    pub fn push(&mut self, outcome: Outcome) {
        self.summary.record(&outcome);
        self.outcomes.push(outcome);
    }
}
