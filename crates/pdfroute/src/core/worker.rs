//! Dedicated worker for batch runs.
//!
//! [`spawn_batch`] moves a [`BatchRunner`] onto Tokio's blocking pool so a
//! front end stays responsive while files are processed. Status lines arrive in
//! emission order through [`BatchHandle::next_status`]; the final report comes
//! from [`BatchHandle::join`].
//!
//! Must be called from within a Tokio runtime.

use crate::core::batch::{BatchRunner, CancelFlag};
use crate::core::config::PipelineConfig;
use crate::pdf::TextExtractor;
use crate::status::Status;
use crate::types::BatchReport;
use crate::{PdfRouteError, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to a batch running on a worker thread.
pub struct BatchHandle {
    status_rx: mpsc::UnboundedReceiver<String>,
    cancel: CancelFlag,
    task: JoinHandle<Result<BatchReport>>,
}

impl BatchHandle {
    /// Next status line, or `None` once the worker has finished and every line
    /// has been delivered.
    pub async fn next_status(&mut self) -> Option<String> {
        self.status_rx.recv().await
    }

    /// Ask the worker to stop before the next file. The file in progress is
    /// finished first.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end.
    ///
    /// Status lines not yet read are dropped.
    ///
    /// # Errors
    ///
    /// The run's own precondition error, or `PdfRouteError::Worker` if the
    /// worker task panicked or was aborted.
    pub async fn join(self) -> Result<BatchReport> {
        self.task
            .await
            .map_err(|e| PdfRouteError::Worker(format!("Batch worker failed: {}", e)))?
    }
}

/// Start a batch run on the blocking pool.
pub fn spawn_batch(config: PipelineConfig, extractor: Arc<dyn TextExtractor>) -> BatchHandle {
    let (status_tx, status_rx) = mpsc::unbounded_channel();
    let cancel = CancelFlag::new();

    let runner = BatchRunner::new(config, extractor, Status::new(Arc::new(status_tx))).with_cancel_flag(cancel.clone());

    let span = tracing::Span::current();
    let task = tokio::task::spawn_blocking(move || {
        let _guard = span.entered();
        runner.run()
    });

    BatchHandle {
        status_rx,
        cancel,
        task,
    }
}
