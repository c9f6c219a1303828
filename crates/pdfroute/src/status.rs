//! Status channel from the core to its caller.
//!
//! Every step of a run reports a human-readable line. Lines travel one way,
//! in the order they were produced, through a [`StatusSink`] chosen by the
//! caller: a closure, a standard or tokio channel, or the in-memory
//! [`StatusLog`]. Each line is also mirrored to `tracing`.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receives status lines.
pub trait StatusSink: Send + Sync {
    fn emit(&self, line: &str);
}

impl<F> StatusSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}

// A closed channel means the caller stopped listening; the run carries on.
impl StatusSink for std::sync::mpsc::Sender<String> {
    fn emit(&self, line: &str) {
        let _ = self.send(line.to_string());
    }
}

#[cfg(feature = "tokio-runtime")]
impl StatusSink for tokio::sync::mpsc::UnboundedSender<String> {
    fn emit(&self, line: &str) {
        let _ = self.send(line.to_string());
    }
}

/// Discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn emit(&self, _line: &str) {}
}

/// Ordered in-memory transcript of status lines.
#[derive(Debug, Default)]
pub struct StatusLog {
    lines: Mutex<Vec<String>>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl StatusSink for StatusLog {
    fn emit(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Handle the pipeline components report through.
///
/// Cloning is cheap; all clones feed the same sink.
#[derive(Clone)]
pub struct Status {
    sink: Arc<dyn StatusSink>,
}

impl Status {
    pub fn new(sink: Arc<dyn StatusSink>) -> Self {
        Self { sink }
    }

    pub fn silent() -> Self {
        Self::new(Arc::new(NullSink))
    }

    pub fn info(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{}", message);
        self.sink.emit(message);
    }

    /// Emit a `WARNING: ` line.
    pub fn warn(&self, message: impl AsRef<str>) {
        let line = format!("WARNING: {}", message.as_ref());
        tracing::warn!("{}", line);
        self.sink.emit(&line);
    }

    /// Emit an `Error: ` line.
    pub fn error(&self, message: impl AsRef<str>) {
        let line = format!("Error: {}", message.as_ref());
        tracing::error!("{}", line);
        self.sink.emit(&line);
    }
}

impl std::fmt::Debug for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Status").finish_non_exhaustive()
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_log_keeps_order() {
        let log = Arc::new(StatusLog::new());
        let status = Status::new(log.clone());

        status.info("first");
        status.warn("second");
        status.error("third");

        assert_eq!(
            log.lines(),
            vec![
                "first".to_string(),
                "WARNING: second".to_string(),
                "Error: third".to_string()
            ]
        );
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let status = Status::new(Arc::new(move |line: &str| captured.lock().push(line.to_string())));

        status.info("hello");
        assert_eq!(*seen.lock(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_std_channel_sink_survives_closed_receiver() {
        let (tx, rx) = std::sync::mpsc::channel::<String>();
        let status = Status::new(Arc::new(tx));

        status.info("delivered");
        assert_eq!(rx.recv().unwrap(), "delivered");

        drop(rx);
        status.info("dropped on the floor");
    }

    #[test]
    fn test_clones_share_sink() {
        let log = Arc::new(StatusLog::new());
        let status = Status::new(log.clone());
        let other = status.clone();

        status.info("a");
        other.info("b");
        assert_eq!(log.len(), 2);
        assert!(log.contains("b"));
    }
}
