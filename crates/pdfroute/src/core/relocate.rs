//! Retry-protected file relocation.
//!
//! Files on shared folders are often held open for a moment by scanners or
//! viewers. [`Relocator`] retries a move or copy a fixed number of times with a
//! fixed pause and reports the result as a `bool`; it never returns an error.

use crate::core::config::RelocationConfig;
use crate::status::Status;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// How a file is relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationMode {
    /// Rename, falling back to copy-then-remove across filesystems.
    Move,
    /// Duplicate contents, permissions, and timestamps; the source stays.
    Copy,
}

impl RelocationMode {
    fn verb(&self) -> &'static str {
        match self {
            RelocationMode::Move => "move",
            RelocationMode::Copy => "copy",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            RelocationMode::Move => "moved",
            RelocationMode::Copy => "copied",
        }
    }
}

/// Moves and copies single files with bounded retries.
#[derive(Debug, Clone)]
pub struct Relocator {
    max_attempts: u32,
    retry_delay: Duration,
    status: Status,
}

impl Relocator {
    pub fn new(config: RelocationConfig, status: Status) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay(),
            status,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Relocate `source` to `dest`.
    ///
    /// `dest`'s parent folder must already exist. `description` names the file
    /// in status lines, e.g. `"original PDF"`.
    ///
    /// # Returns
    ///
    /// `true` on the first successful attempt, `false` once every attempt has
    /// failed. On `false` the source is still in place.
    pub fn relocate(&self, source: &Path, dest: &Path, mode: RelocationMode, description: &str) -> bool {
        let source_name = file_name(source);
        let dest_name = file_name(dest);

        self.retry(mode, description, &source_name, &dest_name, || match mode {
            RelocationMode::Move => move_file(source, dest),
            RelocationMode::Copy => copy_file(source, dest),
        })
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// Sleeps the retry delay between failed attempts only; there is no pause
    /// after the last one.
    pub(crate) fn retry<F>(
        &self,
        mode: RelocationMode,
        description: &str,
        source_name: &str,
        dest_name: &str,
        mut op: F,
    ) -> bool
    where
        F: FnMut() -> io::Result<()>,
    {
        for attempt in 1..=self.max_attempts {
            match op() {
                Ok(()) => {
                    self.status.info(format!(
                        "Successfully {} {}: {} to {}",
                        mode.past_tense(),
                        description,
                        source_name,
                        dest_name
                    ));
                    return true;
                }
                Err(e) if attempt < self.max_attempts => {
                    self.status.info(format!(
                        "Attempt {}/{} to {} {} {} failed: {}. Retrying in {:.1} seconds...",
                        attempt,
                        self.max_attempts,
                        mode.verb(),
                        description,
                        source_name,
                        e,
                        self.retry_delay.as_secs_f64()
                    ));
                    std::thread::sleep(self.retry_delay);
                }
                Err(e) => {
                    self.status.info(format!(
                        "Failed to {} {} {} after {} attempts: {}. It remains in its original location.",
                        mode.verb(),
                        description,
                        source_name,
                        self.max_attempts,
                        e
                    ));
                }
            }
        }

        false
    }
}

fn move_file(source: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            // The source is only removed once the copy is complete.
            copy_file(source, dest)?;
            fs::remove_file(source)
        }
        Err(e) => Err(e),
    }
}

fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(source, dest)?;

    let metadata = fs::metadata(source)?;
    let accessed = filetime::FileTime::from_last_access_time(&metadata);
    let modified = filetime::FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(dest, accessed, modified)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
