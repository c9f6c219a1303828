//! Configuration loading and management.
//!
//! This module provides the folder set and retry settings a batch run needs,
//! loading them from TOML, YAML, or JSON files (the `config.json` layout with the
//! four folder keys loads unchanged) and discovering configuration files in the
//! directory hierarchy.

use crate::status::Status;
use crate::{PdfRouteError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File names searched by [`PipelineConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["pdfroute.toml", "config.json"];

/// The four folders a run reads from and writes to.
///
/// Only the input folder must already exist; the three destination folders are
/// created by [`FolderSet::prepare`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSet {
    /// Folder scanned for `.pdf` files. Never created.
    #[serde(default = "default_input_pdf_folder")]
    pub input_pdf_folder: PathBuf,

    /// Destination of `<name>.txt` text artifacts.
    #[serde(default = "default_output_text_folder")]
    pub output_text_folder: PathBuf,

    /// Destination originals are moved to.
    #[serde(default = "default_archive_folder")]
    pub archive_folder: PathBuf,

    /// Destination of copies of originals that yielded no text or failed.
    #[serde(default = "default_failed_text_extraction_folder")]
    pub failed_text_extraction_folder: PathBuf,
}

/// Retry behaviour of file relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationConfig {
    /// Total attempts per relocation, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed pause between failed attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Complete configuration of a batch run.
///
/// # Example
///
/// ```rust
/// use pdfroute::core::config::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.relocation.max_attempts, 5);
///
/// // let config = PipelineConfig::from_file("pdfroute.toml")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(flatten)]
    pub folders: FolderSet,

    #[serde(default)]
    pub relocation: RelocationConfig,
}

fn default_input_pdf_folder() -> PathBuf {
    PathBuf::from("Rightfax folder")
}
fn default_output_text_folder() -> PathBuf {
    PathBuf::from("CPRS documents for provider to sign")
}
fn default_archive_folder() -> PathBuf {
    PathBuf::from("PDF files to be archived in vistaimaging")
}
fn default_failed_text_extraction_folder() -> PathBuf {
    PathBuf::from("failed text extraction folder")
}
fn default_max_attempts() -> u32 {
    5
}
fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for FolderSet {
    fn default() -> Self {
        Self {
            input_pdf_folder: default_input_pdf_folder(),
            output_text_folder: default_output_text_folder(),
            archive_folder: default_archive_folder(),
            failed_text_extraction_folder: default_failed_text_extraction_folder(),
        }
    }
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl FolderSet {
    pub fn new(
        input_pdf_folder: impl Into<PathBuf>,
        output_text_folder: impl Into<PathBuf>,
        archive_folder: impl Into<PathBuf>,
        failed_text_extraction_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_pdf_folder: input_pdf_folder.into(),
            output_text_folder: output_text_folder.into(),
            archive_folder: archive_folder.into(),
            failed_text_extraction_folder: failed_text_extraction_folder.into(),
        }
    }

    /// Lay out the four folders under `root` with conventional names.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(
            root.join("input"),
            root.join("text"),
            root.join("archive"),
            root.join("failed"),
        )
    }

    /// Create the three destination folders if they are missing.
    ///
    /// Idempotent: existing folders and their contents are left untouched. The
    /// input folder is never created.
    ///
    /// # Errors
    ///
    /// Returns `PdfRouteError::FolderSetup` naming the folder that could not be
    /// created.
    pub fn prepare(&self, status: &Status) -> Result<()> {
        let destinations = [
            ("output", &self.output_text_folder),
            ("archive", &self.archive_folder),
            ("failed text extraction", &self.failed_text_extraction_folder),
        ];

        for (label, folder) in destinations {
            std::fs::create_dir_all(folder).map_err(|source| PdfRouteError::FolderSetup {
                path: folder.clone(),
                source,
            })?;
            status.info(format!("Ensured {} folder '{}' exists.", label, folder.display()));
        }

        Ok(())
    }
}

impl RelocationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl PipelineConfig {
    pub fn new(folders: FolderSet) -> Self {
        Self {
            folders,
            relocation: RelocationConfig::default(),
        }
    }

    /// Reject settings no run could honour.
    ///
    /// # Errors
    ///
    /// Returns `PdfRouteError::Validation` for an empty folder path or a zero
    /// attempt budget.
    pub fn validate(&self) -> Result<()> {
        if self.relocation.max_attempts == 0 {
            return Err(PdfRouteError::validation("relocation.max_attempts must be at least 1"));
        }

        let folders = [
            ("input_pdf_folder", &self.folders.input_pdf_folder),
            ("output_text_folder", &self.folders.output_text_folder),
            ("archive_folder", &self.folders.archive_folder),
            ("failed_text_extraction_folder", &self.folders.failed_text_extraction_folder),
        ];
        for (key, folder) in folders {
            if folder.as_os_str().is_empty() {
                return Err(PdfRouteError::validation(format!("{} must not be empty", key)));
            }
        }

        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `PdfRouteError::Validation` if the file doesn't exist or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| PdfRouteError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| PdfRouteError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| PdfRouteError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, choosing the format from the file extension.
    ///
    /// `.json`, `.yaml`/`.yml`, and anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match extension_of(path).as_deref() {
            Some("json") => Self::from_json_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Write configuration to `path`, as JSON for `.json` files and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns `PdfRouteError::Serialization` if encoding fails and
    /// `PdfRouteError::Io` if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = match extension_of(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => self.to_toml_string()?,
        };

        std::fs::write(path, content).map_err(PdfRouteError::Io)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Discover a configuration file in the current directory or its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(PdfRouteError::Io)?;
        Self::discover_from(current)
    }

    /// Discover a configuration file starting at `start` and walking up.
    ///
    /// In each directory `pdfroute.toml` wins over `config.json`.
    pub fn discover_from(start: impl AsRef<Path>) -> Result<Option<Self>> {
        let mut current = Some(start.as_ref());

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    tracing::debug!("Using configuration from {}", candidate.display());
                    return Ok(Some(Self::from_file(candidate)?));
                }
            }
            current = dir.parent();
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| PdfRouteError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase())
}
