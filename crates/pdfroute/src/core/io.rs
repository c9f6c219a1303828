//! Input folder enumeration.

use crate::{PdfRouteError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whether `path` names a candidate file: its name ends in `.pdf`, any case.
///
/// A file named exactly `.pdf` counts; `Path::extension` would miss it.
pub fn is_pdf_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

/// List the candidate files of `dir` in directory-listing order.
///
/// No sort is applied: the order is whatever the filesystem yields. Only regular
/// files with a `.pdf` suffix (any case) are returned; subfolders are not
/// searched.
///
/// # Errors
///
/// - `PdfRouteError::FolderNotFound` if `dir` does not exist
/// - `PdfRouteError::Listing` for any other enumeration failure
pub fn list_candidates(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let listing_error = |source: std::io::Error| PdfRouteError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let entries = std::fs::read_dir(dir).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            PdfRouteError::FolderNotFound { path: dir.to_path_buf() }
        } else {
            listing_error(source)
        }
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(listing_error)?.path();
        if path.is_file() && is_pdf_name(&path) {
            files.push(path);
        }
    }

    Ok(files)
}
