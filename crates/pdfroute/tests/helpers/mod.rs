//! Shared fixtures for integration tests.

#![allow(dead_code)]

use lopdf::dictionary;
use lopdf::{Document, Object, Stream};
use pdfroute::{FolderSet, PipelineConfig, RelocationConfig, Status, StatusLog};
use std::path::Path;
use std::sync::Arc;

/// Build a PDF whose pages show the given strings. `None` is a page with no
/// content stream at all.
pub fn make_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = Vec::new();
    for text in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        };
        if let Some(text) = text {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            page.set("Contents", content_id);
        }
        kids.push(Object::from(doc.add_object(page)));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

pub fn write_pdf(folder: &Path, name: &str, pages: &[Option<&str>]) {
    std::fs::create_dir_all(folder).unwrap();
    std::fs::write(folder.join(name), make_pdf(pages)).unwrap();
}

/// Fast-retry configuration rooted at `root`.
pub fn config_under(root: &Path) -> PipelineConfig {
    PipelineConfig {
        folders: FolderSet::under(root),
        relocation: RelocationConfig {
            max_attempts: 5,
            retry_delay_ms: 1,
        },
    }
}

pub fn recording_status() -> (Status, Arc<StatusLog>) {
    let log = Arc::new(StatusLog::new());
    (Status::new(log.clone()), log)
}

/// Occupy `path` with a non-empty directory so a file cannot be moved onto it.
pub fn block_path(path: &Path) {
    std::fs::create_dir_all(path).unwrap();
    std::fs::write(path.join("occupied"), b"x").unwrap();
}
