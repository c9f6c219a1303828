//! PDF text extraction backed by `lopdf`.

use super::error::PdfError;
use super::{PdfDocument, TextExtractor};
use crate::Result;
use lopdf::Document;
use std::path::Path;

/// Pure Rust [`TextExtractor`] over `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfExtractor {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>> {
        let document = Document::load(path).map_err(|e| PdfError::load(path, e))?;
        if document.is_encrypted() {
            return Err(PdfError::Encrypted {
                path: path.to_path_buf(),
            }
            .into());
        }

        let pages = document.get_pages().into_keys().collect();
        tracing::debug!("Opened {} with lopdf", path.display());

        Ok(Box::new(LopdfDocument { document, pages }))
    }
}

struct LopdfDocument {
    document: Document,
    /// Page numbers (1-based) in document order.
    pages: Vec<u32>,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&mut self, index: usize) -> Result<String> {
        let page_number = *self.pages.get(index).ok_or(PdfError::PageNotFound {
            page: index + 1,
            page_count: self.pages.len(),
        })?;

        let text = self
            .document
            .extract_text(&[page_number])
            .map_err(|e| PdfError::PageText {
                page: index + 1,
                message: e.to_string(),
            })?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PdfRouteError;
    use lopdf::dictionary;
    use lopdf::{Object, Stream};
    use tempfile::tempdir;

    /// Build a PDF with one page per entry; `None` produces a page without a content stream.
    fn make_pdf(pages: &[Option<&str>]) -> Vec<u8> {
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

    #[test]
    fn test_open_and_read_pages_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.pdf");
        std::fs::write(&path, make_pdf(&[Some("Hello"), Some("World")])).unwrap();

        let mut document = LopdfExtractor::new().open(&path).unwrap();
        assert_eq!(document.page_count(), 2);

        let first = document.page_text(0).unwrap();
        let second = document.page_text(1).unwrap();
        assert!(first.contains("Hello"), "got: {first:?}");
        assert!(second.contains("World"), "got: {second:?}");
    }

    #[test]
    fn test_page_without_content_is_blank() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.pdf");
        std::fs::write(&path, make_pdf(&[None])).unwrap();

        let mut document = LopdfExtractor::new().open(&path).unwrap();
        assert_eq!(document.page_count(), 1);
        assert!(document.page_text(0).unwrap().trim().is_empty());
    }

    #[test]
    fn test_page_index_out_of_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.pdf");
        std::fs::write(&path, make_pdf(&[Some("Only")])).unwrap();

        let mut document = LopdfExtractor::new().open(&path).unwrap();
        let err = document.page_text(3).unwrap_err();
        assert!(err.to_string().contains("Page 4 not found"));
    }

    #[test]
    fn test_invalid_pdf_returns_parsing_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = LopdfExtractor::new().open(&path);
        match result {
            Err(err @ PdfRouteError::Parsing { .. }) => {
                assert!(err.to_string().contains("broken.pdf' is not a readable PDF"), "got: {err}");
            }
            Err(other) => panic!("expected Parsing, got {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let result = LopdfExtractor::new().open(&dir.path().join("missing.pdf"));
        let err = result.err().unwrap();
        assert!(err.to_string().contains("Cannot read"), "got: {err}");
        assert!(err.to_string().contains("missing.pdf"), "got: {err}");
    }
}
