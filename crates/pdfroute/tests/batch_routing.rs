//! End-to-end batch runs over real PDF files.
//!
//! Every test builds its own folder tree in a temp directory, writes PDFs with
//! lopdf, and runs the lopdf-backed extractor over them.

use pdfroute::{BatchRunner, BatchSummary, LopdfExtractor, OutcomeKind, PdfRouteError};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

mod helpers;
use helpers::{block_path, config_under, recording_status, write_pdf};

/// A two-page text PDF, a blank PDF, and a non-PDF: only the two PDFs are processed.
#[test]
fn test_mixed_folder_routes_each_file() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    let folders = config.folders.clone();

    write_pdf(&folders.input_pdf_folder, "a.pdf", &[Some("Hello"), Some("again")]);
    write_pdf(&folders.input_pdf_folder, "b.pdf", &[None, None]);
    fs::write(folders.input_pdf_folder.join("c.txt"), "plain").unwrap();

    let (status, log) = recording_status();
    let report = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status)
        .run()
        .unwrap();

    assert_eq!(
        report.summary,
        BatchSummary {
            total: 2,
            success: 1,
            no_text: 1,
            failed: 0,
        }
    );

    let text = fs::read_to_string(folders.output_text_folder.join("a.txt")).unwrap();
    let hello = text.find("Hello").expect("first page text");
    let again = text.find("again").expect("second page text");
    assert!(hello < again, "pages out of order: {text:?}");
    assert!(!folders.output_text_folder.join("b.txt").exists());

    assert!(folders.archive_folder.join("a.pdf").exists());
    assert!(folders.archive_folder.join("b.pdf").exists());
    assert!(folders.failed_text_extraction_folder.join("b.pdf").exists());
    assert!(!folders.failed_text_extraction_folder.join("a.pdf").exists());

    assert!(!folders.input_pdf_folder.join("a.pdf").exists());
    assert!(!folders.input_pdf_folder.join("b.pdf").exists());
    assert!(folders.input_pdf_folder.join("c.txt").exists());

    assert!(log.contains("Found 2 PDF files to process."));
    assert!(log.contains("Total Files Processed: 2"));
}

#[test]
fn test_multi_page_text_is_concatenated_in_order() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    let folders = config.folders.clone();
    write_pdf(&folders.input_pdf_folder, "report.PDF", &[Some("First"), Some("Second")]);

    let (status, _log) = recording_status();
    let report = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status)
        .run()
        .unwrap();

    assert_eq!(report.outcomes[0].kind, OutcomeKind::Success);
    let text = fs::read_to_string(folders.output_text_folder.join("report.txt")).unwrap();
    let first = text.find("First").unwrap();
    let second = text.find("Second").unwrap();
    assert!(first < second);
}

#[test]
fn test_corrupt_pdf_is_failed_and_copied() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    let folders = config.folders.clone();
    fs::create_dir_all(&folders.input_pdf_folder).unwrap();
    fs::write(folders.input_pdf_folder.join("broken.pdf"), b"not a pdf at all").unwrap();

    let (status, log) = recording_status();
    let report = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status)
        .run()
        .unwrap();

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.kind, OutcomeKind::Failed);
    assert!(!outcome.detail.is_empty());
    assert_eq!(report.summary.failed, 1);
    assert!(folders.failed_text_extraction_folder.join("broken.pdf").exists());
    assert!(folders.archive_folder.join("broken.pdf").exists());
    assert!(log.contains("An unexpected error occurred while processing broken.pdf"));
}

#[test]
fn test_missing_input_folder_creates_nothing() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    let folders = config.folders.clone();

    let (status, log) = recording_status();
    let result = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status).run();

    match result {
        Err(PdfRouteError::FolderNotFound { path }) => assert_eq!(path, folders.input_pdf_folder),
        other => panic!("expected FolderNotFound, got {other:?}"),
    }
    assert_eq!(log.lines(), vec![format!(
        "Error: Input folder '{}' not found.",
        folders.input_pdf_folder.display()
    )]);
    assert!(!folders.output_text_folder.exists());
    assert!(!folders.archive_folder.exists());
    assert!(!folders.failed_text_extraction_folder.exists());
}

#[test]
fn test_locked_archive_keeps_original_and_text() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    let folders = config.folders.clone();
    write_pdf(&folders.input_pdf_folder, "held.pdf", &[Some("Kept")]);
    block_path(&folders.archive_folder.join("held.pdf"));

    let (status, log) = recording_status();
    let report = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status)
        .run()
        .unwrap();

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.kind, OutcomeKind::FailedArchive);
    assert_eq!(outcome.detail, "Could not archive original PDF.");
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.success, 0);

    assert!(folders.input_pdf_folder.join("held.pdf").exists());
    assert!(folders.output_text_folder.join("held.txt").exists());
    assert!(log.contains("Attempt 4/5 to move original PDF held.pdf failed"));
    assert!(log.contains("WARNING: Original PDF held.pdf could not be archived."));
}

#[test]
fn test_rerun_after_success_finds_nothing() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    write_pdf(&config.folders.input_pdf_folder, "once.pdf", &[Some("Once")]);

    let (status, log) = recording_status();
    let runner = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status);

    assert_eq!(runner.run().unwrap().summary.total, 1);
    let second = runner.run().unwrap();
    assert!(second.summary.is_empty());
    assert!(log.contains("No PDF files found in"));
}

#[test]
fn test_summary_invariant_holds_for_every_run() {
    let dir = tempdir().unwrap();
    let config = config_under(dir.path());
    let folders = config.folders.clone();
    write_pdf(&folders.input_pdf_folder, "t1.pdf", &[Some("One")]);
    write_pdf(&folders.input_pdf_folder, "t2.pdf", &[Some("Two"), None]);
    write_pdf(&folders.input_pdf_folder, "blank.pdf", &[None, None]);
    fs::write(folders.input_pdf_folder.join("junk.pdf"), b"garbage bytes").unwrap();
    write_pdf(&folders.input_pdf_folder, "stuck.pdf", &[Some("Stuck")]);
    block_path(&folders.archive_folder.join("stuck.pdf"));

    let (status, _log) = recording_status();
    let report = BatchRunner::new(config, Arc::new(LopdfExtractor::new()), status)
        .run()
        .unwrap();

    let summary = report.summary;
    assert_eq!(summary.total, 5);
    assert!(summary.is_consistent());
    assert_eq!(summary.success, 2);
    assert_eq!(summary.no_text, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(report.outcomes.len(), summary.total);
}
