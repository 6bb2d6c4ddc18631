//! End-to-end tests for edgequake-pdf2pptx.
//!
//! Fixture PDFs are generated on the fly with pdfium itself, so no files are
//! checked in. Every test that needs pdfium skips (with a message) when the
//! shared library cannot be bound.
//!
//! Run with:
//!   PDFIUM_LIB_PATH=/path/to/pdfium cargo test --test e2e -- --nocapture

use edgequake_pdf2pptx::pipeline::engine::bind_pdfium;
use edgequake_pdf2pptx::pptx::SlideSize;
use edgequake_pdf2pptx::{
    convert, convert_to_file, extract_comments, inspect, ConversionConfig, Pdf2PptxError,
    RasterFormat,
};
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};

// ── Test helpers ─────────────────────────────────────────────────────────────

const NOTE: &str = "这是测试的备注";

/// Skip this test if pdfium is not available.
macro_rules! skip_without_pdfium {
    () => {{
        if let Err(e) = bind_pdfium() {
            println!("SKIP — pdfium not available: {e}");
            return;
        }
    }};
}

/// Write an A4 PDF with `pages` pages; `notes[i]` are the sticky notes of page `i`.
fn write_fixture(pdfium: &Pdfium, path: &Path, pages: usize, notes: &[(usize, &str)]) {
    let mut document = pdfium.create_new_pdf().unwrap();
    for index in 0..pages {
        let mut page = document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::a4())
            .unwrap();
        for (_, text) in notes.iter().filter(|(i, _)| *i == index) {
            page.annotations_mut().create_text_annotation(text).unwrap();
        }
    }
    document.save_to_file(path).unwrap();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixture(pages: usize, notes: &[(usize, &str)]) -> Option<(tempfile::TempDir, PathBuf)> {
    init_tracing();
    let pdfium = bind_pdfium().ok()?;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.pdf");
    write_fixture(&pdfium, &path, pages, notes);
    Some((dir, path))
}

fn low_dpi() -> ConversionConfig {
    ConversionConfig::builder().dpi(36).build().unwrap()
}

fn read_part(zip: &mut zip::ZipArchive<std::fs::File>, name: &str) -> String {
    let mut s = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut s).unwrap();
    s
}

fn open_pptx(path: &Path) -> zip::ZipArchive<std::fs::File> {
    zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap()
}

fn count_parts(zip: &zip::ZipArchive<std::fs::File>, prefix: &str) -> usize {
    zip.file_names()
        .filter(|n| n.starts_with(prefix) && n.ends_with(".xml"))
        .count()
}

// ── Comment extraction ───────────────────────────────────────────────────────

#[test]
fn test_extract_single_note() {
    skip_without_pdfium!();
    let (_dir, pdf) = fixture(3, &[(1, NOTE)]).unwrap();

    let comments = extract_comments(&pdf, &ConversionConfig::default());
    assert_eq!(comments.len(), 1);
    assert_eq!(comments.get(1), Some(&[NOTE.to_string()][..]));
    assert!(comments.get(0).is_none());
    assert!(comments.get(2).is_none());
}

#[test]
fn test_extract_keeps_encounter_order() {
    skip_without_pdfium!();
    let (_dir, pdf) = fixture(1, &[(0, "first"), (0, "second")]).unwrap();

    let comments = extract_comments(&pdf, &ConversionConfig::default());
    assert_eq!(comments.notes_text(0).as_deref(), Some("first\nsecond"));
}

#[test]
fn test_extract_without_annotations_is_empty() {
    skip_without_pdfium!();
    let (_dir, pdf) = fixture(2, &[]).unwrap();
    assert!(extract_comments(&pdf, &ConversionConfig::default()).is_empty());
}

#[test]
fn test_extract_missing_file_is_empty() {
    let comments = extract_comments("/no/such/dir/missing.pdf", &ConversionConfig::default());
    assert!(comments.is_empty());
}

// ── Conversion ───────────────────────────────────────────────────────────────

#[test]
fn test_three_pages_one_note() {
    skip_without_pdfium!();
    let (dir, pdf) = fixture(3, &[(1, NOTE)]).unwrap();
    let out = dir.path().join("decks").join("fixture.pptx");

    let report = convert_to_file(&pdf, &out, &low_dpi()).unwrap();
    assert_eq!(report.page_count, 3);
    assert_eq!(report.slide_count, 3);
    assert_eq!(report.slides_with_notes, 1);
    assert_eq!(report.comment_count, 1);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert!(out.exists());

    let mut zip = open_pptx(&out);
    assert_eq!(count_parts(&zip, "ppt/slides/slide"), 3);
    assert_eq!(count_parts(&zip, "ppt/notesSlides/notesSlide"), 1);
    assert!(zip.by_name("ppt/notesSlides/notesSlide2.xml").is_ok());

    let notes = read_part(&mut zip, "ppt/notesSlides/notesSlide2.xml");
    assert!(notes.contains(NOTE));
    let rels1 = read_part(&mut zip, "ppt/slides/_rels/slide1.xml.rels");
    assert!(!rels1.contains("notesSlide"));
}

#[test]
fn test_deck_is_sized_like_first_page() {
    skip_without_pdfium!();
    let (dir, pdf) = fixture(1, &[]).unwrap();
    let out = dir.path().join("a4.pptx");
    let report = convert_to_file(&pdf, &out, &low_dpi()).unwrap();

    let a4 = PdfPagePaperSize::a4();
    let expected = SlideSize::from_points(a4.width().value, a4.height().value);
    assert_eq!(report.slide_width_emu, expected.cx);
    assert_eq!(report.slide_height_emu, expected.cy);

    let mut zip = open_pptx(&out);
    let presentation = read_part(&mut zip, "ppt/presentation.xml");
    assert!(presentation.contains(&format!(
        r#"<p:sldSz cx="{}" cy="{}""#,
        expected.cx, expected.cy
    )));
}

#[test]
fn test_jpeg_pictures() {
    skip_without_pdfium!();
    let (dir, pdf) = fixture(2, &[]).unwrap();
    let out = dir.path().join("jpeg.pptx");
    let config = ConversionConfig::builder()
        .dpi(36)
        .raster_format(RasterFormat::Jpeg)
        .build()
        .unwrap();

    convert_to_file(&pdf, &out, &config).unwrap();
    let zip = open_pptx(&out);
    let media: Vec<_> = zip
        .file_names()
        .filter(|n| n.starts_with("ppt/media/"))
        .collect();
    assert_eq!(media.len(), 2);
    assert!(media.iter().all(|n| n.ends_with(".jpeg")));
}

#[test]
fn test_converting_twice_is_stable() {
    skip_without_pdfium!();
    let (dir, pdf) = fixture(2, &[(0, "a"), (0, "b")]).unwrap();
    let out_a = dir.path().join("a.pptx");
    let out_b = dir.path().join("b.pptx");

    let a = convert_to_file(&pdf, &out_a, &low_dpi()).unwrap();
    let b = convert_to_file(&pdf, &out_b, &low_dpi()).unwrap();
    assert_eq!(a.slide_count, b.slide_count);
    assert_eq!(a.comment_count, b.comment_count);

    let notes_a = read_part(&mut open_pptx(&out_a), "ppt/notesSlides/notesSlide1.xml");
    let notes_b = read_part(&mut open_pptx(&out_b), "ppt/notesSlides/notesSlide1.xml");
    assert_eq!(notes_a, notes_b);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_async_convert() {
    let Some((dir, pdf)) = fixture(1, &[(0, NOTE)]) else {
        println!("SKIP — pdfium not available");
        return;
    };
    let out = dir.path().join("async.pptx");
    let report = convert(&pdf, &out, &low_dpi()).await.unwrap();
    assert_eq!(report.slide_count, 1);
    assert_eq!(report.slides_with_notes, 1);
}

#[test]
fn test_missing_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing.pptx");

    let err = convert_to_file(dir.path().join("missing.pdf"), &out, &low_dpi()).unwrap_err();
    assert!(
        matches!(err, Pdf2PptxError::FileNotFound { .. }),
        "got: {err}"
    );
    assert!(!out.exists());
}

#[test]
fn test_not_a_pdf_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("fake.pdf");
    std::fs::write(&fake, b"<html>definitely not a pdf</html>").unwrap();
    let out = dir.path().join("fake.pptx");

    let err = convert_to_file(&fake, &out, &low_dpi()).unwrap_err();
    assert!(matches!(err, Pdf2PptxError::NotAPdf { .. }), "got: {err}");
    assert!(!out.exists());
}

// ── Inspect ──────────────────────────────────────────────────────────────────

#[test]
fn test_inspect() {
    skip_without_pdfium!();
    let (_dir, pdf) = fixture(4, &[]).unwrap();

    let meta = inspect(&pdf, None).unwrap();
    assert_eq!(meta.page_count, 4);
    let (w, h) = meta.first_page_size.unwrap();
    assert!(w < h, "A4 is portrait: {w}x{h}");
}
