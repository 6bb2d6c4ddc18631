//! Conversion entry points.
//!
//! The pipeline is synchronous: pdfium is a blocking C library and pages are
//! processed strictly one after another. [`convert_to_file`] runs it on the
//! calling thread; [`convert`] moves the same work onto tokio's blocking pool
//! for callers that live in an async runtime.

use crate::comments::CommentsByPage;
use crate::config::ConversionConfig;
use crate::error::Pdf2PptxError;
use crate::output::{ConversionReport, DocumentMetadata};
use crate::pipeline::{annotations, metadata, slides};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Collect the sticky-note comments of a PDF, keyed by 0-based page index.
///
/// Never fails: a document that cannot be opened yields an empty mapping
/// (the reason is logged as a warning).
///
/// # Example
/// ```rust,no_run
/// use edgequake_pdf2pptx::{extract_comments, ConversionConfig};
///
/// let comments = extract_comments("review.pdf", &ConversionConfig::default());
/// for (page, notes) in comments.iter() {
///     println!("page {}: {} comment(s)", page + 1, notes.len());
/// }
/// ```
pub fn extract_comments(input: impl AsRef<Path>, config: &ConversionConfig) -> CommentsByPage {
    annotations::extract(input.as_ref(), config).comments
}

/// Convert a PDF into a `.pptx` deck at `output_path`.
///
/// Missing parent directories of `output_path` are created. The deck is
/// written atomically; on any error no file appears at `output_path`.
///
/// # Errors
/// Fatal conditions only:
/// - the PDF cannot be opened (missing, not a PDF, encrypted, pdfium absent)
/// - a page fails to rasterise
/// - the scratch directory or the output file cannot be written
///
/// Missing comments, an unreadable annotation list or leftover scratch files
/// are reported in [`ConversionReport::warnings`] instead.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2PptxError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    let output_path = output_path.as_ref();
    info!("Starting conversion: {}", input.display());

    // ── Step 1: Comments ─────────────────────────────────────────────────
    let extraction = annotations::extract(input, config);

    // ── Step 2: Slides ───────────────────────────────────────────────────
    let built = slides::build(input, &extraction.comments, config)?;

    // ── Step 3: Save ─────────────────────────────────────────────────────
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Pdf2PptxError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            source: e.into(),
        })?;
    }
    built
        .deck
        .save(output_path)
        .map_err(|source| Pdf2PptxError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            source,
        })?;

    let size = built.deck.size();
    let slides_with_notes = built
        .deck
        .slides()
        .iter()
        .filter(|s| s.notes().is_some())
        .count();
    let comment_count = (0..built.page_count)
        .filter_map(|i| extraction.comments.get(i))
        .map(<[String]>::len)
        .sum();

    let mut warnings = extraction.warnings;
    warnings.extend(built.warnings);

    let report = ConversionReport {
        output_path: output_path.to_path_buf(),
        page_count: built.page_count,
        slide_count: built.deck.slide_count(),
        slides_with_notes,
        comment_count,
        slide_width_emu: size.cx,
        slide_height_emu: size.cy,
        dpi: config.dpi,
        render_duration_ms: built.render_duration.as_millis() as u64,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        warnings,
    };

    if let Some(cb) = &config.progress_callback {
        cb.on_conversion_complete(report.page_count, report.slide_count);
    }
    info!(
        "Wrote {} slides ({} with notes) to {} in {}ms",
        report.slide_count,
        report.slides_with_notes,
        output_path.display(),
        report.total_duration_ms
    );
    Ok(report)
}

/// Async wrapper around [`convert_to_file`].
///
/// The blocking pipeline runs on `tokio::task::spawn_blocking` so the
/// runtime's worker threads stay free while pages render.
pub async fn convert(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2PptxError> {
    let input = input.as_ref().to_path_buf();
    let output_path = output_path.as_ref().to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || convert_to_file(&input, &output_path, &config))
        .await
        .map_err(|e| Pdf2PptxError::Internal(format!("Conversion task panicked: {}", e)))?
}

/// Read PDF metadata without converting anything.
pub fn inspect(input: impl AsRef<Path>, password: Option<&str>) -> Result<DocumentMetadata, Pdf2PptxError> {
    metadata::inspect(input.as_ref(), password)
}
