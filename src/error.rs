//! Error types for the edgequake-pdf2pptx library.
//!
//! Two distinct types reflect two distinct failure modes:
//!
//! * [`Pdf2PptxError`] — **Fatal**: the conversion cannot proceed at all
//!   (bad input file, wrong password, pdfium missing, output not writable).
//!   Returned as `Err(Pdf2PptxError)` from the top-level `convert*` functions.
//!
//! * [`ConversionWarning`] — **Non-fatal**: something degraded (comments could
//!   not be read, the blank layout was missing, scratch files were left
//!   behind) but the deck was still produced. Collected in
//!   [`crate::output::ConversionReport::warnings`].
//!
//! The "open" family (`FileNotFound` … `PdfiumBindingFailed`) is fatal for the
//! slide builder but is downgraded to [`ConversionWarning::CommentsUnavailable`]
//! by the annotation extractor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf2pptx library.
#[derive(Debug, Error)]
pub enum Pdf2PptxError {
    // ── Open errors ───────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the executable, install it system-wide, or set\n\
PDFIUM_LIB_PATH=/path/to/libpdfium (file or directory).\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),

    // ── Page errors ───────────────────────────────────────────────────────
    /// pdfium could not load a page (to size it or list its annotations).
    #[error("Could not read page {page}: {detail}")]
    PageUnreadable { page: usize, detail: String },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The scratch directory or a scratch raster could not be written.
    #[error("Scratch I/O failed for '{path}': {source}")]
    ScratchIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output deck.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: PackageError,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2PptxError {
    /// True for the errors raised while locating or opening the source PDF.
    ///
    /// The annotation extractor treats exactly these as "no comments".
    pub fn is_open_error(&self) -> bool {
        matches!(
            self,
            Pdf2PptxError::FileNotFound { .. }
                | Pdf2PptxError::PermissionDenied { .. }
                | Pdf2PptxError::NotAPdf { .. }
                | Pdf2PptxError::CorruptPdf { .. }
                | Pdf2PptxError::PasswordRequired { .. }
                | Pdf2PptxError::WrongPassword { .. }
                | Pdf2PptxError::PdfiumBindingFailed(_)
        )
    }
}

/// Errors raised while serialising a deck into an Office Open XML package.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A non-fatal condition encountered during conversion.
///
/// Warnings never stop the pipeline. They are logged when they happen,
/// forwarded to the progress callback and returned in the final report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionWarning {
    /// The annotation extractor could not open the document.
    #[error("comments unavailable, converting without notes: {detail}")]
    CommentsUnavailable { detail: String },

    /// Annotations of one page could not be enumerated.
    #[error("page {page}: annotations unreadable: {detail}")]
    AnnotationsUnreadable { page: usize, detail: String },

    /// The template has no blank layout; another layout was used.
    #[error("blank slide layout '{wanted}' unavailable, using '{used}'")]
    LayoutUnavailable { wanted: String, used: String },

    /// The first page is outside the slide size range PowerPoint accepts.
    #[error("slide size {requested_cx}x{requested_cy} EMU clamped to {cx}x{cy} EMU")]
    SlideSizeClamped {
        requested_cx: i64,
        requested_cy: i64,
        cx: i64,
        cy: i64,
    },

    /// Scratch directory still held files after per-file removal.
    #[error("scratch directory '{dir}' not fully cleaned ({remaining} entries left)")]
    ScratchCleanupIncomplete { dir: PathBuf, remaining: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_errors_are_classified() {
        let missing = Pdf2PptxError::FileNotFound {
            path: PathBuf::from("/nope.pdf"),
        };
        assert!(missing.is_open_error());

        let binding = Pdf2PptxError::PdfiumBindingFailed("no lib".into());
        assert!(binding.is_open_error());

        let render = Pdf2PptxError::RasterisationFailed {
            page: 2,
            detail: "boom".into(),
        };
        assert!(!render.is_open_error());
    }

    #[test]
    fn rasterisation_display() {
        let e = Pdf2PptxError::RasterisationFailed {
            page: 3,
            detail: "bitmap alloc".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 3"), "got: {msg}");
        assert!(msg.contains("bitmap alloc"));
    }

    #[test]
    fn output_write_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = Pdf2PptxError::OutputWriteFailed {
            path: PathBuf::from("/root/out.pptx"),
            source: PackageError::Io(io),
        };
        assert!(e.to_string().contains("/root/out.pptx"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn package_errors_convert_from_writer_failures() {
        let zip: PackageError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(zip, PackageError::Zip(_)));
        assert!(zip.to_string().starts_with("zip error"));

        let io: PackageError = std::io::Error::other("disk full").into();
        assert!(matches!(io, PackageError::Io(_)));
    }

    #[test]
    fn warning_serialises_with_kind_tag() {
        let w = ConversionWarning::LayoutUnavailable {
            wanted: "Blank".into(),
            used: "Title Slide".into(),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains(r#""kind":"layout_unavailable""#), "got: {json}");
        let back: ConversionWarning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn cleanup_warning_display() {
        let w = ConversionWarning::ScratchCleanupIncomplete {
            dir: PathBuf::from("/tmp/pdf2pptx-x"),
            remaining: 2,
        };
        assert!(w.to_string().contains("2 entries"));
    }
}
