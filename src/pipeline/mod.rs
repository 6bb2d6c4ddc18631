//! Pipeline stages for PDF-to-PPTX conversion.
//!
//! Each submodule implements exactly one step. The extractor and the slide
//! builder each open their own document handle from the same path; the only
//! thing passed between them is the [`crate::comments::CommentsByPage`] value.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ engine ──▶ annotations ──▶ slides ──────────────▶ pptx
//! (path)    (pdfium)   (comments)      render → scratch       (package)
//! ```
//!
//! 1. [`input`]       — check the path exists, is readable and is a PDF
//! 2. [`engine`]      — bind the pdfium library and open the document
//! 3. [`annotations`] — collect sticky-note comments per page; never fatal
//! 4. [`slides`]      — size the deck from page 1, rasterise each page
//!    ([`render`]) into the [`scratch`] directory, add one slide per page
//! 5. [`metadata`]    — document info for `inspect` and the deck properties
//!
//! Everything here is blocking. [`crate::convert::convert`] runs the whole
//! pipeline inside `spawn_blocking`.

pub mod annotations;
pub mod engine;
pub mod input;
pub mod metadata;
pub mod render;
pub mod scratch;
pub mod slides;
pub mod source;

use crate::config::ConversionConfig;
use crate::error::ConversionWarning;
use tracing::warn;

/// Log a non-fatal condition, forward it to the progress callback and keep it
/// for the report.
pub(crate) fn record_warning(
    warnings: &mut Vec<ConversionWarning>,
    config: &ConversionConfig,
    warning: ConversionWarning,
) {
    warn!("{warning}");
    if let Some(cb) = &config.progress_callback {
        cb.on_warning(&warning);
    }
    warnings.push(warning);
}
