//! Result types returned by the conversion entry points.

use crate::error::ConversionWarning;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a finished conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Where the deck was written.
    pub output_path: PathBuf,
    /// Pages in the source PDF.
    pub page_count: usize,
    /// Slides in the deck (always equal to `page_count`).
    pub slide_count: usize,
    /// Slides that received speaker notes.
    pub slides_with_notes: usize,
    /// Comments written across all notes.
    pub comment_count: usize,
    /// Deck slide width in EMU.
    pub slide_width_emu: i64,
    /// Deck slide height in EMU.
    pub slide_height_emu: i64,
    /// Rendering resolution used.
    pub dpi: u32,
    /// Wall-clock time spent rasterising pages.
    pub render_duration_ms: u64,
    /// End-to-end wall-clock time.
    pub total_duration_ms: u64,
    /// Non-fatal conditions encountered on the way.
    pub warnings: Vec<ConversionWarning>,
}

/// Document-level information read without rendering any page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
    /// Width and height of the first page in points, if there is one.
    pub first_page_size: Option<(f32, f32)>,
}
