//! # edgequake-pdf2pptx
//!
//! Convert PDF documents to PowerPoint decks: every page becomes a
//! full-bleed picture slide, and sticky-note comments on a page become that
//! slide's speaker notes.
//!
//! Reviewers annotate PDFs; presenters work from decks. This crate bridges
//! the two without touching page content: pages are rasterised as-is, so the
//! slides look exactly like the PDF, while the reviewers' remarks end up
//! where the presenter reads them.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate the path (exists, readable, %PDF header)
//!  ├─ 2. Comments  scan annotations; Text / Highlight contents per page
//!  ├─ 3. Deck      slide size from page 1, blank layout
//!  ├─ 4. Render    rasterise each page via pdfium into a scratch dir
//!  ├─ 5. Slides    one full-bleed picture per page, comments as notes
//!  └─ 6. Output    .pptx package written atomically + ConversionReport
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2pptx::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder().dpi(300).build()?;
//!     let report = convert("review.pdf", "output/review.pptx", &config).await?;
//!     eprintln!(
//!         "{} slides, {} with speaker notes",
//!         report.slide_count, report.slides_with_notes
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Without an async runtime, call [`convert_to_file`] directly.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2pptx` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgequake-pdf2pptx = { version = "0.1", default-features = false }
//! ```
//!
//! ## pdfium
//!
//! Rendering and annotation access go through the pdfium shared library,
//! bound at runtime. Put `libpdfium` next to the executable, install it
//! system-wide, or point `PDFIUM_LIB_PATH` at it.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod comments;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pptx;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use comments::CommentsByPage;
pub use config::{ConversionConfig, ConversionConfigBuilder, RasterFormat, DEFAULT_DPI, MAX_DPI};
pub use convert::{convert, convert_to_file, extract_comments, inspect};
pub use error::{ConversionWarning, PackageError, Pdf2PptxError};
pub use output::{ConversionReport, DocumentMetadata};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
