//! Slide building: one full-bleed picture slide per page, comments as notes.
//!
//! ```text
//! page 1 size ──► deck size (EMU)          blank layout ──► every slide
//!
//! for each page:  render ─► scratch/page_<n>.<ext> ─► Picture ─► Slide
//!                                                     notes ◄── CommentsByPage[i]
//! ```

use crate::comments::CommentsByPage;
use crate::config::ConversionConfig;
use crate::error::{ConversionWarning, Pdf2PptxError};
use crate::pipeline::engine::{bind_pdfium, open_document};
use crate::pipeline::metadata::{core_properties, read_metadata};
use crate::pipeline::record_warning;
use crate::pipeline::scratch::ScratchDir;
use crate::pipeline::source::{PageSource, PdfiumSource};
use crate::pptx::{CoreProperties, Picture, SlideDeck, SlideSize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// A finished in-memory deck plus what happened while building it.
#[derive(Debug)]
pub struct BuiltDeck {
    pub deck: SlideDeck,
    pub page_count: usize,
    pub warnings: Vec<ConversionWarning>,
    pub render_duration: Duration,
}

/// Open `path` and build its deck.
///
/// Open errors are fatal here. The scratch directory is cleaned up before
/// returning, whatever the outcome.
pub fn build(
    path: &Path,
    comments: &CommentsByPage,
    config: &ConversionConfig,
) -> Result<BuiltDeck, Pdf2PptxError> {
    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, path, config.password.as_deref())?;
    let properties = if config.include_metadata {
        core_properties(&read_metadata(&document))
    } else {
        CoreProperties::default()
    };
    let source = PdfiumSource::new(document);

    let mut scratch = ScratchDir::create(config.scratch_dir.as_deref())?;
    let result = build_from_source(&source, comments, config, &mut scratch);
    let cleanup = scratch.cleanup();

    match result {
        Ok(mut built) => {
            if let Some(w) = cleanup {
                record_warning(&mut built.warnings, config, w);
            }
            built.deck.set_properties(properties);
            Ok(built)
        }
        Err(e) => {
            if let Some(w) = cleanup {
                warn!("{w}");
            }
            Err(e)
        }
    }
}

/// Build a deck from any page source, writing rasters into `scratch`.
///
/// Does not clean `scratch`; the caller owns it.
pub fn build_from_source(
    source: &dyn PageSource,
    comments: &CommentsByPage,
    config: &ConversionConfig,
    scratch: &mut ScratchDir,
) -> Result<BuiltDeck, Pdf2PptxError> {
    let total = source.page_count();
    let mut warnings = Vec::new();

    let size = deck_size(source, config, &mut warnings)?;
    let mut deck = SlideDeck::new(size);
    let layout = deck.blank_layout();
    if let Some(w) = layout.warning {
        record_warning(&mut warnings, config, w);
    }
    info!(
        pages = total,
        width_in = size.width_inches(),
        height_in = size.height_inches(),
        "Building deck"
    );

    if let Some(cb) = &config.progress_callback {
        cb.on_conversion_start(total);
    }

    let mut render_duration = Duration::ZERO;
    for index in 0..total {
        let page_num = index + 1;
        if let Some(cb) = &config.progress_callback {
            cb.on_page_start(page_num, total);
        }

        let started = Instant::now();
        let image = source.render(index, config.dpi)?;
        render_duration += started.elapsed();

        let raster = scratch.persist_raster(page_num, &image, config.raster_format)?;
        drop(image);
        let picture = Picture::from_file(&raster, config.raster_format).map_err(|source| {
            Pdf2PptxError::ScratchIo {
                path: raster.clone(),
                source,
            }
        })?;

        let comment_count = comments.get(index).map_or(0, <[String]>::len);
        deck.add_slide(layout.index, picture, comments.notes_text(index));
        debug!(page = page_num, comments = comment_count, "Slide added");

        if let Some(cb) = &config.progress_callback {
            cb.on_page_complete(page_num, total, comment_count);
        }
    }

    Ok(BuiltDeck {
        deck,
        page_count: total,
        warnings,
        render_duration,
    })
}

/// Deck size from the first page, the default size for an empty document.
fn deck_size(
    source: &dyn PageSource,
    config: &ConversionConfig,
    warnings: &mut Vec<ConversionWarning>,
) -> Result<SlideSize, Pdf2PptxError> {
    if source.page_count() == 0 {
        return Ok(SlideSize::default());
    }
    let first = source.page_size(0)?;
    let requested = SlideSize::from_points(first.width, first.height);
    if requested.is_within_limits() {
        return Ok(requested);
    }
    let clamped = requested.clamped();
    record_warning(
        warnings,
        config,
        ConversionWarning::SlideSizeClamped {
            requested_cx: requested.cx,
            requested_cy: requested.cy,
            cx: clamped.cx,
            cy: clamped.cy,
        },
    );
    Ok(clamped)
}
