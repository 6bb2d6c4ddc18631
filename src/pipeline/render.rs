//! Page rasterisation via pdfium.
//!
//! Pages are rendered at a fixed scale of `dpi / 72` (PDF user space is 72
//! units per inch). Annotation appearances and form widgets are left out of
//! the picture; comment text travels as speaker notes instead.

use crate::error::Pdf2PptxError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

/// Render configuration for a given resolution.
pub fn render_config(dpi: u32) -> PdfRenderConfig {
    PdfRenderConfig::new()
        .scale_page_by_factor(scale_for_dpi(dpi))
        .render_annotations(false)
        .render_form_data(false)
}

pub fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / 72.0
}

/// Rasterise one page. `page_num` is 1-based and only used for errors and logs.
pub fn render_page(page: &PdfPage, page_num: usize, dpi: u32) -> Result<DynamicImage, Pdf2PptxError> {
    let bitmap = page
        .render_with_config(&render_config(dpi))
        .map_err(|e| Pdf2PptxError::RasterisationFailed {
            page: page_num,
            detail: e.to_string(),
        })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered page {} → {}x{} px at {} DPI",
        page_num,
        image.width(),
        image.height(),
        dpi
    );
    Ok(image)
}
