//! Read access to the pages of an opened document.
//!
//! The extractor and the slide builder only ever see a [`PageSource`], so
//! they can be driven by an in-memory document in tests and by pdfium in
//! production.

use crate::error::Pdf2PptxError;
use crate::pipeline::annotations::{AnnotationKind, AnnotationRecord};
use crate::pipeline::render;
use image::DynamicImage;
use pdfium_render::prelude::*;

/// Page dimensions in PDF points (1/72 in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// A paginated document. Page indices are 0-based.
pub trait PageSource {
    fn page_count(&self) -> usize;

    fn page_size(&self, index: usize) -> Result<PageSize, Pdf2PptxError>;

    /// Annotations of a page in the order the document stores them.
    fn annotations(&self, index: usize) -> Result<Vec<AnnotationRecord>, Pdf2PptxError>;

    /// Rasterise a page at `dpi`, without annotation appearances.
    fn render(&self, index: usize, dpi: u32) -> Result<DynamicImage, Pdf2PptxError>;
}

/// [`PageSource`] over a pdfium document.
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumSource<'a> {
    pub fn new(document: PdfDocument<'a>) -> Self {
        Self { document }
    }

    fn page(&self, index: usize) -> Result<PdfPage<'a>, Pdf2PptxError> {
        let unreadable = |detail: String| Pdf2PptxError::PageUnreadable {
            page: index + 1,
            detail,
        };
        let idx = u16::try_from(index).map_err(|_| unreadable("page index out of range".into()))?;
        self.document
            .pages()
            .get(idx)
            .map_err(|e| unreadable(e.to_string()))
    }
}

impl PageSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size(&self, index: usize) -> Result<PageSize, Pdf2PptxError> {
        let page = self.page(index)?;
        Ok(PageSize {
            width: page.width().value,
            height: page.height().value,
        })
    }

    fn annotations(&self, index: usize) -> Result<Vec<AnnotationRecord>, Pdf2PptxError> {
        let page = self.page(index)?;
        let records = page
            .annotations()
            .iter()
            .map(|annotation| AnnotationRecord {
                kind: AnnotationKind::from_pdfium(annotation.annotation_type()),
                content: annotation.contents(),
            })
            .collect();
        Ok(records)
    }

    fn render(&self, index: usize, dpi: u32) -> Result<DynamicImage, Pdf2PptxError> {
        let page = self.page(index)?;
        render::render_page(&page, index + 1, dpi)
    }
}
