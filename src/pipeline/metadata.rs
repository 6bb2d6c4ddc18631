//! Document information dictionary and deck properties.

use crate::error::Pdf2PptxError;
use crate::output::DocumentMetadata;
use crate::pipeline::engine::{bind_pdfium, open_document};
use crate::pptx::CoreProperties;
use pdfium_render::prelude::*;
use std::path::Path;

/// Read title, author and friends without rendering any page.
pub fn read_metadata(document: &PdfDocument) -> DocumentMetadata {
    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().trim().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    let first_page_size = pages
        .get(0)
        .ok()
        .map(|p| (p.width().value, p.height().value));

    DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
        first_page_size,
    }
}

/// Open `path` and read its metadata.
pub fn inspect(path: &Path, password: Option<&str>) -> Result<DocumentMetadata, Pdf2PptxError> {
    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, path, password)?;
    Ok(read_metadata(&document))
}

/// Deck properties carried over from the PDF: title, author as creator,
/// subject.
pub fn core_properties(meta: &DocumentMetadata) -> CoreProperties {
    CoreProperties {
        title: meta.title.clone(),
        creator: meta.author.clone(),
        subject: meta.subject.clone(),
    }
}
