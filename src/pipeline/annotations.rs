//! Annotation extraction: collect sticky-note comments per page.
//!
//! Only annotations whose kind is in [`COMMENT_KINDS`] count as comments.
//! Everything else (links, ink, stamps, form widgets, popups) is ignored.
//! The extractor never fails: a document that cannot be opened yields an
//! empty mapping and a [`ConversionWarning::CommentsUnavailable`].

use crate::comments::CommentsByPage;
use crate::config::ConversionConfig;
use crate::error::{ConversionWarning, Pdf2PptxError};
use crate::pipeline::engine::{bind_pdfium, open_document};
use crate::pipeline::record_warning;
use crate::pipeline::source::{PageSource, PdfiumSource};
use pdfium_render::prelude::PdfPageAnnotationType;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Annotation subtype: PDF subtype-table ordinal plus its name.
///
/// Subtypes outside the table (XFA widgets, unknown) have code `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotationKind {
    pub code: i32,
    pub name: &'static str,
}

impl AnnotationKind {
    pub const TEXT: Self = Self::new(0, "Text");
    pub const LINK: Self = Self::new(1, "Link");
    pub const FREE_TEXT: Self = Self::new(2, "FreeText");
    pub const HIGHLIGHT: Self = Self::new(8, "Highlight");
    pub const INK: Self = Self::new(15, "Ink");
    pub const POPUP: Self = Self::new(16, "Popup");
    pub const WIDGET: Self = Self::new(21, "Widget");
    pub const UNKNOWN: Self = Self::new(-1, "Unknown");

    pub const fn new(code: i32, name: &'static str) -> Self {
        Self { code, name }
    }

    pub fn from_pdfium(t: PdfPageAnnotationType) -> Self {
        use PdfPageAnnotationType as T;
        match t {
            T::Text => Self::TEXT,
            T::Link => Self::LINK,
            T::FreeText => Self::FREE_TEXT,
            T::Line => Self::new(3, "Line"),
            T::Square => Self::new(4, "Square"),
            T::Circle => Self::new(5, "Circle"),
            T::Polygon => Self::new(6, "Polygon"),
            T::Polyline => Self::new(7, "PolyLine"),
            T::Highlight => Self::HIGHLIGHT,
            T::Underline => Self::new(9, "Underline"),
            T::Squiggly => Self::new(10, "Squiggly"),
            T::Strikeout => Self::new(11, "StrikeOut"),
            T::Redacted => Self::new(12, "Redact"),
            T::Stamp => Self::new(13, "Stamp"),
            T::Caret => Self::new(14, "Caret"),
            T::Ink => Self::INK,
            T::Popup => Self::POPUP,
            T::FileAttachment => Self::new(17, "FileAttachment"),
            T::Sound => Self::new(18, "Sound"),
            T::Movie => Self::new(19, "Movie"),
            T::RichMedia => Self::new(20, "RichMedia"),
            T::Widget => Self::WIDGET,
            T::Screen => Self::new(22, "Screen"),
            T::PrinterMark => Self::new(23, "PrinterMark"),
            T::TrapNet => Self::new(24, "TrapNet"),
            T::Watermark => Self::new(25, "Watermark"),
            T::ThreeD => Self::new(26, "3D"),
            T::XfaWidget => Self::new(-1, "XFAWidget"),
            T::Unknown => Self::UNKNOWN,
        }
    }
}

/// One entry of the comment allow-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// Match on the subtype name.
    Name(&'static str),
    /// Match on the subtype ordinal.
    Code(i32),
}

impl CommentKind {
    pub fn matches(self, kind: AnnotationKind) -> bool {
        match self {
            CommentKind::Name(name) => kind.name == name,
            CommentKind::Code(code) => kind.code == code,
        }
    }
}

/// Annotation kinds whose contents are migrated to speaker notes.
///
/// Code 8 is Highlight, whose pop-up text is kept like a sticky note's.
pub const COMMENT_KINDS: [CommentKind; 3] = [
    CommentKind::Name("Text"),
    CommentKind::Code(0),
    CommentKind::Code(8),
];

pub fn is_comment(kind: AnnotationKind) -> bool {
    COMMENT_KINDS.iter().any(|k| k.matches(kind))
}

/// An annotation as read from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub kind: AnnotationKind,
    pub content: Option<String>,
}

/// Result of scanning a document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub comments: CommentsByPage,
    pub warnings: Vec<ConversionWarning>,
}

/// Open `path` and collect its comments.
///
/// Open failures are reported as a warning and produce an empty mapping.
pub fn extract(path: &Path, config: &ConversionConfig) -> Extraction {
    let mut warnings = Vec::new();
    let comments = match open_and_extract(path, config, &mut warnings) {
        Ok(comments) => comments,
        Err(e) => {
            record_warning(
                &mut warnings,
                config,
                ConversionWarning::CommentsUnavailable {
                    detail: e.to_string(),
                },
            );
            CommentsByPage::new()
        }
    };
    info!(
        pages_with_comments = comments.len(),
        comments = comments.total_comments(),
        "Comments extracted"
    );
    Extraction { comments, warnings }
}

fn open_and_extract(
    path: &Path,
    config: &ConversionConfig,
    warnings: &mut Vec<ConversionWarning>,
) -> Result<CommentsByPage, Pdf2PptxError> {
    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, path, config.password.as_deref())?;
    let source = PdfiumSource::new(document);
    Ok(extract_from_source(&source, config, warnings))
}

/// Scan every page of `source` for comments.
///
/// A page whose annotations cannot be read is skipped with a warning.
pub fn extract_from_source(
    source: &dyn PageSource,
    config: &ConversionConfig,
    warnings: &mut Vec<ConversionWarning>,
) -> CommentsByPage {
    let mut out = CommentsByPage::new();
    for index in 0..source.page_count() {
        let records = match source.annotations(index) {
            Ok(records) => records,
            Err(e) => {
                record_warning(
                    warnings,
                    config,
                    ConversionWarning::AnnotationsUnreadable {
                        page: index + 1,
                        detail: e.to_string(),
                    },
                );
                continue;
            }
        };

        let comments: Vec<String> = records
            .into_iter()
            .filter(|r| is_comment(r.kind))
            .filter_map(|r| r.content)
            .filter(|c| !c.is_empty())
            .collect();

        if !comments.is_empty() {
            debug!(page = index + 1, count = comments.len(), "Found comments");
        }
        out.insert_page(index, comments);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::source::fake::{FakePage, FakeSource};

    fn scan(source: &FakeSource) -> (CommentsByPage, Vec<ConversionWarning>) {
        let mut warnings = Vec::new();
        let comments = extract_from_source(source, &ConversionConfig::default(), &mut warnings);
        (comments, warnings)
    }

    #[test]
    fn allow_set_is_text_and_highlight_only() {
        assert!(is_comment(AnnotationKind::TEXT));
        assert!(is_comment(AnnotationKind::HIGHLIGHT));
        assert!(!is_comment(AnnotationKind::FREE_TEXT));
        assert!(!is_comment(AnnotationKind::POPUP));
        assert!(!is_comment(AnnotationKind::INK));
        assert!(!is_comment(AnnotationKind::UNKNOWN));
    }

    #[test]
    fn name_alone_is_enough() {
        assert!(is_comment(AnnotationKind::new(-1, "Text")));
        assert!(!is_comment(AnnotationKind::new(-1, "Note")));
    }

    #[test]
    fn pdfium_types_map_to_subtype_ordinals() {
        assert_eq!(AnnotationKind::from_pdfium(PdfPageAnnotationType::Text).code, 0);
        assert_eq!(AnnotationKind::from_pdfium(PdfPageAnnotationType::Highlight).code, 8);
        assert_eq!(AnnotationKind::from_pdfium(PdfPageAnnotationType::Redacted).code, 12);
        assert_eq!(AnnotationKind::from_pdfium(PdfPageAnnotationType::ThreeD).code, 26);
        assert_eq!(AnnotationKind::from_pdfium(PdfPageAnnotationType::XfaWidget).code, -1);
    }

    #[test]
    fn single_note_on_second_page() {
        let (comments, warnings) = scan(&FakeSource::three_pages_one_note());
        assert!(warnings.is_empty());
        assert_eq!(comments.len(), 1);
        assert_eq!(comments.get(1), Some(&["这是测试的备注".to_string()][..]));
        assert!(comments.get(0).is_none());
        assert!(comments.get(2).is_none());
    }

    #[test]
    fn no_comments_gives_empty_mapping() {
        let source = FakeSource::new(vec![
            FakePage::new(100.0, 100.0).with(AnnotationKind::LINK, Some("https://example.com")),
            FakePage::new(100.0, 100.0).with(AnnotationKind::INK, None),
        ]);
        let (comments, _) = scan(&source);
        assert!(comments.is_empty());
    }

    #[test]
    fn encounter_order_and_filtering() {
        let source = FakeSource::new(vec![FakePage::new(100.0, 100.0)
            .comment("first")
            .with(AnnotationKind::POPUP, Some("popup copy"))
            .with(AnnotationKind::TEXT, None)
            .with(AnnotationKind::TEXT, Some(""))
            .with(AnnotationKind::HIGHLIGHT, Some("second"))
            .comment("third\nline two")]);
        let (comments, _) = scan(&source);
        assert_eq!(
            comments.get(0).unwrap(),
            &["first", "second", "third\nline two"].map(String::from)[..]
        );
    }

    #[test]
    fn unreadable_page_is_skipped_with_warning() {
        let mut bad = FakePage::new(100.0, 100.0).comment("lost");
        bad.unreadable = true;
        let source = FakeSource::new(vec![bad, FakePage::new(100.0, 100.0).comment("kept")]);
        let (comments, warnings) = scan(&source);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments.notes_text(1).as_deref(), Some("kept"));
        assert!(matches!(
            warnings.as_slice(),
            [ConversionWarning::AnnotationsUnreadable { page: 1, .. }]
        ));
    }

    #[test]
    fn zero_pages_gives_empty_mapping() {
        let (comments, warnings) = scan(&FakeSource::new(vec![]));
        assert!(comments.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_file_yields_empty_mapping_and_warning() {
        let out = extract(Path::new("/no/such/deck.pdf"), &ConversionConfig::default());
        assert!(out.comments.is_empty());
        assert!(matches!(
            out.warnings.as_slice(),
            [ConversionWarning::CommentsUnavailable { .. }]
        ));
    }
}
