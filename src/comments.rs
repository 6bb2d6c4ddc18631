//! Page-indexed comment collection handed from the extractor to the builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator placed between the comments of one page in its notes text.
pub const NOTES_SEPARATOR: &str = "\n";

/// Comments found on each page, keyed by 0-based page index.
///
/// A page is present only when it carries at least one comment; inserting an
/// empty list is a no-op, and deserialising drops empty entries. Comment order
/// within a page is the order the annotations were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<usize, Vec<String>>")]
pub struct CommentsByPage(BTreeMap<usize, Vec<String>>);

impl CommentsByPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the comments of a page. Empty lists are ignored.
    pub fn insert_page(&mut self, page_index: usize, comments: Vec<String>) {
        if !comments.is_empty() {
            self.0.insert(page_index, comments);
        }
    }

    /// Comments of a page, if it has any.
    pub fn get(&self, page_index: usize) -> Option<&[String]> {
        self.0.get(&page_index).map(Vec::as_slice)
    }

    /// The speaker-notes text for a page: its comments joined by newlines.
    pub fn notes_text(&self, page_index: usize) -> Option<String> {
        self.get(page_index).map(|c| c.join(NOTES_SEPARATOR))
    }

    /// Number of pages that carry comments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of comments across all pages.
    pub fn total_comments(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Iterate `(page_index, comments)` in increasing page order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.0.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl From<BTreeMap<usize, Vec<String>>> for CommentsByPage {
    fn from(map: BTreeMap<usize, Vec<String>>) -> Self {
        let mut out = Self::new();
        for (page, comments) in map {
            out.insert_page(page, comments);
        }
        out
    }
}

impl FromIterator<(usize, Vec<String>)> for CommentsByPage {
    fn from_iter<I: IntoIterator<Item = (usize, Vec<String>)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (page, comments) in iter {
            out.insert_page(page, comments);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_are_never_stored() {
        let mut c = CommentsByPage::new();
        c.insert_page(0, vec![]);
        c.insert_page(1, vec!["hello".into()]);
        assert_eq!(c.len(), 1);
        assert!(c.get(0).is_none());
        assert_eq!(c.get(1), Some(&["hello".to_string()][..]));
    }

    #[test]
    fn notes_text_joins_with_single_newline() {
        let c: CommentsByPage = [(2, vec!["first".to_string(), "second".to_string()])]
            .into_iter()
            .collect();
        assert_eq!(c.notes_text(2).as_deref(), Some("first\nsecond"));
        assert_eq!(c.notes_text(0), None);
        assert_eq!(c.total_comments(), 2);
    }

    #[test]
    fn embedded_newlines_survive_joining() {
        let c: CommentsByPage = [(0, vec!["a\nb".to_string(), "c".to_string()])]
            .into_iter()
            .collect();
        assert_eq!(c.get(0).map(<[String]>::len), Some(2));
        assert_eq!(c.notes_text(0).as_deref(), Some("a\nb\nc"));
    }

    #[test]
    fn deserialising_drops_empty_pages() {
        let json = r#"{"0": [], "1": ["这是测试的备注"], "4": ["x", "y"]}"#;
        let c: CommentsByPage = serde_json::from_str(json).unwrap();
        assert_eq!(c.len(), 2);
        assert!(c.get(0).is_none());
        assert_eq!(c.notes_text(1).as_deref(), Some("这是测试的备注"));
        let pages: Vec<usize> = c.iter().map(|(p, _)| p).collect();
        assert_eq!(pages, vec![1, 4]);
    }

    #[test]
    fn serialises_as_plain_map() {
        let c: CommentsByPage = [(1, vec!["note".to_string()])].into_iter().collect();
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"1":["note"]}"#);
    }
}
