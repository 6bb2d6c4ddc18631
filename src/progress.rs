//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the slide builder walks the document.
//!
//! Callers can forward events to a terminal progress bar, a log file or a
//! channel without the library knowing how the host application reports
//! progress. The trait is `Send + Sync` because [`crate::convert::convert`]
//! runs the pipeline on a blocking worker thread.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2pptx::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct NotesCounter {
//!     with_notes: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for NotesCounter {
//!     fn on_page_complete(&self, _page_num: usize, _total: usize, comment_count: usize) {
//!         if comment_count > 0 {
//!             self.with_notes.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let counter = Arc::new(NotesCounter { with_notes: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::ConversionWarning;
use std::sync::Arc;

/// Called by the slide builder as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Pages are processed strictly in order, one at a
/// time; `on_page_start(n)` is always followed by `on_page_complete(n)` unless
/// the conversion fails.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document is opened, before the first page.
    ///
    /// # Arguments
    /// * `total_pages` — number of pages (and therefore slides)
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page is rasterised.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when the slide for a page has been added to the deck.
    ///
    /// # Arguments
    /// * `page_num`      — 1-indexed page number
    /// * `total_pages`   — total pages
    /// * `comment_count` — number of comments written to the slide notes
    fn on_page_complete(&self, page_num: usize, total_pages: usize, comment_count: usize) {
        let _ = (page_num, total_pages, comment_count);
    }

    /// Called for every non-fatal condition, right after it is logged.
    fn on_warning(&self, warning: &ConversionWarning) {
        let _ = warning;
    }

    /// Called once after every slide has been built and scratch files removed.
    ///
    /// # Arguments
    /// * `total_pages`    — total pages in the document
    /// * `slides_written` — slides present in the deck
    fn on_conversion_complete(&self, total_pages: usize, slides_written: usize) {
        let _ = (total_pages, slides_written);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        comments: AtomicUsize,
        warnings: AtomicUsize,
        started_total: AtomicUsize,
        written: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_pages: usize) {
            self.started_total.store(total_pages, Ordering::SeqCst);
        }

        fn on_page_start(&self, _page_num: usize, _total_pages: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_complete(&self, _page_num: usize, _total_pages: usize, comment_count: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
            self.comments.fetch_add(comment_count, Ordering::SeqCst);
        }

        fn on_warning(&self, _warning: &ConversionWarning) {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total_pages: usize, slides_written: usize) {
            self.written.store(slides_written, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(5);
        cb.on_page_start(1, 5);
        cb.on_page_complete(1, 5, 2);
        cb.on_warning(&ConversionWarning::CommentsUnavailable {
            detail: "x".into(),
        });
        cb.on_conversion_complete(5, 5);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_conversion_start(3);
        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);

        for page in 1..=3 {
            tracker.on_page_start(page, 3);
            tracker.on_page_complete(page, 3, if page == 2 { 1 } else { 0 });
        }
        tracker.on_warning(&ConversionWarning::ScratchCleanupIncomplete {
            dir: "/tmp/x".into(),
            remaining: 1,
        });
        tracker.on_conversion_complete(3, 3);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.comments.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.warnings.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.written.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_page_start(1, 10);
        cb.on_page_complete(1, 10, 0);
    }
}
