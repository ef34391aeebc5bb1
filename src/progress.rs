//! Progress-callback trait for review events.
//!
//! Inject an [`Arc<dyn ReviewProgressCallback>`] via
//! [`crate::config::ReviewConfigBuilder::progress_callback`] to learn when
//! extraction finishes and the analysis call starts. This is how the shell
//! shows its informational "extracted, analysing…" state.
//!
//! # Example
//!
//! ```rust
//! use contract_review::{ReviewConfig, ReviewProgressCallback};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl ReviewProgressCallback for Printer {
//!     fn on_extraction_complete(&self, page_count: usize, char_count: usize) {
//!         eprintln!("{page_count} pages, {char_count} chars extracted; analysing…");
//!     }
//! }
//!
//! let config = ReviewConfig::builder()
//!     .progress_callback(Arc::new(Printer) as Arc<dyn ReviewProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the review pipeline at each stage boundary.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events are not emitted for missing-input warnings,
/// which are detected before the review starts.
pub trait ReviewProgressCallback: Send + Sync {
    /// Called once the inputs are validated, before extraction.
    ///
    /// # Arguments
    /// * `document_bytes` — size of the uploaded PDF
    fn on_review_start(&self, document_bytes: usize) {
        let _ = document_bytes;
    }

    /// Called when text extraction produced non-blank text.
    ///
    /// # Arguments
    /// * `page_count` — pages in the document
    /// * `char_count` — characters of extracted text
    fn on_extraction_complete(&self, page_count: usize, char_count: usize) {
        let _ = (page_count, char_count);
    }

    /// Called just before the chat-completion request is sent.
    fn on_analysis_start(&self, model: &str) {
        let _ = model;
    }

    /// Called when the model answered.
    ///
    /// # Arguments
    /// * `analysis_len` — byte length of the returned Markdown
    fn on_review_complete(&self, analysis_len: usize) {
        let _ = analysis_len;
    }

    /// Called when the review stopped after it started.
    fn on_review_failed(&self, error: &str) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ReviewProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ReviewConfig`].
pub type ProgressCallback = Arc<dyn ReviewProgressCallback>;
