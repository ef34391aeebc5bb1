//! Result types returned by a successful review.

use serde::Serialize;

/// A finished contract review.
#[derive(Debug, Clone, Serialize)]
pub struct ContractReview {
    /// The model's answer, exactly as returned (Markdown).
    pub analysis: String,
    /// What was read from the PDF.
    pub document: DocumentSummary,
    /// Token usage and timings.
    pub stats: ReviewStats,
}

/// Shape of the extracted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub page_count: usize,
    /// Characters (not bytes) of extracted text sent to the model.
    pub char_count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewStats {
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub extraction_ms: u64,
    pub analysis_ms: u64,
    pub total_ms: u64,
}
