//! Text extraction: PDF bytes to the concatenated text of every page.
//!
//! ## Why spawn_blocking?
//!
//! Parsing and decoding content streams is CPU-bound and can take a while on
//! large contracts. `tokio::task::spawn_blocking` keeps that work off the
//! async worker threads.
//!
//! Pages are read in ascending page number and their text is appended with no
//! separator added. A document with no pages, or only blank pages, yields
//! empty text rather than an error; deciding what to do with that is the
//! caller's job.

use crate::error::ContractError;
use crate::pipeline::input::check_pdf_magic;
use lopdf::Document;
use std::fmt;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Text of a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

impl ExtractedText {
    /// True when there is nothing worth sending to the model.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extract text on the blocking thread pool.
pub async fn extract_document(bytes: Vec<u8>) -> Result<ExtractedText, ContractError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(join_failure)?
}

/// A parser panic is a document problem; only cancellation is internal.
fn join_failure(e: JoinError) -> ContractError {
    if e.is_panic() {
        ContractError::parse("the PDF parser crashed on this file")
    } else {
        ContractError::Internal(format!("Extraction task failed: {}", e))
    }
}

/// Blocking implementation of text extraction.
///
/// Text is collected chunk by chunk. A chunk lopdf cannot decode (typically
/// a font without a usable encoding) is logged and skipped; the document
/// only fails when no chunk on any page could be read.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ContractError> {
    check_pdf_magic(bytes)?;

    let mut document = Document::load_mem(bytes).map_err(|e| ContractError::parse(e.to_string()))?;

    if document.is_encrypted() {
        document
            .decrypt("")
            .map_err(|e| ContractError::parse(format!("encrypted PDF: {e}")))?;
        debug!("Decrypted PDF with empty password");
    }

    // BTreeMap keyed by 1-based page number: iteration is page order.
    let pages = document.get_pages();
    let page_count = pages.len();
    info!("PDF loaded: {} pages", page_count);

    let mut text = String::new();
    let mut tally = ChunkTally::default();
    for &page_num in pages.keys() {
        let before = text.len();
        tally.append(page_num, document.extract_text_chunks(&[page_num]), &mut text);
        debug!("Page {}: {} chars", page_num, text[before..].chars().count());
    }

    if tally.read == 0 {
        if let Some(first) = tally.first_error {
            return Err(ContractError::parse(format!(
                "no readable text in {} chunks ({first})",
                tally.failed
            )));
        }
    }

    Ok(ExtractedText { text, page_count })
}

#[derive(Debug, Default)]
struct ChunkTally {
    read: usize,
    failed: usize,
    first_error: Option<String>,
}

impl ChunkTally {
    fn append<E: fmt::Display>(
        &mut self,
        page_num: u32,
        chunks: impl IntoIterator<Item = Result<String, E>>,
        text: &mut String,
    ) {
        for chunk in chunks {
            match chunk {
                Ok(s) => {
                    self.read += 1;
                    text.push_str(&s);
                }
                Err(e) => {
                    warn!("Page {}: skipping unreadable text chunk: {}", page_num, e);
                    self.failed += 1;
                    if self.first_error.is_none() {
                        self.first_error = Some(format!("page {page_num}: {e}"));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_plain_text() {
        let err = extract_text(b"This is a contract, honest.").unwrap_err();
        assert!(matches!(err, ContractError::DocumentParse { .. }));
    }

    #[test]
    fn blank_detection() {
        let t = ExtractedText {
            text: " \n\t ".into(),
            page_count: 2,
        };
        assert!(t.is_blank());
        let t = ExtractedText {
            text: "Pasal 1 - Para Pihak".into(),
            page_count: 1,
        };
        assert!(!t.is_blank());
        assert_eq!(t.char_count(), 20);
    }

    #[test]
    fn unreadable_chunks_are_skipped() {
        let mut tally = ChunkTally::default();
        let mut text = String::new();
        tally.append(
            1,
            vec![
                Err("missing required dictionary key \"ToUnicode\""),
                Ok("Party A shall pay Party B.\n".to_string()),
            ],
            &mut text,
        );
        tally.append(2, vec![Ok::<_, &str>("Signed.\n".to_string())], &mut text);

        assert_eq!(text, "Party A shall pay Party B.\nSigned.\n");
        assert_eq!(tally.read, 2);
        assert_eq!(tally.failed, 1);
        assert!(tally.first_error.unwrap().starts_with("page 1: missing"));
    }

    #[test]
    fn all_chunks_failing_leaves_nothing_read() {
        let mut tally = ChunkTally::default();
        let mut text = String::new();
        tally.append(1, vec![Err::<String, _>("bad font"), Err("bad font")], &mut text);
        assert!(text.is_empty());
        assert_eq!(tally.read, 0);
        assert_eq!(tally.first_error.as_deref(), Some("page 1: bad font"));
    }

    #[tokio::test]
    async fn parser_panic_maps_to_parse_error() {
        let join_err = tokio::task::spawn_blocking(|| panic!("lopdf blew up"))
            .await
            .unwrap_err();
        let err = join_failure(join_err);
        assert!(matches!(err, ContractError::DocumentParse { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn async_wrapper_propagates_errors() {
        let err = extract_document(Vec::new()).await.unwrap_err();
        assert!(matches!(err, ContractError::DocumentParse { .. }));
    }
}
