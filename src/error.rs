//! Error types for the contract-review library.
//!
//! Every failure of a review is a [`ContractError`]. The shell decides how to
//! present it through [`ContractError::severity`]:
//!
//! * [`Severity::Warning`] — the user left something out or gave us a
//!   document with nothing to read. No remote call was made.
//!
//! * [`Severity::Error`] — the document could not be parsed, or the
//!   chat-completion call failed. The message carries the underlying cause.
//!
//! A review either returns a complete [`crate::output::ContractReview`] or
//! one of these errors, never a partial result.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the contract-review library.
#[derive(Debug, Error)]
pub enum ContractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A required input (file or credential) was not supplied.
    #[error("{0}")]
    MissingInput(MissingInput),

    /// The local file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Document errors ───────────────────────────────────────────────────
    /// The bytes are not a readable PDF.
    #[error("Could not read the PDF: {detail}")]
    DocumentParse { detail: String },

    /// The PDF parsed but has no extractable text (e.g. a scanned image).
    #[error("The PDF ({pages} pages) contains no extractable text.\nScanned documents need OCR before they can be analysed.")]
    EmptyDocument { pages: usize },

    /// Extracted text exceeds the configured input limit.
    #[error("Contract text is too long to analyse: {chars} characters (limit {limit})")]
    DocumentTooLarge { chars: usize, limit: usize },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The chat-completion call failed: transport, authentication, quota,
    /// remote error or malformed response.
    #[error("Contract analysis failed: {message}")]
    Analysis { message: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Which input was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// No contract file was selected.
    Document,
    /// No API key was supplied.
    Credential,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::Document => f.write_str("Please upload a contract PDF first."),
            MissingInput::Credential => {
                f.write_str("Please enter your API key to continue.")
            }
        }
    }
}

/// How the shell should present an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl ContractError {
    pub fn severity(&self) -> Severity {
        match self {
            ContractError::MissingInput(_) | ContractError::EmptyDocument { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    pub(crate) fn analysis(message: impl Into<String>) -> Self {
        ContractError::Analysis {
            message: message.into(),
        }
    }

    pub(crate) fn parse(detail: impl Into<String>) -> Self {
        ContractError::DocumentParse {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_a_warning() {
        let e = ContractError::MissingInput(MissingInput::Credential);
        assert_eq!(e.severity(), Severity::Warning);
        assert!(e.to_string().contains("API key"), "got: {e}");
    }

    #[test]
    fn empty_document_is_a_warning() {
        let e = ContractError::EmptyDocument { pages: 4 };
        assert_eq!(e.severity(), Severity::Warning);
        assert!(e.to_string().contains("4 pages"));
    }

    #[test]
    fn analysis_error_keeps_underlying_message() {
        let e = ContractError::analysis("HTTP 401: invalid api key");
        assert_eq!(e.severity(), Severity::Error);
        assert!(e.to_string().contains("invalid api key"));
    }

    #[test]
    fn too_large_display() {
        let e = ContractError::DocumentTooLarge {
            chars: 500_001,
            limit: 400_000,
        };
        let msg = e.to_string();
        assert!(msg.contains("500001"), "got: {msg}");
        assert!(msg.contains("400000"), "got: {msg}");
    }
}
