//! Review entry points.
//!
//! One call runs the whole pipeline for one user action:
//!
//! ```text
//! inputs present? ──▶ extract ──▶ text blank? ──▶ size ok? ──▶ analyse
//!   (warning)        (error)      (warning)       (error)      (error)
//! ```
//!
//! Missing inputs are checked before anything else, and every short-circuit
//! happens before the network call. The caller gets either the complete
//! [`ContractReview`] or a [`ContractError`].

use crate::client::{ChatClient, OpenAiChatClient};
use crate::config::ReviewConfig;
use crate::error::{ContractError, MissingInput};
use crate::output::{ContractReview, DocumentSummary, ReviewStats};
use crate::pipeline::{extract, input, llm};
use secrecy::SecretString;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Review a contract held in memory.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `document`   — raw PDF bytes, or None if no file was selected
/// * `credential` — API key, or None if none was entered
/// * `config`     — review configuration
///
/// # Errors
/// - [`ContractError::MissingInput`] — no document or blank credential; no
///   extraction or network call is made
/// - [`ContractError::DocumentParse`] — not a readable PDF
/// - [`ContractError::EmptyDocument`] — no extractable text
/// - [`ContractError::DocumentTooLarge`] — over `config.max_input_chars`
/// - [`ContractError::Analysis`] — the chat-completion call failed
pub async fn review_contract(
    document: Option<&[u8]>,
    credential: Option<&SecretString>,
    config: &ReviewConfig,
) -> Result<ContractReview, ContractError> {
    let document = input::require_document(document)?;
    let credential = input::require_credential(credential)?;

    let result = run_review(document, credential, config).await;
    if let (Err(e), Some(cb)) = (&result, &config.progress_callback) {
        cb.on_review_failed(&e.to_string());
    }
    result
}

/// Review a contract stored in a local file.
pub async fn review_file(
    path: Option<&Path>,
    credential: Option<&SecretString>,
    config: &ReviewConfig,
) -> Result<ContractReview, ContractError> {
    let path = path.ok_or(ContractError::MissingInput(MissingInput::Document))?;
    input::require_credential(credential)?;

    let bytes = input::read_local(path).await?;
    review_contract(Some(&bytes), credential, config).await
}

/// Review a local file and write the analysis Markdown to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn review_to_file(
    path: Option<&Path>,
    credential: Option<&SecretString>,
    output_path: impl AsRef<Path>,
    config: &ReviewConfig,
) -> Result<ContractReview, ContractError> {
    let review = review_file(path, credential, config).await?;
    let out = output_path.as_ref();
    let io_err = |source: std::io::Error| ContractError::Io {
        path: out.to_path_buf(),
        source,
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let tmp_path = out.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, &review.analysis)
        .await
        .map_err(io_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, out).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(io_err(e));
    }

    info!("Analysis written to {}", out.display());
    Ok(review)
}

/// Synchronous wrapper around [`review_contract`].
///
/// Creates a temporary tokio runtime internally.
pub fn review_sync(
    document: Option<&[u8]>,
    credential: Option<&SecretString>,
    config: &ReviewConfig,
) -> Result<ContractReview, ContractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ContractError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(review_contract(document, credential, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

async fn run_review(
    document: &[u8],
    credential: &SecretString,
    config: &ReviewConfig,
) -> Result<ContractReview, ContractError> {
    let total_start = Instant::now();
    info!("Starting review: {} bytes", document.len());
    if let Some(ref cb) = config.progress_callback {
        cb.on_review_start(document.len());
    }

    // ── Step 1: Extract text ─────────────────────────────────────────────
    let extract_start = Instant::now();
    let extracted = extract::extract_document(document.to_vec()).await?;
    let extraction_ms = extract_start.elapsed().as_millis() as u64;

    if extracted.is_blank() {
        warn!(
            "No extractable text in {} pages; skipping analysis",
            extracted.page_count
        );
        return Err(ContractError::EmptyDocument {
            pages: extracted.page_count,
        });
    }

    // ── Step 2: Enforce input limit ──────────────────────────────────────
    let char_count = llm::check_input_size(&extracted.text, config)?;
    info!(
        "Extracted {} chars from {} pages in {}ms",
        char_count, extracted.page_count, extraction_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(extracted.page_count, char_count);
    }

    // ── Step 3: Analyse ──────────────────────────────────────────────────
    let client = resolve_client(config)?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_analysis_start(&config.model);
    }
    let analysis = llm::analyze_contract(client.as_ref(), credential, &extracted.text, config).await?;

    let stats = ReviewStats {
        model: config.model.clone(),
        prompt_tokens: analysis.prompt_tokens,
        completion_tokens: analysis.completion_tokens,
        extraction_ms,
        analysis_ms: analysis.duration_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Review complete: {} chars of analysis, {}ms total",
        analysis.markdown.len(),
        stats.total_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_review_complete(analysis.markdown.len());
    }

    Ok(ContractReview {
        analysis: analysis.markdown,
        document: DocumentSummary {
            page_count: extracted.page_count,
            char_count,
        },
        stats,
    })
}

/// Use the caller's client if one was configured, else build the
/// OpenAI-compatible client from the config.
fn resolve_client(config: &ReviewConfig) -> Result<Arc<dyn ChatClient>, ContractError> {
    if let Some(ref client) = config.client {
        return Ok(Arc::clone(client));
    }
    Ok(Arc::new(OpenAiChatClient::from_config(config)?))
}
