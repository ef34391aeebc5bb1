//! # contract-review
//!
//! Extract the text of a PDF contract and ask a chat-completion model for a
//! structured legal summary: parties, executive summary, key clauses and
//! risk flags.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes + API key
//!  │
//!  ├─ 1. Input    both present? bytes start with %PDF?
//!  ├─ 2. Extract  concatenate page text via lopdf (spawn_blocking)
//!  ├─ 3. Guard    blank text → warning, oversize text → error
//!  ├─ 4. Analyse  one chat-completion call, persona + instruction template
//!  └─ 5. Output   the model's Markdown, unchanged, plus usage stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contract_review::{review_contract, ReviewConfig};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pdf = std::fs::read("contract.pdf")?;
//!     let key = SecretString::from(std::env::var("OPENAI_API_KEY")?);
//!     let config = ReviewConfig::default();
//!     let review = review_contract(Some(&pdf), Some(&key), &config).await?;
//!     println!("{}", review.analysis);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `contract-review` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! contract-review = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod review;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ChatClient, ChatMessage, ChatRequest, ChatResponse, OpenAiChatClient, Role};
pub use config::{PromptLocale, ReviewConfig, ReviewConfigBuilder};
pub use error::{ContractError, MissingInput, Severity};
pub use output::{ContractReview, DocumentSummary, ReviewStats};
pub use pipeline::extract::{extract_text, ExtractedText};
pub use progress::{NoopProgressCallback, ProgressCallback, ReviewProgressCallback};
pub use review::{review_contract, review_file, review_sync, review_to_file};
