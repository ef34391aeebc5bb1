//! Pipeline stages for a contract review.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ llm
//! (checks)  (lopdf)     (chat completion)
//! ```
//!
//! 1. [`input`]   — both inputs present, bytes start with `%PDF`
//! 2. [`extract`] — concatenate page text; runs in `spawn_blocking`
//! 3. [`llm`]     — template + text → one chat-completion call; the only
//!    stage with network I/O

pub mod extract;
pub mod input;
pub mod llm;
