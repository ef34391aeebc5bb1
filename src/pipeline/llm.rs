//! Contract analysis: compose the chat request and call the model.
//!
//! All wording lives in [`crate::prompts`] and all transport in
//! [`crate::client`].
//!
//! There is no retry. A failed call surfaces as
//! [`ContractError::Analysis`] and the user re-triggers the review.

use crate::client::{ChatClient, ChatMessage, ChatRequest};
use crate::config::ReviewConfig;
use crate::error::ContractError;
use crate::prompts::{render_instructions, system_persona};
use secrecy::SecretString;
use std::time::Instant;
use tracing::{debug, warn};

/// The model's answer plus usage.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub markdown: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub duration_ms: u64,
}

/// Build the two-message request for `contract_text`.
///
/// ## Message Layout
///
/// 1. **System message** — the locale's persona sentence (or the
///    user-supplied override)
/// 2. **User message** — the instruction template with the contract text
///    between the begin/end markers
pub fn build_request(contract_text: &str, config: &ReviewConfig) -> ChatRequest {
    let persona = config
        .system_prompt
        .as_deref()
        .unwrap_or_else(|| system_persona(config.locale));

    ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(persona),
            ChatMessage::user(render_instructions(config.locale, contract_text)),
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

/// Reject text longer than `config.max_input_chars`.
pub fn check_input_size(contract_text: &str, config: &ReviewConfig) -> Result<usize, ContractError> {
    let chars = contract_text.chars().count();
    if chars > config.max_input_chars {
        warn!(
            "Contract text has {} chars, limit is {}; not sending",
            chars, config.max_input_chars
        );
        return Err(ContractError::DocumentTooLarge {
            chars,
            limit: config.max_input_chars,
        });
    }
    Ok(chars)
}

/// Send the contract to the model and return its answer unchanged.
pub async fn analyze_contract(
    client: &dyn ChatClient,
    credential: &SecretString,
    contract_text: &str,
    config: &ReviewConfig,
) -> Result<Analysis, ContractError> {
    let start = Instant::now();
    let request = build_request(contract_text, config);

    let response = client.complete(&request, credential).await.map_err(|e| {
        warn!("Analysis call failed: {}", e);
        match e {
            ContractError::Analysis { .. } => e,
            other => ContractError::analysis(other.to_string()),
        }
    })?;

    let duration = start.elapsed();
    debug!(
        "{} input tokens, {} output tokens, {:?}",
        response.prompt_tokens, response.completion_tokens, duration
    );

    Ok(Analysis {
        markdown: response.content,
        prompt_tokens: response.prompt_tokens,
        completion_tokens: response.completion_tokens,
        duration_ms: duration.as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Role;
    use crate::config::PromptLocale;
    use crate::prompts::{BEGIN_MARKER, END_MARKER};

    #[test]
    fn request_has_exactly_two_messages() {
        let config = ReviewConfig::default();
        let req = build_request("Party A shall pay Party B.", &config);

        assert_eq!(req.model, "gpt-3.5-turbo");
        assert_eq!(req.temperature, 0.2);
        assert_eq!(req.max_tokens, None);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert_eq!(req.messages[0].content, "You are a legal AI assistant.");
        assert_eq!(req.messages[1].role, Role::User);

        let user = &req.messages[1].content;
        let begin = user.find(BEGIN_MARKER).unwrap();
        let text = user.find("Party A shall pay Party B.").unwrap();
        let end = user.find(END_MARKER).unwrap();
        assert!(begin < text && text < end);
    }

    #[test]
    fn request_follows_locale_and_overrides() {
        let config = ReviewConfig::builder()
            .locale(PromptLocale::Indonesian)
            .max_tokens(1500)
            .build()
            .unwrap();
        let req = build_request("x", &config);
        assert_eq!(req.messages[0].content, "Anda adalah asisten legal AI.");
        assert!(req.messages[1].content.contains("Para Pihak"));
        assert_eq!(req.max_tokens, Some(1500));

        let config = ReviewConfig::builder()
            .system_prompt("You review NDAs.")
            .build()
            .unwrap();
        assert_eq!(build_request("x", &config).messages[0].content, "You review NDAs.");
    }

    #[test]
    fn size_limit_counts_chars_not_bytes() {
        let config = ReviewConfig::builder().max_input_chars(3).build().unwrap();
        // Three chars, six bytes.
        assert_eq!(check_input_size("ääą", &config).unwrap(), 3);
        let err = check_input_size("abcd", &config).unwrap_err();
        assert!(matches!(
            err,
            ContractError::DocumentTooLarge { chars: 4, limit: 3 }
        ));
    }
}
