//! Configuration types for a contract review.
//!
//! All review behaviour is controlled through [`ReviewConfig`], built via its
//! [`ReviewConfigBuilder`]. The library never reads environment variables;
//! the shell maps its flags onto the builder.

use crate::client::ChatClient;
use crate::error::ContractError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default chat-completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for a contract review.
///
/// Built via [`ReviewConfig::builder()`] or using [`ReviewConfig::default()`].
///
/// # Example
/// ```rust
/// use contract_review::{PromptLocale, ReviewConfig};
///
/// let config = ReviewConfig::builder()
///     .model("gpt-4.1-mini")
///     .temperature(0.1)
///     .locale(PromptLocale::Indonesian)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ReviewConfig {
    /// Chat-completion model identifier. Default: `gpt-3.5-turbo`.
    pub model: String,

    /// Sampling temperature. Default: 0.2.
    ///
    /// Kept low so the summary sticks to what the contract says.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: None (API default).
    pub max_tokens: Option<u32>,

    /// Root of the OpenAI-compatible API, without the `/chat/completions`
    /// suffix. Default: `https://api.openai.com/v1`.
    pub api_base_url: String,

    /// Per-request timeout for the chat-completion call in seconds. Default: 120.
    pub api_timeout_secs: u64,

    /// Largest extracted text, in characters, that will be sent to the model.
    /// Default: 400 000.
    ///
    /// Longer documents fail with [`ContractError::DocumentTooLarge`] before
    /// any network call.
    pub max_input_chars: usize,

    /// Language of the persona and instruction template. Default: English.
    pub locale: PromptLocale,

    /// Custom system persona. If None, uses the locale's built-in persona.
    pub system_prompt: Option<String>,

    /// Pre-constructed chat client. If None, an [`crate::client::OpenAiChatClient`]
    /// is built from `api_base_url` and `api_timeout_secs`.
    pub client: Option<Arc<dyn ChatClient>>,

    /// Optional progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout_secs: 120,
            max_input_chars: 400_000,
            locale: PromptLocale::default(),
            system_prompt: None,
            client: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ReviewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_base_url", &self.api_base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("max_input_chars", &self.max_input_chars)
            .field("locale", &self.locale)
            .field("system_prompt", &self.system_prompt)
            .field("client", &self.client.as_ref().map(|_| "<dyn ChatClient>"))
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ReviewProgressCallback>"),
            )
            .finish()
    }
}

impl ReviewConfig {
    /// Create a new builder for `ReviewConfig`.
    pub fn builder() -> ReviewConfigBuilder {
        ReviewConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReviewConfig`].
#[derive(Debug)]
pub struct ReviewConfigBuilder {
    config: ReviewConfig,
}

impl ReviewConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn max_input_chars(mut self, n: usize) -> Self {
        self.config.max_input_chars = n;
        self
    }

    pub fn locale(mut self, locale: PromptLocale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.config.client = Some(client);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReviewConfig, ContractError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ContractError::InvalidConfig(
                "Model identifier must not be empty".into(),
            ));
        }
        if !c.temperature.is_finite() {
            return Err(ContractError::InvalidConfig(format!(
                "Temperature must be a finite number, got {}",
                c.temperature
            )));
        }
        if c.api_timeout_secs == 0 {
            return Err(ContractError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        if c.max_input_chars == 0 {
            return Err(ContractError::InvalidConfig(
                "max_input_chars must be ≥ 1".into(),
            ));
        }
        if c.client.is_none() && !is_http_url(&c.api_base_url) {
            return Err(ContractError::InvalidConfig(format!(
                "API base URL must start with http:// or https://, got '{}'",
                c.api_base_url
            )));
        }
        Ok(self.config)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Language of the prompt sent to the model.
///
/// The model answers in the language it is asked in, so this also selects
/// the language of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromptLocale {
    /// English persona and template. (default)
    #[default]
    English,
    /// Bahasa Indonesia persona and template.
    Indonesian,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ReviewConfig::default();
        assert_eq!(c.model, "gpt-3.5-turbo");
        assert_eq!(c.temperature, 0.2);
        assert_eq!(c.max_tokens, None);
        assert_eq!(c.locale, PromptLocale::English);
        assert!(c.client.is_none());
    }

    #[test]
    fn temperature_is_clamped() {
        let c = ReviewConfig::builder().temperature(7.5).build().unwrap();
        assert_eq!(c.temperature, 2.0);
        let c = ReviewConfig::builder().temperature(-1.0).build().unwrap();
        assert_eq!(c.temperature, 0.0);
    }

    #[test]
    fn non_finite_temperature_rejected() {
        let err = ReviewConfig::builder()
            .temperature(f32::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ContractError::InvalidConfig(_)), "got {err:?}");

        // Infinities clamp to the range ends.
        let c = ReviewConfig::builder()
            .temperature(f32::INFINITY)
            .build()
            .unwrap();
        assert_eq!(c.temperature, 2.0);
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let c = ReviewConfig::builder()
            .api_base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(c.api_base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn rejects_empty_model() {
        let err = ReviewConfig::builder().model("  ").build().unwrap_err();
        assert!(matches!(err, ContractError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_timeout_and_limit() {
        assert!(ReviewConfig::builder().api_timeout_secs(0).build().is_err());
        assert!(ReviewConfig::builder().max_input_chars(0).build().is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ReviewConfig::builder()
            .api_base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn debug_hides_trait_objects() {
        let dbg = format!("{:?}", ReviewConfig::default());
        assert!(dbg.contains("gpt-3.5-turbo"));
        assert!(dbg.contains("client: None"));
    }
}
