//! CLI binary for contract-review.
//!
//! A thin shell over the library crate: it collects the PDF and the API key,
//! maps flags to `ReviewConfig`, shows status lines while the review runs and
//! prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use contract_review::{
    review_file, review_to_file, ContractError, ContractReview, PromptLocale, ProgressCallback,
    ReviewConfig, ReviewProgressCallback, Severity,
};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner that reports each stage of the review.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> std::sync::Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        std::sync::Arc::new(Self { bar })
    }
}

impl ReviewProgressCallback for CliProgressCallback {
    // Not drawn until here, so missing-input warnings print on a clean line.
    fn on_review_start(&self, _document_bytes: usize) {
        self.bar.set_message("Reading PDF…");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_extraction_complete(&self, page_count: usize, char_count: usize) {
        self.bar.println(format!(
            "{} Text extracted ({page_count} pages, {char_count} chars). Analysing…",
            cyan("ℹ")
        ));
    }

    fn on_analysis_start(&self, model: &str) {
        self.bar
            .set_message(format!("Analysing the contract with {model}… this may take a while"));
    }

    fn on_review_complete(&self, _analysis_len: usize) {
        self.bar.finish_and_clear();
    }

    fn on_review_failed(&self, _error: &str) {
        self.bar.finish_and_clear();
    }
}

const DISCLAIMER: &str = "This summary is informational and is not legal advice.";

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarise a contract (Markdown on stdout)
  contract-review lease.pdf

  # Write the summary to a file
  contract-review lease.pdf -o lease-review.md

  # Summary in Bahasa Indonesia
  contract-review --locale id perjanjian.pdf

  # A self-hosted OpenAI-compatible gateway
  contract-review --base-url http://localhost:11434/v1 --model llama3.1 nda.pdf

  # JSON output with page count, token usage and timings
  contract-review --json nda.pdf > review.json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY                API key (same as --api-key)
  CONTRACT_REVIEW_MODEL         Model ID
  CONTRACT_REVIEW_BASE_URL      API root URL

The summary is informational and is not legal advice.
"#;

/// Summarise a PDF contract with a chat-completion LLM.
#[derive(Parser, Debug)]
#[command(
    name = "contract-review",
    version,
    about = "Summarise a PDF contract with a chat-completion LLM",
    long_about = "Extract the text of a PDF contract and ask a chat-completion model for a \
structured legal summary: parties, executive summary, obligations, term, payment, \
confidentiality, dispute resolution, termination and risk flags.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Contract PDF to analyse.
    input: Option<PathBuf>,

    /// API key for the chat-completion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Write the Markdown summary to this file instead of stdout.
    #[arg(short, long, env = "CONTRACT_REVIEW_OUTPUT")]
    output: Option<PathBuf>,

    /// Chat-completion model ID.
    #[arg(long, env = "CONTRACT_REVIEW_MODEL", default_value = contract_review::config::DEFAULT_MODEL)]
    model: String,

    /// Root URL of the OpenAI-compatible API.
    #[arg(long, env = "CONTRACT_REVIEW_BASE_URL", default_value = contract_review::config::DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "CONTRACT_REVIEW_TEMPERATURE", default_value_t = 0.2)]
    temperature: f32,

    /// Max tokens in the model's answer.
    #[arg(long, env = "CONTRACT_REVIEW_MAX_TOKENS")]
    max_tokens: Option<u32>,

    /// Refuse documents whose text exceeds this many characters.
    #[arg(long, env = "CONTRACT_REVIEW_MAX_INPUT_CHARS", default_value_t = 400_000)]
    max_input_chars: usize,

    /// Prompt language: en or id.
    #[arg(long, env = "CONTRACT_REVIEW_LOCALE", value_enum, default_value = "en")]
    locale: LocaleArg,

    /// Path to a text file containing a custom system persona.
    #[arg(long, env = "CONTRACT_REVIEW_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Chat-completion call timeout in seconds.
    #[arg(long, env = "CONTRACT_REVIEW_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Output structured JSON (ContractReview) instead of Markdown.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "CONTRACT_REVIEW_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CONTRACT_REVIEW_VERBOSE")]
    verbose: bool,

    /// Suppress all output except the result and errors.
    #[arg(short, long, env = "CONTRACT_REVIEW_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LocaleArg {
    En,
    Id,
}

impl From<LocaleArg> for PromptLocale {
    fn from(v: LocaleArg) -> Self {
        match v {
            LocaleArg::En => PromptLocale::English,
            LocaleArg::Id => PromptLocale::Indonesian,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Keep library INFO logs out of the way while the spinner is drawing.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as ProgressCallback)
    } else {
        None
    };

    let config = build_config(&cli, progress).await?;
    let credential = cli.api_key.clone().map(SecretString::from);

    // ── Run review ───────────────────────────────────────────────────────
    let result = match cli.output {
        Some(ref out) => {
            review_to_file(cli.input.as_deref(), credential.as_ref(), out, &config).await
        }
        None => review_file(cli.input.as_deref(), credential.as_ref(), &config).await,
    };

    match result {
        Ok(review) => {
            print_review(&cli, &review)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_error(&e)),
    }
}

fn print_review(cli: &Cli, review: &ContractReview) -> Result<()> {
    if cli.json {
        let json = serde_json::to_string_pretty(review).context("Failed to serialise output")?;
        println!("{json}");
    } else if cli.output.is_none() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(review.analysis.as_bytes())
            .context("Failed to write to stdout")?;
        if !review.analysis.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet {
        for line in status_lines(review, cli.output.as_deref(), cli.json) {
            eprintln!("{line}");
        }
    }
    Ok(())
}

/// Stderr lines after a successful review; the disclaimer is always last.
fn status_lines(review: &ContractReview, output: Option<&Path>, json: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !json {
        let target = output
            .map(|p| format!("  →  {}", p.display()))
            .unwrap_or_default();
        lines.push(format!(
            "{} Contract analysed{target}  {}",
            green("✔"),
            dim(&format!(
                "{} pages, {} tokens in / {} out, {}ms",
                review.document.page_count,
                review.stats.prompt_tokens,
                review.stats.completion_tokens,
                review.stats.total_ms
            ))
        ));
    }
    lines.push(dim(DISCLAIMER));
    lines
}

/// Print a warning or an error and pick the exit code.
fn report_error(e: &ContractError) -> ExitCode {
    match e.severity() {
        Severity::Warning => {
            eprintln!("{} {}", yellow("⚠"), e);
            ExitCode::from(2)
        }
        Severity::Error => {
            eprintln!("{} {}", red("✘"), e);
            ExitCode::FAILURE
        }
    }
}

/// Map CLI args to `ReviewConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ReviewConfig> {
    let mut builder = ReviewConfig::builder()
        .model(cli.model.clone())
        .api_base_url(cli.base_url.clone())
        .temperature(cli.temperature)
        .max_input_chars(cli.max_input_chars)
        .locale(cli.locale.into())
        .api_timeout_secs(cli.api_timeout);

    if let Some(n) = cli.max_tokens {
        builder = builder.max_tokens(n);
    }
    if let Some(ref path) = cli.system_prompt {
        let persona = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(persona.trim().to_string());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_review::{DocumentSummary, ReviewStats};

    fn review() -> ContractReview {
        ContractReview {
            analysis: "## Parties\n".into(),
            document: DocumentSummary {
                page_count: 3,
                char_count: 1200,
            },
            stats: ReviewStats::default(),
        }
    }

    #[test]
    fn disclaimer_follows_every_result() {
        let lines = status_lines(&review(), Some(Path::new("out.md")), false);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Contract analysed"));
        assert!(lines[0].contains("out.md"));
        assert!(lines[1].contains(DISCLAIMER));

        let lines = status_lines(&review(), None, true);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("not legal advice"));
    }
}
