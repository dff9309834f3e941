//! Completion gateway
//!
//! Single-shot calls to the external text-completion service. Every outcome,
//! including transport failures, comes back as a [`CompletionOutcome`].

use async_trait::async_trait;
use thiserror::Error;

pub use crate::gateway::gemini::GeminiGateway;

mod api_error;
mod gemini;

/// Result of one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Trimmed text of the first candidate
    Text(String),
    Failure(CompletionFailure),
}

impl CompletionOutcome {
    /// Convert into a `Result` so callers can propagate failures with `?`
    pub fn into_result(self) -> Result<String, CompletionFailure> {
        match self {
            CompletionOutcome::Text(text) => Ok(text),
            CompletionOutcome::Failure(failure) => Err(failure),
        }
    }
}

impl From<CompletionFailure> for CompletionOutcome {
    fn from(failure: CompletionFailure) -> Self {
        CompletionOutcome::Failure(failure)
    }
}

/// Ways a completion call can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailure {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("{0}")]
    Network(String),

    #[error("API Error: {status}")]
    Api { status: u16, detail: String },

    #[error("No response from AI")]
    EmptyResponse,
}

impl CompletionFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            CompletionFailure::Timeout { .. } => FailureKind::Timeout,
            CompletionFailure::Network(_) => FailureKind::Network,
            CompletionFailure::Api { .. } => FailureKind::Api,
            CompletionFailure::EmptyResponse => FailureKind::EmptyResponse,
        }
    }
}

/// Discriminant of [`CompletionFailure`], handy for logging and metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Network,
    Api,
    EmptyResponse,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Network => "network",
            FailureKind::Api => "api",
            FailureKind::EmptyResponse => "empty_response",
        }
    }
}

/// Errors building a gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid endpoint URL '{url}': {reason}")]
    Endpoint { url: String, reason: String },
}

/// A text-completion backend
///
/// Implementations issue at most one upstream request per call and must be
/// safe to share between concurrent requests.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> CompletionOutcome;
}
