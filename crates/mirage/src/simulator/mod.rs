//! Request orchestration for Mirage
//!
//! Sequences registry lookup, input detection, prompt construction, and the
//! completion call for the two public operations.

use std::sync::Arc;

use thiserror::Error;

pub use crate::simulator::simulate::{LIVE_PREVIEW_MESSAGE, NEEDS_INPUT_MESSAGE, simulate};
pub use crate::simulator::suggest::suggest;

mod simulate;
mod suggest;

use crate::{
    config::{Config, LanguageRegistry},
    gateway::{CompletionFailure, CompletionGateway, GatewayError, GeminiGateway},
    types::{Simulation, SimulationRequest, SuggestionRequest},
};

/// Errors returned by [`Simulator`] operations
#[derive(Debug, Error)]
pub enum RequestError {
    /// The language key is not in the registry. A client error; never retried.
    #[error("Unsupported language")]
    UnsupportedLanguage(String),

    /// The completion call failed
    #[error("{}", describe_failure(.0))]
    Completion(#[from] CompletionFailure),
}

impl RequestError {
    /// True when the caller sent something invalid
    pub fn is_client_error(&self) -> bool {
        matches!(self, RequestError::UnsupportedLanguage(_))
    }
}

fn describe_failure(failure: &CompletionFailure) -> String {
    match failure {
        CompletionFailure::Timeout { .. } | CompletionFailure::Network(_) => {
            format!("Network error: {failure}")
        }
        CompletionFailure::Api { .. } | CompletionFailure::EmptyResponse => failure.to_string(),
    }
}

/// High-level entry point for simulations and suggestions
///
/// Cheap to clone; all clones share the same registry and gateway.
#[derive(Clone)]
pub struct Simulator {
    languages: Arc<LanguageRegistry>,
    gateway: Arc<dyn CompletionGateway>,
}

impl Simulator {
    /// Create a simulator over the given registry and gateway
    pub fn new(languages: Arc<LanguageRegistry>, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { languages, gateway }
    }

    /// Create a simulator backed by Gemini, as described by `config`
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let gateway = GeminiGateway::from_config(&config.completion)?;
        Ok(Self::new(
            Arc::new(config.languages.clone()),
            Arc::new(gateway),
        ))
    }

    /// Get the language registry
    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    /// Simulate running the request's code
    pub async fn simulate(&self, request: &SimulationRequest) -> Result<Simulation, RequestError> {
        simulate::simulate(&self.languages, self.gateway.as_ref(), request).await
    }

    /// Ask for a revised version of the request's code
    pub async fn suggest(&self, request: &SuggestionRequest) -> Result<String, RequestError> {
        suggest::suggest(&self.languages, self.gateway.as_ref(), request).await
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("languages", &self.languages.len())
            .finish_non_exhaustive()
    }
}
