use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::CompletionConfig;
use crate::gateway::api_error::extract_api_error;
use crate::gateway::{CompletionFailure, CompletionGateway, CompletionOutcome, GatewayError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gateway to Google's `generateContent` endpoint
///
/// Holds one pooled `reqwest::Client`; clones share it.
#[derive(Clone)]
pub struct GeminiGateway {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    api_key: String,
    timeout: Duration,
}

impl GeminiGateway {
    /// Build a gateway, resolving the API key from the config or environment
    pub fn from_config(config: &CompletionConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key()?;
        Self::new(config, api_key)
    }

    /// Build a gateway with an explicit API key
    pub fn new(config: &CompletionConfig, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let model_path = if config.model.starts_with("models/") {
            config.model.clone()
        } else {
            format!("models/{}", config.model)
        };
        let url = format!(
            "{}/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            model_path
        );
        let endpoint = reqwest::Url::parse(&url).map_err(|e| GatewayError::Endpoint {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let timeout = config.timeout();
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    fn transport_failure(&self, err: reqwest::Error) -> CompletionFailure {
        if err.is_timeout() {
            CompletionFailure::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            CompletionFailure::Network(err.to_string())
        }
    }
}

impl std::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionGateway for GeminiGateway {
    async fn complete(&self, prompt: &str) -> CompletionOutcome {
        let body = json!({
            "contents": [
                {
                    "parts": [
                        {"text": prompt}
                    ]
                }
            ]
        });

        debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "requesting completion");

        let response = match self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return self.transport_failure(err).into(),
        };

        let status = response.status();
        let payload = match response.text().await {
            Ok(payload) => payload,
            Err(err) => return self.transport_failure(err).into(),
        };

        if !status.is_success() {
            let detail = extract_api_error(&payload);
            warn!(status = status.as_u16(), %detail, "completion endpoint returned an error");
            return CompletionFailure::Api {
                status: status.as_u16(),
                detail,
            }
            .into();
        }

        match first_candidate_text(&payload) {
            Some(text) => CompletionOutcome::Text(text.trim().to_owned()),
            None => {
                warn!("completion response carried no candidate text");
                CompletionFailure::EmptyResponse.into()
            }
        }
    }
}

/// Text of the first candidate's first text part, if the body has one
fn first_candidate_text(payload: &str) -> Option<String> {
    let parsed: GeminiResponse = serde_json::from_str(payload).ok()?;
    parsed
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .find_map(|part| part.text)
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
