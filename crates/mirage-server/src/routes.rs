//! HTTP routes
//!
//! A thin shell over [`Simulator`]: decode JSON, call the operation, encode
//! the result. Every failure leaves as `{"error": ...}`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mirage::{RequestError, Simulation, SimulationRequest, Simulator, SuggestionRequest};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<Simulator>,
}

pub fn router(simulator: Simulator) -> Router {
    let state = AppState {
        simulator: Arc::new(simulator),
    };

    Router::new()
        .route("/run_code", post(run_code))
        .route("/suggest_code", post(suggest_code))
        .route("/languages", get(languages))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct RunCodeBody {
    #[serde(default)]
    code: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    inputs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestCodeBody {
    #[serde(default)]
    code: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    prompt: String,
}

fn default_language() -> String {
    "python".to_owned()
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RunCodeReply {
    Output {
        output: String,
    },
    NeedsInput {
        #[serde(rename = "needsInput")]
        needs_input: bool,
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct SuggestCodeReply {
    suggestion: String,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    error: String,
}

#[derive(Debug, Serialize)]
struct LanguageEntry<'a> {
    key: &'a str,
    name: &'a str,
    icon: &'a str,
    extension: String,
    kind: &'static str,
    template: &'a str,
    simulated: bool,
}

enum ApiError {
    Request(RequestError),
    Body(JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Request(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Request(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(ErrorReply { error })).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

async fn run_code(
    State(state): State<AppState>,
    body: Result<Json<RunCodeBody>, JsonRejection>,
) -> Result<Json<RunCodeReply>, ApiError> {
    let Json(body) = body?;
    let request = SimulationRequest::new(body.code, body.language).with_inputs(body.inputs);
    let reply = match state.simulator.simulate(&request).await? {
        Simulation::Output(output) => RunCodeReply::Output { output },
        Simulation::NeedsInput { message } => RunCodeReply::NeedsInput {
            needs_input: true,
            message,
        },
    };
    Ok(Json(reply))
}

async fn suggest_code(
    State(state): State<AppState>,
    body: Result<Json<SuggestCodeBody>, JsonRejection>,
) -> Result<Json<SuggestCodeReply>, ApiError> {
    let Json(body) = body?;
    let request = SuggestionRequest::new(body.code, body.language, body.prompt);
    let suggestion = state.simulator.suggest(&request).await?;
    Ok(Json(SuggestCodeReply { suggestion }))
}

async fn languages(State(state): State<AppState>) -> Response {
    let entries: Vec<_> = state
        .simulator
        .languages()
        .sorted()
        .into_iter()
        .map(|language| LanguageEntry {
            key: &language.key,
            name: &language.name,
            icon: &language.icon,
            extension: language.extension.to_string(),
            kind: language.kind.as_str(),
            template: &language.template,
            simulated: language.supports_simulated_execution(),
        })
        .collect();
    Json(entries).into_response()
}

async fn health() -> &'static str {
    "ok"
}
