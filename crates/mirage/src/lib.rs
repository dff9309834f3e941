//! A library for simulating code execution with a text-completion model.
//!
//! Mirage never runs submitted code. It asks a generative model to emulate
//! what a terminal would show, or to propose a revised version of the code.
//! The output is a best-effort approximation by construction.
//!
//! # Features
//!
//! - **Language registry**: Per-language metadata, starter templates, and input patterns, loaded once from TOML.
//! - **Input detection**: Case-insensitive pattern heuristic that asks for input values before simulating.
//! - **Prompt construction**: Deterministic instructions that keep the model's reply shaped like terminal output.
//! - **Completion gateway**: Single-shot, time-bounded calls to Gemini with typed failure outcomes.
//! - **Orchestration**: `simulate` and `suggest` operations with a uniform error type.

pub use crate::config::{
    CompletionConfig, Config, ConfigError, EXAMPLE_CONFIG, Language, LanguageKind,
    LanguageRegistry, ServerConfig,
};
pub use crate::detect::requires_input;
pub use crate::gateway::{
    CompletionFailure, CompletionGateway, CompletionOutcome, FailureKind, GatewayError,
    GeminiGateway,
};
pub use crate::prompt::{NO_OUTPUT_SENTINEL, simulation_prompt, suggestion_prompt};
pub use crate::simulator::{LIVE_PREVIEW_MESSAGE, NEEDS_INPUT_MESSAGE, RequestError, Simulator};
pub use crate::types::{Simulation, SimulationRequest, SuggestionRequest};

pub mod config;
pub mod detect;
pub mod gateway;
pub mod prompt;
pub mod simulator;
pub mod types;
