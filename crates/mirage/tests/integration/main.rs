//! Integration tests for mirage
//!
//! The orchestrator is exercised against a recording stub gateway and the
//! Gemini gateway against a local mock server, so no network access or API
//! key is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mirage::{CompletionGateway, CompletionOutcome, Config, Simulator};

mod config_loading;
mod simulate;
mod suggest;

const FIXTURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Path of a fixture config file
pub(crate) fn fixture_config(name: &str) -> String {
    format!("{FIXTURES_PATH}/configs/{name}")
}

/// Gateway stub that records every prompt and answers with a fixed outcome
pub(crate) struct StubGateway {
    outcome: CompletionOutcome,
    prompts: Mutex<Vec<String>>,
}

impl StubGateway {
    pub(crate) fn answering(outcome: CompletionOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn text(text: &str) -> Arc<Self> {
        Self::answering(CompletionOutcome::Text(text.to_owned()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionGateway for StubGateway {
    async fn complete(&self, prompt: &str) -> CompletionOutcome {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.outcome.clone()
    }
}

/// Simulator over the default languages and the given stub
pub(crate) fn simulator_with(gateway: &Arc<StubGateway>) -> Simulator {
    Simulator::new(Arc::new(Config::default().languages), gateway.clone())
}
