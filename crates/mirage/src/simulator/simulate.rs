//! Simulated execution
//!
//! Validating → (Reject | ClientRendered | CheckingInput) → (NeedsInput | Prompting) → Completed.

use tracing::{debug, instrument, warn};

use crate::config::LanguageRegistry;
use crate::detect::requires_input;
use crate::gateway::CompletionGateway;
use crate::prompt::simulation_prompt;
use crate::simulator::RequestError;
use crate::types::{Simulation, SimulationRequest};

/// Returned for markup and stylesheet languages, which the client previews itself
pub const LIVE_PREVIEW_MESSAGE: &str = "This language is displayed in live preview mode";

/// Returned with [`Simulation::NeedsInput`]
pub const NEEDS_INPUT_MESSAGE: &str = "This code requires user input";

/// Simulate a run of the request's code
#[instrument(skip_all, fields(language = %request.language, inputs = request.inputs.len()))]
pub async fn simulate(
    languages: &LanguageRegistry,
    gateway: &dyn CompletionGateway,
    request: &SimulationRequest,
) -> Result<Simulation, RequestError> {
    let language = languages
        .lookup(&request.language)
        .map_err(|_| RequestError::UnsupportedLanguage(request.language.clone()))?;

    if !language.supports_simulated_execution() {
        debug!(kind = %language.kind, "rendered by the client, skipping completion");
        return Ok(Simulation::Output(LIVE_PREVIEW_MESSAGE.to_owned()));
    }

    if request.inputs.is_empty() && requires_input(languages, &request.code, &language.key) {
        debug!("code reads input and none was provided");
        return Ok(Simulation::NeedsInput {
            message: NEEDS_INPUT_MESSAGE.to_owned(),
        });
    }

    let prompt = simulation_prompt(&request.code, &language.key, &request.inputs);

    let output = gateway.complete(&prompt).await.into_result().inspect_err(|failure| {
        warn!(kind = failure.kind().as_str(), %failure, "simulation failed");
    })?;

    debug!(output_len = output.len(), "simulation complete");
    Ok(Simulation::Output(output))
}
