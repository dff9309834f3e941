//! Code suggestions
//!
//! No input detection here: a suggestion is an edit, not a run.

use tracing::{debug, instrument, warn};

use crate::config::LanguageRegistry;
use crate::gateway::CompletionGateway;
use crate::prompt::suggestion_prompt;
use crate::simulator::RequestError;
use crate::types::SuggestionRequest;

/// Ask the model for a revised version of the request's code
#[instrument(skip_all, fields(language = %request.language))]
pub async fn suggest(
    languages: &LanguageRegistry,
    gateway: &dyn CompletionGateway,
    request: &SuggestionRequest,
) -> Result<String, RequestError> {
    let language = languages
        .lookup(&request.language)
        .map_err(|_| RequestError::UnsupportedLanguage(request.language.clone()))?;

    let prompt = suggestion_prompt(&request.code, &language.key, &request.instruction);

    let text = gateway.complete(&prompt).await.into_result().inspect_err(|failure| {
        warn!(kind = failure.kind().as_str(), %failure, "suggestion failed");
    })?;

    let suggestion = strip_fences(&text);
    debug!(suggestion_len = suggestion.len(), "suggestion complete");
    Ok(suggestion)
}

/// Remove a Markdown fence wrapping the whole answer, if the model added one
///
/// Only the opening and closing fence lines go; any fence lines inside the
/// answer belong to the code and stay.
fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() < 6 || !(trimmed.starts_with("```") && trimmed.ends_with("```")) {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    match lines.as_slice() {
        [single] => single.trim_matches('`').trim().to_string(),
        [_open, inner @ .., close] if close.trim() == "```" => inner.join("\n").trim().to_string(),
        _ => trimmed.to_string(),
    }
}
