use serde::{Deserialize, Serialize};

/// A request to simulate running some code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Source text
    pub code: String,

    /// Registry key of the language
    pub language: String,

    /// Values fed to the program, in order, as if typed at the terminal
    #[serde(default)]
    pub inputs: Vec<String>,
}

impl SimulationRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            inputs: Vec::new(),
        }
    }

    /// Set the input values
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Add one input value
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }
}

/// A request for a revised version of some code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Current source text
    pub code: String,

    /// Registry key of the language
    pub language: String,

    /// Free-text description of the change wanted
    pub instruction: String,
}

impl SuggestionRequest {
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            instruction: instruction.into(),
        }
    }
}

/// Successful result of a simulation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simulation {
    /// Terminal output, or an informational message for client-rendered languages
    Output(String),

    /// The code reads input and none was supplied; resubmit with inputs
    NeedsInput { message: String },
}

impl Simulation {
    #[must_use]
    pub fn needs_input(&self) -> bool {
        matches!(self, Simulation::NeedsInput { .. })
    }

    /// The output text, if this is an output
    pub fn output(&self) -> Option<&str> {
        match self {
            Simulation::Output(output) => Some(output),
            Simulation::NeedsInput { .. } => None,
        }
    }
}
