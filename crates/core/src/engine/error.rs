//! Errors raised by the pipeline orchestrator.

use sc_protocol::stage_models::StageId;
use thiserror::Error;

/// A start request rejected before any network call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No API key is stored. Checked before the idea.
    #[error("API key is required to continue")]
    MissingApiKey,

    /// The idea is empty or only whitespace.
    #[error("Please enter a website idea to continue")]
    EmptyIdea,
}

impl ValidationError {
    /// Whether the UI should open the API key prompt.
    pub fn prompts_for_api_key(self) -> bool {
        matches!(self, ValidationError::MissingApiKey)
    }
}

/// Internal orchestrator failures.
///
/// These indicate a broken stage dependency, never bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// A stage was started before the artifact it consumes was produced.
    #[error("Stage {stage} requires {artifact}, which has not been produced")]
    MissingArtifact {
        stage: StageId,
        artifact: &'static str,
    },
}

/// Type alias for Result with OrchestratorError.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
