//! Inter-process communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the UI (user interface) and the Core (build orchestration).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: user intents sent from UI to Core
//! - `Event`: state changes sent from Core to UI
//!
//! The UI never mutates build state itself; it mirrors the run by applying
//! events in order and renders a projection of that mirror.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::config_models::Locale;
use crate::run_models::Artifact;
use crate::stage_models::{StageId, StageStatus};
use crate::terminal_models::TerminalEntry;

/// Operations sent from the UI to the Core.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "startBuild",
///   "payload": { "idea": "portfolio site" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Start a new build with the stored API key.
    ///
    /// Any previous run is discarded.
    StartBuild { idea: String },

    /// Replace the current run with a fresh, waiting one.
    Reset,

    /// Store a new API key and persist it.
    SetApiKey { api_key: String },

    /// Switch the interface language and persist it.
    SetLocale { locale: Locale },

    /// Run a command through the backend terminal.
    ExecuteCommand { command: String },

    /// Clear the terminal transcript.
    ClearTerminal,

    /// Push the current run's files to a GitHub repository.
    PushToGithub {
        username: String,
        repo: String,
        token: String,
    },

    /// Shut down the core gracefully.
    Shutdown,
}

/// Events sent from the Core to the UI.
///
/// ```json
/// {
///   "type": "stageStatusUpdate",
///   "payload": { "run_id": "uuid-here", "stage": "coder", "status": "WORKING" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new run has started; every stage is waiting.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        idea: String,
    },

    /// The current run was replaced by a fresh, idle one.
    RunReset {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// A stage changed status.
    StageStatusUpdate {
        #[ts(type = "string")]
        run_id: Uuid,
        stage: StageId,
        status: StageStatus,
    },

    /// Overall progress moved forward.
    ProgressUpdate {
        #[ts(type = "string")]
        run_id: Uuid,
        progress: u8,
    },

    /// A stage produced its output.
    ArtifactReady {
        #[ts(type = "string")]
        run_id: Uuid,
        artifact: Artifact,
    },

    /// Every stage completed.
    RunCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// A stage failed and the run was abandoned.
    RunFailed {
        #[ts(type = "string")]
        run_id: Uuid,
        stage: StageId,
        error: String,
    },

    /// A start request was rejected before any network call.
    ValidationFailed {
        message: String,
        /// The UI should prompt for an API key.
        prompt_api_key: bool,
    },

    /// The stored API key changed.
    ApiKeyUpdated { has_key: bool },

    /// The interface language changed.
    LocaleChanged { locale: Locale },

    /// A line was appended to the terminal transcript.
    TerminalEntryAppended { entry: TerminalEntry },

    /// The terminal transcript was cleared.
    TerminalCleared,

    /// Files were pushed to GitHub.
    GithubPushSucceeded { repo: String },

    /// A GitHub push was rejected or failed.
    GithubPushFailed { message: String },
}
