//! Runtime build state models.
//!
//! This module defines the structures for tracking a single build attempt
//! (a "run") and the artifacts its stages produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use ts_rs::TS;
use uuid::Uuid;

use crate::stage_models::{StageId, StageStatus};

/// A single file produced by the coder stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GeneratedFile {
    /// File name, unique within a run. Used as the selection key.
    pub name: String,

    /// Raw file contents.
    pub content: String,

    /// Kind of file as reported by the backend (html, css, javascript, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl GeneratedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            file_type: None,
        }
    }
}

/// Output of the deployer stage.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct Deployment {
    /// Live preview of the generated site, when the backend provides one.
    #[serde(default)]
    pub preview_url: Option<String>,

    /// Download location for the packaged site.
    #[serde(default)]
    pub download_url: Option<String>,

    /// Free-form deployment instructions returned by the backend.
    #[serde(default)]
    pub deployment_info: Option<Value>,
}

/// Data produced by one stage and consumed by a later one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Artifact {
    Analysis(Value),
    Plan(Value),
    Files(Vec<GeneratedFile>),
    TestResults(Value),
    Deployment(Deployment),
}

impl Artifact {
    /// The stage that produces this artifact.
    pub fn stage(&self) -> StageId {
        match self {
            Artifact::Analysis(_) => StageId::Thinker,
            Artifact::Plan(_) => StageId::Planner,
            Artifact::Files(_) => StageId::Coder,
            Artifact::TestResults(_) => StageId::Tester,
            Artifact::Deployment(_) => StageId::Deployer,
        }
    }
}

/// Everything accumulated by a run so far.
///
/// A field is only populated after the producing stage's backend call has
/// resolved successfully.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct Artifacts {
    pub analysis: Option<Value>,
    pub plan: Option<Value>,
    pub files: Vec<GeneratedFile>,
    pub test_results: Option<Value>,
    pub preview_url: Option<String>,
    pub download_url: Option<String>,
    pub deployment_info: Option<Value>,
}

/// Whole-run lifecycle status.
///
/// Normal progression: Idle -> Running -> Completed. A backend failure moves
/// the run to Failed, which is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Fresh run; nothing has started.
    #[default]
    Idle,
    /// Stages are executing.
    Running,
    /// Every stage completed.
    Completed,
    /// A stage failed and the remaining stages were abandoned.
    Failed,
}

/// State of a single build attempt.
///
/// A run is created when the user starts a build, mutated only by the
/// orchestrator as stages complete, and replaced wholesale on reset or on a
/// new build.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct PipelineRun {
    /// Unique identifier for this run.
    #[ts(type = "string")]
    pub id: Uuid,

    /// Generation counter used to discard results of superseded runs.
    pub generation: u64,

    /// The website idea submitted by the user.
    pub idea: String,

    /// API key forwarded to every stage call. Never serialized.
    #[serde(skip)]
    pub api_key: String,

    /// Whole-run status.
    pub status: RunStatus,

    /// Per-stage status, iterated in pipeline order.
    pub statuses: BTreeMap<StageId, StageStatus>,

    /// Stages in the order they completed.
    pub completed: Vec<StageId>,

    /// Accumulated stage outputs.
    pub artifacts: Artifacts,

    /// Overall progress, 0 to 100.
    pub progress: u8,

    /// Normalized failure message, if the run failed.
    pub error: Option<String>,

    /// Whether stages are currently executing.
    pub is_active: bool,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineRun {
    /// Status of a stage. Stages absent from the map are waiting.
    pub fn status_of(&self, stage: StageId) -> StageStatus {
        self.statuses.get(&stage).copied().unwrap_or_default()
    }

    /// The stage currently marked as working, if any.
    pub fn active_stage(&self) -> Option<StageId> {
        StageId::ALL
            .into_iter()
            .find(|stage| self.status_of(*stage) == StageStatus::Working)
    }

    /// Whether the given stage has completed in this run.
    pub fn is_completed(&self, stage: StageId) -> bool {
        self.status_of(stage) == StageStatus::Completed
    }
}
