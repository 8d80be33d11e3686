//! Build stage models.
//!
//! This module defines the five ordered stages of a website build, the
//! status each stage can be in, and the backend operations they trigger.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// One of the five ordered pipeline stages.
///
/// Each stage is presented to the user as an "agent" working on the build.
/// Ordering is significant: a stage may only start once every stage before
/// it has completed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    /// Analyzes the idea and determines website requirements.
    Thinker,
    /// Turns the analysis into a file structure and implementation plan.
    Planner,
    /// Generates the website files from the plan.
    Coder,
    /// Reviews the generated files and produces test results.
    Tester,
    /// Prepares the tested files for deployment.
    Deployer,
}

impl StageId {
    /// All stages in execution order.
    pub const ALL: [StageId; 5] = [
        StageId::Thinker,
        StageId::Planner,
        StageId::Coder,
        StageId::Tester,
        StageId::Deployer,
    ];

    /// Zero-based position of this stage in the pipeline.
    pub fn ordinal(self) -> usize {
        match self {
            StageId::Thinker => 0,
            StageId::Planner => 1,
            StageId::Coder => 2,
            StageId::Tester => 3,
            StageId::Deployer => 4,
        }
    }

    /// The first stage of every build.
    pub fn first() -> Self {
        StageId::Thinker
    }

    /// The stage that runs after this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.ordinal() + 1).copied()
    }

    /// Overall progress percentage reached once this stage completes.
    ///
    /// Progress is stepped in fixed increments: 20, 40, 60, 80, 100.
    pub fn progress_target(self) -> u8 {
        (self.ordinal() as u8 + 1) * 20
    }

    /// Default simulated working time in milliseconds.
    pub fn default_duration_ms(self) -> u64 {
        match self {
            StageId::Coder => 5000,
            _ => 3000,
        }
    }

    /// Backend operation this stage issues while it is working.
    pub fn operation(self) -> BackendOperation {
        match self {
            StageId::Thinker => BackendOperation::AnalyzeIdea,
            StageId::Planner => BackendOperation::PlanWebsite,
            StageId::Coder => BackendOperation::GenerateCode,
            StageId::Tester => BackendOperation::TestWebsite,
            StageId::Deployer => BackendOperation::PrepareDeployment,
        }
    }

    /// Lowercase identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            StageId::Thinker => "thinker",
            StageId::Planner => "planner",
            StageId::Coder => "coder",
            StageId::Tester => "tester",
            StageId::Deployer => "deployer",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a single stage within a run.
///
/// During an active build exactly one stage is `Working`; stages before it
/// are `Completed` and stages after it are `Waiting`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    /// The stage has not started yet.
    #[default]
    Waiting,

    /// The stage timer and backend call are in flight.
    Working,

    /// Both the timer and the backend call finished successfully.
    Completed,

    /// The backend call failed; the whole run is terminal.
    Failed,
}

/// A backend endpoint under the `/api` base path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "kebab-case")]
pub enum BackendOperation {
    AnalyzeIdea,
    PlanWebsite,
    GenerateCode,
    TestWebsite,
    PrepareDeployment,
    ExecuteCommand,
    PushToGithub,
}

impl BackendOperation {
    /// Path segment appended to `/api/`.
    pub fn path(self) -> &'static str {
        match self {
            BackendOperation::AnalyzeIdea => "analyze-idea",
            BackendOperation::PlanWebsite => "plan-website",
            BackendOperation::GenerateCode => "generate-code",
            BackendOperation::TestWebsite => "test-website",
            BackendOperation::PrepareDeployment => "prepare-deployment",
            BackendOperation::ExecuteCommand => "execute-command",
            BackendOperation::PushToGithub => "push-to-github",
        }
    }

    /// Message shown when a failed response carries no message of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            BackendOperation::ExecuteCommand => "Command execution failed",
            BackendOperation::PushToGithub => "Failed to push to GitHub",
            _ => "An error occurred during the build process",
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
