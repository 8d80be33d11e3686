//! Request and response bodies for the backend `/api` surface.
//!
//! Every pipeline step is one JSON POST. Response fields are optional on
//! the wire so that a missing field can be reported as a backend error
//! instead of failing deserialization with an opaque message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::run_models::{Deployment, GeneratedFile};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct AnalyzeIdeaRequest {
    pub idea: String,
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct AnalyzeIdeaResponse {
    #[serde(default)]
    pub analysis: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PlanWebsiteRequest {
    pub idea: String,
    pub analysis: Value,
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct PlanWebsiteResponse {
    #[serde(default)]
    pub plan: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct GenerateCodeRequest {
    pub idea: String,
    pub plan: Value,
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct GenerateCodeResponse {
    #[serde(default)]
    pub files: Option<Vec<GeneratedFile>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct TestWebsiteRequest {
    pub files: Vec<GeneratedFile>,
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct TestWebsiteResponse {
    #[serde(default)]
    pub test_results: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PrepareDeploymentRequest {
    pub files: Vec<GeneratedFile>,
    pub test_results: Value,
    pub api_key: String,
}

/// The deployer response. Every field is optional; an empty object is a
/// successful deployment without a preview.
pub type PrepareDeploymentResponse = Deployment;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ExecuteCommandRequest {
    pub command: String,
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct ExecuteCommandResponse {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PushToGithubRequest {
    pub username: String,
    pub repo: String,
    pub token: String,
    pub files: Vec<GeneratedFile>,
}

/// Error body returned by the backend on a non-success status.
///
/// The client prefers `message`; FastAPI-style servers report `detail`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable message carried by the body, if any.
    pub fn into_message(self) -> Option<String> {
        if let Some(message) = self.message.filter(|m| !m.trim().is_empty()) {
            return Some(message);
        }
        match self.detail {
            Some(Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}
