//! Backend client abstraction.
//!
//! One operation per pipeline stage plus the two utility calls. The trait
//! is the seam between the orchestrator and the network: production code
//! uses [`http::HttpBackendClient`], tests and offline demos use
//! [`mock::MockBackend`].

pub mod error;
pub mod http;
pub mod mock;

use async_trait::async_trait;
use sc_protocol::api_models::{
    AnalyzeIdeaRequest, ExecuteCommandRequest, GenerateCodeRequest, PlanWebsiteRequest,
    PrepareDeploymentRequest, PushToGithubRequest, TestWebsiteRequest,
};
use sc_protocol::run_models::{Deployment, GeneratedFile};
use sc_protocol::stage_models::BackendOperation;
use serde_json::Value;
use std::collections::HashSet;

pub use error::{BackendError, BackendResult};
pub use http::HttpBackendClient;
pub use mock::MockBackend;

/// Check a coder response: at least one file, and no name used twice.
///
/// File names key the file selection, so they must be unique within a run.
pub fn validate_files(files: Vec<GeneratedFile>) -> BackendResult<Vec<GeneratedFile>> {
    let operation = BackendOperation::GenerateCode;
    if files.is_empty() {
        return Err(BackendError::missing_field(operation, "files"));
    }
    let mut seen = HashSet::new();
    if let Some(file) = files.iter().find(|file| !seen.insert(file.name.as_str())) {
        return Err(BackendError::duplicate_file(operation, &file.name));
    }
    Ok(files)
}

#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Thinker: idea -> analysis.
    async fn analyze_idea(&self, request: &AnalyzeIdeaRequest) -> BackendResult<Value>;

    /// Planner: idea + analysis -> plan.
    async fn plan_website(&self, request: &PlanWebsiteRequest) -> BackendResult<Value>;

    /// Coder: idea + plan -> files. An empty file list or a repeated file
    /// name is an error.
    async fn generate_code(&self, request: &GenerateCodeRequest)
        -> BackendResult<Vec<GeneratedFile>>;

    /// Tester: files -> test results.
    async fn test_website(&self, request: &TestWebsiteRequest) -> BackendResult<Value>;

    /// Deployer: files + test results -> deployment (preview URL optional).
    async fn prepare_deployment(
        &self,
        request: &PrepareDeploymentRequest,
    ) -> BackendResult<Deployment>;

    /// Run a terminal command, returning its output.
    async fn execute_command(&self, request: &ExecuteCommandRequest) -> BackendResult<String>;

    /// Push files to GitHub. Only success or failure is reported.
    async fn push_to_github(&self, request: &PushToGithubRequest) -> BackendResult<()>;
}
