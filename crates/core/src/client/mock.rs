//! Scriptable in-process backend for testing and offline demos.

use crate::client::error::{BackendError, BackendResult};
use crate::client::{validate_files, BackendClient};
use async_trait::async_trait;
use sc_protocol::api_models::{
    AnalyzeIdeaRequest, ExecuteCommandRequest, GenerateCodeRequest, PlanWebsiteRequest,
    PrepareDeploymentRequest, PushToGithubRequest, TestWebsiteRequest,
};
use sc_protocol::run_models::{Deployment, GeneratedFile};
use sc_protocol::stage_models::BackendOperation;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A backend that answers from canned data.
///
/// Each operation can be given a delay and/or a failure. Every call is
/// recorded (at the moment it is issued) so tests can assert which
/// operations ran.
#[derive(Clone, Default)]
pub struct MockBackend {
    delays: HashMap<BackendOperation, Duration>,
    failures: HashMap<BackendOperation, BackendError>,
    files: Option<Vec<GeneratedFile>>,
    preview_url: Option<String>,
    calls: Arc<Mutex<Vec<BackendOperation>>>,
}

impl MockBackend {
    /// A backend where every operation succeeds immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay the response of `operation`.
    pub fn with_delay(mut self, operation: BackendOperation, delay: Duration) -> Self {
        self.delays.insert(operation, delay);
        self
    }

    /// Make `operation` fail with the given error (after its delay).
    pub fn with_failure(mut self, operation: BackendOperation, error: BackendError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    /// Files returned by the coder stage.
    pub fn with_files(mut self, files: Vec<GeneratedFile>) -> Self {
        self.files = Some(files);
        self
    }

    /// Preview URL returned by the deployer stage.
    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    /// Operations issued so far, in call order.
    pub fn calls(&self) -> Vec<BackendOperation> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of times `operation` was issued.
    pub fn call_count(&self, operation: BackendOperation) -> usize {
        self.calls().into_iter().filter(|op| *op == operation).count()
    }

    async fn respond(&self, operation: BackendOperation) -> BackendResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(operation);
        }
        if let Some(delay) = self.delays.get(&operation) {
            tokio::time::sleep(*delay).await;
        }
        match self.failures.get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Files generated for an idea when no explicit files were scripted.
fn default_files(idea: &str) -> Vec<GeneratedFile> {
    vec![
        GeneratedFile {
            name: "index.html".to_string(),
            content: format!(
                "<!DOCTYPE html>\n<html>\n<head>\n  <title>{idea}</title>\n  <link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n  <h1>{idea}</h1>\n  <script src=\"script.js\"></script>\n</body>\n</html>\n"
            ),
            file_type: Some("html".to_string()),
        },
        GeneratedFile {
            name: "style.css".to_string(),
            content: "body {\n  font-family: sans-serif;\n  margin: 0 auto;\n  max-width: 960px;\n}\n"
                .to_string(),
            file_type: Some("css".to_string()),
        },
        GeneratedFile {
            name: "script.js".to_string(),
            content: "document.addEventListener('DOMContentLoaded', () => {});\n".to_string(),
            file_type: Some("javascript".to_string()),
        },
    ]
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn analyze_idea(&self, request: &AnalyzeIdeaRequest) -> BackendResult<Value> {
        self.respond(BackendOperation::AnalyzeIdea).await?;
        Ok(json!({
            "website_type": "portfolio",
            "target_audience": format!("Visitors interested in {}", request.idea),
            "key_features": ["Responsive layout", "Contact form"],
            "pages": ["Home", "About", "Contact"],
        }))
    }

    async fn plan_website(&self, _request: &PlanWebsiteRequest) -> BackendResult<Value> {
        self.respond(BackendOperation::PlanWebsite).await?;
        Ok(json!({
            "file_structure": {
                "directories": [],
                "files": [
                    {"name": "index.html", "description": "Landing page"},
                    {"name": "style.css", "description": "Styles"},
                    {"name": "script.js", "description": "Behavior"},
                ],
            },
            "implementation_steps": ["Step 1: Build the landing page"],
        }))
    }

    async fn generate_code(
        &self,
        request: &GenerateCodeRequest,
    ) -> BackendResult<Vec<GeneratedFile>> {
        self.respond(BackendOperation::GenerateCode).await?;
        let files = self
            .files
            .clone()
            .unwrap_or_else(|| default_files(&request.idea));
        validate_files(files)
    }

    async fn test_website(&self, request: &TestWebsiteRequest) -> BackendResult<Value> {
        self.respond(BackendOperation::TestWebsite).await?;
        let tests: Vec<Value> = request
            .files
            .iter()
            .map(|file| json!({"file": file.name, "issues": [], "recommendations": []}))
            .collect();
        Ok(json!({
            "test_summary": "All checks passed",
            "tests": tests,
            "performance_score": 92,
            "accessibility_score": 95,
            "best_practices_score": 90,
        }))
    }

    async fn prepare_deployment(
        &self,
        _request: &PrepareDeploymentRequest,
    ) -> BackendResult<Deployment> {
        self.respond(BackendOperation::PrepareDeployment).await?;
        Ok(Deployment {
            preview_url: self.preview_url.clone(),
            download_url: Some("/api/download-website".to_string()),
            deployment_info: Some(json!({
                "deployment_summary": "Ready for static hosting",
                "deployment_platforms": ["Netlify", "GitHub Pages"],
            })),
        })
    }

    async fn execute_command(&self, request: &ExecuteCommandRequest) -> BackendResult<String> {
        self.respond(BackendOperation::ExecuteCommand).await?;
        Ok(format!("$ {}\nok", request.command))
    }

    async fn push_to_github(&self, _request: &PushToGithubRequest) -> BackendResult<()> {
        self.respond(BackendOperation::PushToGithub).await
    }
}
