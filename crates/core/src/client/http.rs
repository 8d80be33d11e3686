//! HTTP implementation of [`BackendClient`] on top of reqwest.

use crate::client::error::{BackendError, BackendResult};
use crate::client::{validate_files, BackendClient};
use async_trait::async_trait;
use sc_protocol::api_models::{
    AnalyzeIdeaRequest, AnalyzeIdeaResponse, ErrorBody, ExecuteCommandRequest,
    ExecuteCommandResponse, GenerateCodeRequest, GenerateCodeResponse, PlanWebsiteRequest,
    PlanWebsiteResponse, PrepareDeploymentRequest, PrepareDeploymentResponse, PushToGithubRequest,
    TestWebsiteRequest, TestWebsiteResponse,
};
use sc_protocol::config_models::ClientConfig;
use sc_protocol::run_models::{Deployment, GeneratedFile};
use sc_protocol::stage_models::BackendOperation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to the backend at `{backend_url}/api/<operation>`.
///
/// No retries. Without a configured timeout a hung call blocks its stage
/// indefinitely.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
    api_base: String,
}

impl HttpBackendClient {
    /// Create a client for the given backend origin, without a timeout.
    pub fn new(backend_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base(backend_url),
        }
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> BackendResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::new(None, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: api_base(&config.backend_url),
        })
    }

    /// Full URL of an operation.
    pub fn endpoint(&self, operation: BackendOperation) -> String {
        format!("{}/{}", self.api_base, operation.path())
    }

    /// POST `body` and return the response if its status is a success.
    async fn send<B>(&self, operation: BackendOperation, body: &B) -> BackendResult<reqwest::Response>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(operation);
        debug!(%operation, %url, "Sending backend request");

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            warn!(%operation, error = %e, "Backend request failed before a response");
            BackendError::fallback(operation, None)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| operation.fallback_message().to_string());

        warn!(%operation, status = status.as_u16(), %message, "Backend returned an error");
        Err(BackendError::new(Some(status.as_u16()), message))
    }

    /// POST `body` and decode the JSON response.
    async fn post<B, R>(&self, operation: BackendOperation, body: &B) -> BackendResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self.send(operation, body).await?;
        let status = response.status().as_u16();

        response.json::<R>().await.map_err(|e| {
            warn!(%operation, error = %e, "Backend response was not valid JSON");
            BackendError::new(
                Some(status),
                format!("Unexpected response from {operation}"),
            )
        })
    }
}

fn api_base(backend_url: &str) -> String {
    format!("{}/api", backend_url.trim_end_matches('/'))
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn analyze_idea(&self, request: &AnalyzeIdeaRequest) -> BackendResult<Value> {
        let operation = BackendOperation::AnalyzeIdea;
        let response: AnalyzeIdeaResponse = self.post(operation, request).await?;
        response
            .analysis
            .ok_or_else(|| BackendError::missing_field(operation, "analysis"))
    }

    async fn plan_website(&self, request: &PlanWebsiteRequest) -> BackendResult<Value> {
        let operation = BackendOperation::PlanWebsite;
        let response: PlanWebsiteResponse = self.post(operation, request).await?;
        response
            .plan
            .ok_or_else(|| BackendError::missing_field(operation, "plan"))
    }

    async fn generate_code(
        &self,
        request: &GenerateCodeRequest,
    ) -> BackendResult<Vec<GeneratedFile>> {
        let operation = BackendOperation::GenerateCode;
        let response: GenerateCodeResponse = self.post(operation, request).await?;
        validate_files(response.files.unwrap_or_default())
    }

    async fn test_website(&self, request: &TestWebsiteRequest) -> BackendResult<Value> {
        let operation = BackendOperation::TestWebsite;
        let response: TestWebsiteResponse = self.post(operation, request).await?;
        response
            .test_results
            .ok_or_else(|| BackendError::missing_field(operation, "test_results"))
    }

    async fn prepare_deployment(
        &self,
        request: &PrepareDeploymentRequest,
    ) -> BackendResult<Deployment> {
        let response: PrepareDeploymentResponse =
            self.post(BackendOperation::PrepareDeployment, request).await?;
        Ok(response)
    }

    async fn execute_command(&self, request: &ExecuteCommandRequest) -> BackendResult<String> {
        let operation = BackendOperation::ExecuteCommand;
        let response: ExecuteCommandResponse = self.post(operation, request).await?;
        response
            .output
            .ok_or_else(|| BackendError::missing_field(operation, "output"))
    }

    async fn push_to_github(&self, request: &PushToGithubRequest) -> BackendResult<()> {
        self.send(BackendOperation::PushToGithub, request).await?;
        Ok(())
    }
}
