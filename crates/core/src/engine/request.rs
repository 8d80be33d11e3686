//! Per-stage backend requests built from the artifacts of earlier stages.

use crate::client::{BackendClient, BackendResult};
use crate::engine::error::{OrchestratorError, OrchestratorResult};
use sc_protocol::api_models::{
    AnalyzeIdeaRequest, GenerateCodeRequest, PlanWebsiteRequest, PrepareDeploymentRequest,
    TestWebsiteRequest,
};
use sc_protocol::run_models::{Artifact, PipelineRun};
use sc_protocol::stage_models::StageId;

/// The backend call a stage makes, with its inputs captured up front.
///
/// Inputs are cloned out of the run when the stage starts, so the spawned
/// work never borrows orchestrator state.
#[derive(Debug, Clone)]
pub enum StageRequest {
    AnalyzeIdea(AnalyzeIdeaRequest),
    PlanWebsite(PlanWebsiteRequest),
    GenerateCode(GenerateCodeRequest),
    TestWebsite(TestWebsiteRequest),
    PrepareDeployment(PrepareDeploymentRequest),
}

impl StageRequest {
    /// Build the request for `stage` from the run's accumulated artifacts.
    ///
    /// Fails with [`OrchestratorError::MissingArtifact`] if a prerequisite
    /// has not been produced yet.
    pub fn for_stage(stage: StageId, run: &PipelineRun) -> OrchestratorResult<Self> {
        let api_key = run.api_key.clone();
        let artifacts = &run.artifacts;
        let missing = |artifact| OrchestratorError::MissingArtifact { stage, artifact };

        let request = match stage {
            StageId::Thinker => StageRequest::AnalyzeIdea(AnalyzeIdeaRequest {
                idea: run.idea.clone(),
                api_key,
            }),
            StageId::Planner => StageRequest::PlanWebsite(PlanWebsiteRequest {
                idea: run.idea.clone(),
                analysis: artifacts.analysis.clone().ok_or_else(|| missing("analysis"))?,
                api_key,
            }),
            StageId::Coder => StageRequest::GenerateCode(GenerateCodeRequest {
                idea: run.idea.clone(),
                plan: artifacts.plan.clone().ok_or_else(|| missing("plan"))?,
                api_key,
            }),
            StageId::Tester => {
                if artifacts.files.is_empty() {
                    return Err(missing("files"));
                }
                StageRequest::TestWebsite(TestWebsiteRequest {
                    files: artifacts.files.clone(),
                    api_key,
                })
            }
            StageId::Deployer => {
                if artifacts.files.is_empty() {
                    return Err(missing("files"));
                }
                StageRequest::PrepareDeployment(PrepareDeploymentRequest {
                    files: artifacts.files.clone(),
                    test_results: artifacts
                        .test_results
                        .clone()
                        .ok_or_else(|| missing("test_results"))?,
                    api_key,
                })
            }
        };
        Ok(request)
    }

    /// Issue the call and wrap its output as the stage's artifact.
    pub async fn dispatch(self, backend: &dyn BackendClient) -> BackendResult<Artifact> {
        match self {
            StageRequest::AnalyzeIdea(req) => backend.analyze_idea(&req).await.map(Artifact::Analysis),
            StageRequest::PlanWebsite(req) => backend.plan_website(&req).await.map(Artifact::Plan),
            StageRequest::GenerateCode(req) => backend.generate_code(&req).await.map(Artifact::Files),
            StageRequest::TestWebsite(req) => {
                backend.test_website(&req).await.map(Artifact::TestResults)
            }
            StageRequest::PrepareDeployment(req) => backend
                .prepare_deployment(&req)
                .await
                .map(Artifact::Deployment),
        }
    }
}
