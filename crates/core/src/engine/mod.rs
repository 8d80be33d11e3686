//! Build pipeline orchestrator.
//!
//! The PipelineOrchestrator sequences the five stages of a build. Each stage
//! pairs a [`StageTimer`] with the stage's backend call; the stage completes
//! only when both have settled, and its output feeds the next stage.
//!
//! Stage work runs in spawned tasks that report back through an internal
//! channel tagged with the generation that started them. The orchestrator
//! bumps the generation on every start and reset, so results from a
//! superseded run are dropped instead of being merged.

pub mod error;
pub mod request;

use crate::client::{BackendClient, BackendResult};
use crate::state::run::{
    announce_reset, complete_stage, create_run, fail_run, finish_run, idle_run,
    mark_stage_working, start_run, store_artifact,
};
use crate::timer::{simulate_work, StageTimer};
use sc_protocol::config_models::StageTimings;
use sc_protocol::ipc::Event;
use sc_protocol::run_models::{Artifact, PipelineRun};
use sc_protocol::stage_models::{StageId, StageStatus};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub use error::{OrchestratorError, OrchestratorResult, ValidationError};
pub use request::StageRequest;

/// Result of one stage's joined timer and backend call.
#[derive(Debug)]
pub struct StageCompletion {
    /// Generation that was current when the stage started.
    pub generation: u64,
    pub stage: StageId,
    pub outcome: BackendResult<Artifact>,
}

/// What [`PipelineOrchestrator::handle_completion`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDisposition {
    /// The completion belonged to the current run and was merged.
    Applied,
    /// The completion was stale and was dropped.
    Discarded,
}

/// Owns the current run and drives its stages.
///
/// All mutation happens through `&mut self`, so a single task owns the
/// orchestrator and no locking is needed.
pub struct PipelineOrchestrator {
    backend: Arc<dyn BackendClient>,
    timings: StageTimings,
    run: PipelineRun,
    generation: u64,
    events_tx: mpsc::Sender<Event>,
    completions_tx: mpsc::UnboundedSender<StageCompletion>,
    completions_rx: mpsc::UnboundedReceiver<StageCompletion>,
}

impl PipelineOrchestrator {
    /// Create an orchestrator with an idle run.
    ///
    /// # Arguments
    ///
    /// * `backend` - Client used for every stage call
    /// * `timings` - Simulated working time per stage
    /// * `events_tx` - Channel for sending events to the UI
    pub fn new(
        backend: Arc<dyn BackendClient>,
        timings: StageTimings,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            timings,
            run: idle_run(0),
            generation: 0,
            events_tx,
            completions_tx,
            completions_rx,
        }
    }

    pub fn current_run(&self) -> &PipelineRun {
        &self.run
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate the request and start a new run at the first stage.
    ///
    /// The API key is checked before the idea. On rejection the current run
    /// is left untouched, no backend call is made and a `ValidationFailed`
    /// event is emitted. On success any previous run is discarded.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if `api_key` is empty, or `EmptyIdea` if the
    /// idea is blank.
    pub async fn start_build(&mut self, idea: &str, api_key: &str) -> Result<(), ValidationError> {
        if let Err(err) = validate(idea, api_key) {
            warn!(error = %err, "Build request rejected");
            let _ = self
                .events_tx
                .send(Event::ValidationFailed {
                    message: err.to_string(),
                    prompt_api_key: err.prompts_for_api_key(),
                })
                .await;
            return Err(err);
        }

        self.generation += 1;
        self.run = create_run(
            self.generation,
            idea.trim().to_string(),
            api_key.trim().to_string(),
        );
        info!(run_id = %self.run.id, generation = self.generation, "Starting build");
        start_run(&mut self.run, &self.events_tx).await;

        self.proceed_to(StageId::first()).await;
        Ok(())
    }

    /// Mark `stage` as working and start its timer and backend call.
    ///
    /// The stage's request is built from the run's artifacts before anything
    /// changes, so a missing prerequisite leaves the stage untouched.
    pub async fn advance_stage(&mut self, stage: StageId) -> OrchestratorResult<()> {
        let request = StageRequest::for_stage(stage, &self.run)?;

        mark_stage_working(&mut self.run, stage, &self.events_tx).await;
        info!(
            run_id = %self.run.id,
            %stage,
            operation = %stage.operation(),
            "Stage working"
        );

        let backend = Arc::clone(&self.backend);
        let timer = StageTimer::for_stage(stage, &self.timings);
        let completions_tx = self.completions_tx.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            let outcome = simulate_work(timer, request.dispatch(backend.as_ref())).await;
            let _ = completions_tx.send(StageCompletion {
                generation,
                stage,
                outcome,
            });
        });

        Ok(())
    }

    /// Replace the current run with a fresh idle one.
    ///
    /// In-flight stage work keeps running; its result is discarded when it
    /// arrives because the generation no longer matches.
    pub async fn reset(&mut self) {
        self.generation += 1;
        self.run = idle_run(self.generation);
        info!(run_id = %self.run.id, generation = self.generation, "Run reset");
        announce_reset(&self.run, &self.events_tx).await;
    }

    /// Wait for the next stage completion, stale or not.
    pub async fn next_completion(&mut self) -> Option<StageCompletion> {
        self.completions_rx.recv().await
    }

    /// Apply a stage completion to the current run.
    ///
    /// Completions from an older generation, or for a stage that is not
    /// currently working, are dropped without touching the run.
    pub async fn handle_completion(&mut self, completion: StageCompletion) -> CompletionDisposition {
        let StageCompletion {
            generation,
            stage,
            outcome,
        } = completion;

        if generation != self.generation || self.run.status_of(stage) != StageStatus::Working {
            debug!(
                %stage,
                generation,
                current_generation = self.generation,
                "Discarding stale stage result"
            );
            return CompletionDisposition::Discarded;
        }

        match outcome {
            Ok(artifact) => {
                store_artifact(&mut self.run, artifact, &self.events_tx).await;
                complete_stage(&mut self.run, stage, &self.events_tx).await;
                info!(run_id = %self.run.id, %stage, progress = self.run.progress, "Stage completed");

                match stage.next() {
                    Some(next) => self.proceed_to(next).await,
                    None => {
                        finish_run(&mut self.run, &self.events_tx).await;
                        info!(run_id = %self.run.id, "Build completed");
                    }
                }
            }
            Err(err) => {
                warn!(
                    run_id = %self.run.id,
                    %stage,
                    status = ?err.status,
                    error = %err,
                    "Stage failed"
                );
                fail_run(&mut self.run, stage, err.message, &self.events_tx).await;
            }
        }

        CompletionDisposition::Applied
    }

    /// Process completions until the current run stops being active.
    ///
    /// Used when nothing else needs to interleave with the pipeline, such as
    /// headless builds.
    pub async fn drive(&mut self) -> &PipelineRun {
        while self.run.is_active {
            match self.next_completion().await {
                Some(completion) => {
                    self.handle_completion(completion).await;
                }
                None => break,
            }
        }
        &self.run
    }

    async fn proceed_to(&mut self, stage: StageId) {
        if let Err(err) = self.advance_stage(stage).await {
            error!(run_id = %self.run.id, %stage, error = %err, "Stage dependency violated");
            fail_run(&mut self.run, stage, err.to_string(), &self.events_tx).await;
        }
    }
}

fn validate(idea: &str, api_key: &str) -> Result<(), ValidationError> {
    if api_key.trim().is_empty() {
        return Err(ValidationError::MissingApiKey);
    }
    if idea.trim().is_empty() {
        return Err(ValidationError::EmptyIdea);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BackendError, MockBackend};
    use sc_protocol::run_models::RunStatus;
    use sc_protocol::stage_models::BackendOperation;

    fn orchestrator(backend: MockBackend) -> (PipelineOrchestrator, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(256);
        let orchestrator =
            PipelineOrchestrator::new(Arc::new(backend), StageTimings::uniform(10), tx);
        (orchestrator, rx)
    }

    #[test]
    fn test_validate_checks_key_first() {
        assert_eq!(validate("", ""), Err(ValidationError::MissingApiKey));
        assert_eq!(validate("   ", "k1"), Err(ValidationError::EmptyIdea));
        assert_eq!(validate("portfolio site", "k1"), Ok(()));
    }

    #[tokio::test]
    async fn test_start_build_marks_first_stage_working() {
        let (mut orchestrator, _rx) = orchestrator(MockBackend::new());

        orchestrator.start_build("portfolio site", "k1").await.unwrap();

        let run = orchestrator.current_run();
        assert_eq!(run.status, RunStatus::Running);
        assert!(run.is_active);
        assert_eq!(run.active_stage(), Some(StageId::Thinker));
        assert_eq!(orchestrator.generation(), 1);
    }

    #[tokio::test]
    async fn test_rejected_build_emits_validation_event() {
        let backend = MockBackend::new();
        let (mut orchestrator, mut rx) = orchestrator(backend.clone());

        let err = orchestrator.start_build("portfolio site", "").await.unwrap_err();

        assert_eq!(err, ValidationError::MissingApiKey);
        assert_eq!(orchestrator.generation(), 0);
        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            Event::ValidationFailed {
                prompt_api_key: true,
                ..
            }
        ));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let (mut orchestrator, _rx) = orchestrator(MockBackend::new());
        orchestrator.start_build("portfolio site", "k1").await.unwrap();

        let stale = StageCompletion {
            generation: 0,
            stage: StageId::Thinker,
            outcome: Err(BackendError::fallback(BackendOperation::AnalyzeIdea, None)),
        };

        assert_eq!(
            orchestrator.handle_completion(stale).await,
            CompletionDisposition::Discarded
        );
        assert_eq!(orchestrator.current_run().status, RunStatus::Running);
        assert!(orchestrator.current_run().error.is_none());
    }

    #[tokio::test]
    async fn test_completion_for_idle_stage_is_discarded() {
        let (mut orchestrator, _rx) = orchestrator(MockBackend::new());
        orchestrator.start_build("portfolio site", "k1").await.unwrap();

        let unexpected = StageCompletion {
            generation: orchestrator.generation(),
            stage: StageId::Deployer,
            outcome: Ok(Artifact::Deployment(Default::default())),
        };

        assert_eq!(
            orchestrator.handle_completion(unexpected).await,
            CompletionDisposition::Discarded
        );
        assert_eq!(
            orchestrator.current_run().status_of(StageId::Deployer),
            StageStatus::Waiting
        );
    }

    #[tokio::test]
    async fn test_advance_without_prerequisite_fails() {
        let (mut orchestrator, _rx) = orchestrator(MockBackend::new());

        let err = orchestrator.advance_stage(StageId::Tester).await.unwrap_err();

        assert!(matches!(
            err,
            OrchestratorError::MissingArtifact {
                stage: StageId::Tester,
                artifact: "files"
            }
        ));
        assert_eq!(
            orchestrator.current_run().status_of(StageId::Tester),
            StageStatus::Waiting
        );
    }

    #[tokio::test]
    async fn test_drive_runs_to_completion() {
        let (mut orchestrator, _rx) = orchestrator(MockBackend::new());
        orchestrator.start_build("portfolio site", "k1").await.unwrap();

        let run = orchestrator.drive().await;

        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.progress, 100);
        assert_eq!(run.completed, StageId::ALL.to_vec());
    }
}
