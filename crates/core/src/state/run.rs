//! Run state machine implementation.
//!
//! This module provides functions for managing the lifecycle of a
//! PipelineRun, including state transitions and event emission. Every
//! mutation of a run goes through here so the UI mirror stays in step.

use chrono::Utc;
use sc_protocol::ipc::Event;
use sc_protocol::run_models::{Artifact, PipelineRun, RunStatus};
use sc_protocol::stage_models::{StageId, StageStatus};
use std::collections::BTreeMap;
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Create a new PipelineRun with every stage waiting.
///
/// # Arguments
///
/// * `generation` - Generation counter value owning this run
/// * `idea` - The website idea submitted by the user
/// * `api_key` - Key forwarded to every stage call
pub fn create_run(generation: u64, idea: String, api_key: String) -> PipelineRun {
    let statuses: BTreeMap<StageId, StageStatus> = StageId::ALL
        .into_iter()
        .map(|stage| (stage, StageStatus::Waiting))
        .collect();

    PipelineRun {
        id: Uuid::new_v4(),
        generation,
        idea,
        api_key,
        status: RunStatus::Idle,
        statuses,
        completed: Vec::new(),
        artifacts: Default::default(),
        progress: 0,
        error: None,
        is_active: false,
        started_at: None,
        finished_at: None,
    }
}

/// A fresh run with no idea attached, shown after a reset or at startup.
pub fn idle_run(generation: u64) -> PipelineRun {
    create_run(generation, String::new(), String::new())
}

/// Transition the run to Running and emit event.
pub async fn start_run(run: &mut PipelineRun, events_tx: &Sender<Event>) {
    run.status = RunStatus::Running;
    run.is_active = true;
    run.started_at = Some(Utc::now());
    let _ = events_tx
        .send(Event::RunStarted {
            run_id: run.id,
            idea: run.idea.clone(),
        })
        .await;
}

/// Announce that `run` replaced the previous one after a reset.
pub async fn announce_reset(run: &PipelineRun, events_tx: &Sender<Event>) {
    let _ = events_tx.send(Event::RunReset { run_id: run.id }).await;
}

async fn set_stage_status(
    run: &mut PipelineRun,
    stage: StageId,
    status: StageStatus,
    events_tx: &Sender<Event>,
) {
    run.statuses.insert(stage, status);
    let _ = events_tx
        .send(Event::StageStatusUpdate {
            run_id: run.id,
            stage,
            status,
        })
        .await;
}

/// Mark a stage as working and emit event.
pub async fn mark_stage_working(run: &mut PipelineRun, stage: StageId, events_tx: &Sender<Event>) {
    set_stage_status(run, stage, StageStatus::Working, events_tx).await;
}

/// Merge a stage's output into the run's artifacts.
///
/// Files replace the previous list wholesale. A deployment fills the
/// preview and download locations only when the backend returned them.
pub fn merge_artifact(run: &mut PipelineRun, artifact: Artifact) {
    let artifacts = &mut run.artifacts;
    match artifact {
        Artifact::Analysis(value) => artifacts.analysis = Some(value),
        Artifact::Plan(value) => artifacts.plan = Some(value),
        Artifact::Files(files) => artifacts.files = files,
        Artifact::TestResults(value) => artifacts.test_results = Some(value),
        Artifact::Deployment(deployment) => {
            if deployment.preview_url.is_some() {
                artifacts.preview_url = deployment.preview_url;
            }
            if deployment.download_url.is_some() {
                artifacts.download_url = deployment.download_url;
            }
            artifacts.deployment_info = deployment.deployment_info;
        }
    }
}

/// Store a stage's output and emit event.
pub async fn store_artifact(run: &mut PipelineRun, artifact: Artifact, events_tx: &Sender<Event>) {
    merge_artifact(run, artifact.clone());
    let _ = events_tx
        .send(Event::ArtifactReady {
            run_id: run.id,
            artifact,
        })
        .await;
}

/// Mark a stage as completed, advance progress and emit events.
///
/// Progress only ever moves forward to the stage's fixed target.
pub async fn complete_stage(run: &mut PipelineRun, stage: StageId, events_tx: &Sender<Event>) {
    set_stage_status(run, stage, StageStatus::Completed, events_tx).await;
    if !run.completed.contains(&stage) {
        run.completed.push(stage);
    }
    run.progress = run.progress.max(stage.progress_target());
    let _ = events_tx
        .send(Event::ProgressUpdate {
            run_id: run.id,
            progress: run.progress,
        })
        .await;
}

/// Mark the run as completed and emit event.
pub async fn finish_run(run: &mut PipelineRun, events_tx: &Sender<Event>) {
    run.status = RunStatus::Completed;
    run.is_active = false;
    run.finished_at = Some(Utc::now());
    let _ = events_tx.send(Event::RunCompleted { run_id: run.id }).await;
}

/// Mark the run as failed at `stage` and emit events.
///
/// Later stages are left waiting; stages already completed stay completed.
///
/// # Arguments
///
/// * `run` - The run to fail
/// * `stage` - The stage whose work failed
/// * `error` - Normalized failure message shown to the user
/// * `events_tx` - Channel to send status and error events
pub async fn fail_run(
    run: &mut PipelineRun,
    stage: StageId,
    error: String,
    events_tx: &Sender<Event>,
) {
    set_stage_status(run, stage, StageStatus::Failed, events_tx).await;
    run.status = RunStatus::Failed;
    run.error = Some(error.clone());
    run.is_active = false;
    run.finished_at = Some(Utc::now());
    let _ = events_tx
        .send(Event::RunFailed {
            run_id: run.id,
            stage,
            error,
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_protocol::run_models::{Deployment, GeneratedFile};
    use serde_json::json;
    use tokio::sync::mpsc;

    fn new_run() -> PipelineRun {
        create_run(1, "portfolio site".to_string(), "k1".to_string())
    }

    #[test]
    fn test_create_run() {
        let run = new_run();
        assert_eq!(run.idea, "portfolio site");
        assert_eq!(run.status, RunStatus::Idle);
        assert_eq!(run.progress, 0);
        assert!(!run.is_active);
        assert!(run
            .statuses
            .values()
            .all(|status| *status == StageStatus::Waiting));
        assert_eq!(run.statuses.len(), 5);
    }

    #[tokio::test]
    async fn test_start_run() {
        let mut run = new_run();
        let (tx, mut rx) = mpsc::channel(10);

        start_run(&mut run, &tx).await;

        assert_eq!(run.status, RunStatus::Running);
        assert!(run.is_active);
        assert!(run.started_at.is_some());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::RunStarted { idea, .. } if idea == "portfolio site"));
    }

    #[tokio::test]
    async fn test_complete_stage_advances_progress() {
        let mut run = new_run();
        let (tx, mut rx) = mpsc::channel(10);

        complete_stage(&mut run, StageId::Thinker, &tx).await;

        assert_eq!(run.status_of(StageId::Thinker), StageStatus::Completed);
        assert_eq!(run.completed, vec![StageId::Thinker]);
        assert_eq!(run.progress, 20);

        // Should receive two events: StatusUpdate and Progress
        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            Event::StageStatusUpdate {
                stage: StageId::Thinker,
                status: StageStatus::Completed,
                ..
            }
        ));
        let event2 = rx.recv().await.unwrap();
        assert!(matches!(event2, Event::ProgressUpdate { progress: 20, .. }));
    }

    #[tokio::test]
    async fn test_progress_never_decreases() {
        let mut run = new_run();
        let (tx, _rx) = mpsc::channel(10);
        run.progress = 60;

        complete_stage(&mut run, StageId::Planner, &tx).await;

        assert_eq!(run.progress, 60);
    }

    #[test]
    fn test_merge_deployment_keeps_missing_preview_empty() {
        let mut run = new_run();

        merge_artifact(
            &mut run,
            Artifact::Deployment(Deployment {
                preview_url: None,
                download_url: Some("/api/download-website".to_string()),
                deployment_info: Some(json!({"deployment_summary": "ok"})),
            }),
        );

        assert_eq!(run.artifacts.preview_url, None);
        assert_eq!(
            run.artifacts.download_url.as_deref(),
            Some("/api/download-website")
        );
    }

    #[test]
    fn test_merge_files_replaces_list() {
        let mut run = new_run();
        run.artifacts.files = vec![GeneratedFile::new("old.html", "")];

        merge_artifact(
            &mut run,
            Artifact::Files(vec![
                GeneratedFile::new("index.html", "<html></html>"),
                GeneratedFile::new("style.css", "body {}"),
            ]),
        );

        let names: Vec<_> = run.artifacts.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["index.html", "style.css"]);
    }

    #[tokio::test]
    async fn test_finish_run() {
        let mut run = new_run();
        let (tx, mut rx) = mpsc::channel(10);
        start_run(&mut run, &tx).await;
        let _ = rx.recv().await;

        finish_run(&mut run, &tx).await;

        assert_eq!(run.status, RunStatus::Completed);
        assert!(!run.is_active);
        assert!(run.finished_at.is_some());
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::RunCompleted { .. }));
    }

    #[tokio::test]
    async fn test_fail_run() {
        let mut run = new_run();
        let (tx, mut rx) = mpsc::channel(10);
        start_run(&mut run, &tx).await;
        let _ = rx.recv().await;

        fail_run(&mut run, StageId::Coder, "Gemini API error".to_string(), &tx).await;

        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.status_of(StageId::Coder), StageStatus::Failed);
        assert_eq!(run.status_of(StageId::Tester), StageStatus::Waiting);
        assert_eq!(run.error.as_deref(), Some("Gemini API error"));
        assert!(!run.is_active);

        // Should receive two events: StatusUpdate and RunFailed
        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            Event::StageStatusUpdate {
                status: StageStatus::Failed,
                ..
            }
        ));
        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            Event::RunFailed { stage: StageId::Coder, error, .. } if error == "Gemini API error"
        ));
    }
}
