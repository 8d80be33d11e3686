//! Headless build: drive a session from the command line and print its events.

use colored::Colorize;
use sc_core::client::BackendClient;
use sc_core::config::models::AppConfig;
use sc_core::session::Session;
use sc_protocol::run_models::Artifact;
use sc_protocol::stage_models::StageStatus;
use sc_protocol::{Event, Op};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

/// Run one build to completion. Returns whether every stage completed.
///
/// `api_key` replaces the stored key for this run only.
pub async fn build(
    backend: Arc<dyn BackendClient>,
    config: AppConfig,
    idea: &str,
    api_key: Option<String>,
) -> bool {
    let AppConfig {
        client,
        mut settings,
    } = config;
    if let Some(key) = api_key {
        settings.api_key = Some(key);
    }

    let (op_tx, op_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::channel(100);
    let session = Session::new(backend, client.stages, settings, None, event_tx);
    let core = tokio::spawn(session.run(op_rx));

    let mut succeeded = false;
    if op_tx
        .send(Op::StartBuild {
            idea: idea.to_string(),
        })
        .await
        .is_ok()
    {
        while let Some(event) = event_rx.recv().await {
            match print_event(event) {
                Some(outcome) => {
                    succeeded = outcome;
                    break;
                }
                None => continue,
            }
        }
    }

    let _ = op_tx.send(Op::Shutdown).await;
    drop(event_rx);
    if let Err(e) = core.await {
        warn!(error = %e, "Session task ended abnormally");
    }
    succeeded
}

/// Print one event. Returns the build outcome once the build is over.
fn print_event(event: Event) -> Option<bool> {
    match event {
        Event::RunStarted { idea, .. } => {
            println!("{} {}", "Building".bold(), idea);
        }
        Event::StageStatusUpdate { stage, status, .. } => match status {
            StageStatus::Working => println!("{} {}", "→".cyan(), stage),
            StageStatus::Completed => println!("{} {}", "✓".green(), stage),
            StageStatus::Failed => println!("{} {}", "✗".red(), stage),
            StageStatus::Waiting => {}
        },
        Event::ProgressUpdate { progress, .. } => {
            println!("  {}", format!("{progress}%").dimmed());
        }
        Event::ArtifactReady { artifact, .. } => print_artifact(&artifact),
        Event::RunCompleted { .. } => {
            println!("{}", "Website ready".green().bold());
            return Some(true);
        }
        Event::RunFailed { stage, error, .. } => {
            eprintln!("{} {stage}: {error}", "Build failed at".red().bold());
            return Some(false);
        }
        Event::ValidationFailed { message, .. } => {
            eprintln!("{} {message}", "error:".red().bold());
            return Some(false);
        }
        _ => {}
    }
    None
}

fn print_artifact(artifact: &Artifact) {
    match artifact {
        Artifact::Files(files) => {
            for file in files {
                println!("  {} ({} bytes)", file.name, file.content.len());
            }
        }
        Artifact::Deployment(deployment) => {
            if let Some(url) = &deployment.preview_url {
                println!("  {} {url}", "preview:".bold());
            }
            if let Some(url) = &deployment.download_url {
                println!("  {} {url}", "download:".bold());
            }
        }
        Artifact::Analysis(_) | Artifact::Plan(_) | Artifact::TestResults(_) => {}
    }
}
