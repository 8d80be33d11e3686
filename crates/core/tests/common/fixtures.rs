//! Test fixtures for creating orchestrators, sessions and sample data.

use sc_core::client::{BackendClient, MockBackend};
use sc_core::engine::PipelineOrchestrator;
use sc_core::session::Session;
use sc_protocol::config_models::{Settings, StageTimings};
use sc_protocol::ipc::{Event, Op};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const IDEA: &str = "portfolio site";
pub const API_KEY: &str = "k1";

/// Create an orchestrator over `backend` with the given timings.
///
/// The event channel is large enough to hold a full run without draining.
#[allow(dead_code)]
pub fn create_orchestrator(
    backend: MockBackend,
    timings: StageTimings,
) -> (PipelineOrchestrator, mpsc::Receiver<Event>) {
    let (events_tx, events_rx) = mpsc::channel(256);
    let backend: Arc<dyn BackendClient> = Arc::new(backend);
    (
        PipelineOrchestrator::new(backend, timings, events_tx),
        events_rx,
    )
}

/// Spawn a session with a stored API key and fast stage timings.
///
/// Returns the op sender and the event receiver.
#[allow(dead_code)]
pub fn spawn_session(backend: MockBackend) -> (mpsc::Sender<Op>, mpsc::Receiver<Event>) {
    let (events_tx, events_rx) = mpsc::channel(256);
    let (op_tx, op_rx) = mpsc::channel(32);
    let settings = Settings {
        api_key: Some(API_KEY.to_string()),
        ..Settings::default()
    };

    let session = Session::new(
        Arc::new(backend),
        StageTimings::uniform(10),
        settings,
        None,
        events_tx,
    );
    tokio::spawn(session.run(op_rx));

    (op_tx, events_rx)
}

/// Collect every event already sitting in the channel.
#[allow(dead_code)]
pub fn drain_events(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Receive events until one matches `done`, or panic after `timeout`.
#[allow(dead_code)]
pub async fn collect_until<F>(
    rx: &mut mpsc::Receiver<Event>,
    timeout: Duration,
    done: F,
) -> Vec<Event>
where
    F: Fn(&Event) -> bool,
{
    let mut events = Vec::new();
    let result = tokio::time::timeout(timeout, async {
        while let Some(event) = rx.recv().await {
            let finished = done(&event);
            events.push(event);
            if finished {
                return true;
            }
        }
        false
    })
    .await;

    assert!(
        matches!(result, Ok(true)),
        "Expected event did not arrive, got: {:?}",
        events
    );
    events
}
