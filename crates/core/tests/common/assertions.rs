//! Custom assertion helpers for integration tests.

#![allow(dead_code)]

use sc_protocol::ipc::Event;
use sc_protocol::run_models::PipelineRun;
use sc_protocol::stage_models::{StageId, StageStatus};

/// Assert the statuses of a run after `completed` stages have finished.
///
/// Stages 1..=completed are COMPLETED, the next one is WORKING and the rest
/// are WAITING.
pub fn assert_statuses_after(run: &PipelineRun, completed: usize) {
    for stage in StageId::ALL {
        let expected = match stage.ordinal() {
            i if i < completed => StageStatus::Completed,
            i if i == completed => StageStatus::Working,
            _ => StageStatus::Waiting,
        };
        assert_eq!(
            run.status_of(stage),
            expected,
            "Unexpected status for {} after {} completed stages",
            stage,
            completed
        );
    }
}

/// Progress values in the order they were reported.
pub fn progress_updates(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::ProgressUpdate { progress, .. } => Some(*progress),
            _ => None,
        })
        .collect()
}

/// Stages reported as working, in order.
pub fn working_stages(events: &[Event]) -> Vec<StageId> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StageStatusUpdate {
                stage,
                status: StageStatus::Working,
                ..
            } => Some(*stage),
            _ => None,
        })
        .collect()
}

/// Assert that a sequence of events starts a run and ends in a terminal event.
pub fn assert_event_sequence(events: &[Event]) {
    assert!(!events.is_empty(), "Event sequence is empty");

    assert!(
        matches!(events[0], Event::RunStarted { .. }),
        "First event should be RunStarted, got: {:?}",
        events[0]
    );

    let last = &events[events.len() - 1];
    assert!(
        matches!(last, Event::RunCompleted { .. } | Event::RunFailed { .. }),
        "Last event should be RunCompleted or RunFailed, got: {:?}",
        last
    );
}
