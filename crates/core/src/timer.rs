//! Stage timer and the simulated-work join combinator.
//!
//! Every stage is shown "working" for at least its configured duration,
//! even when the backend answers sooner. [`simulate_work`] waits for both
//! the timer and the real work and only then yields the work's output.

use sc_protocol::config_models::StageTimings;
use sc_protocol::stage_models::StageId;
use std::future::Future;
use std::time::Duration;

/// Fires a single completion signal after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimer {
    duration: Duration,
}

impl StageTimer {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Timer configured for the given stage.
    pub fn for_stage(stage: StageId, timings: &StageTimings) -> Self {
        Self::from_millis(timings.duration_ms(stage))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Resolves once the configured delay has passed.
    pub async fn elapsed(self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// Wait for both `timer` and `work`, then return the work's output.
///
/// Join semantics, not race: whichever side finishes first waits for the
/// other.
pub async fn simulate_work<F>(timer: StageTimer, work: F) -> F::Output
where
    F: Future,
{
    let ((), output) = tokio::join!(timer.elapsed(), work);
    output
}
