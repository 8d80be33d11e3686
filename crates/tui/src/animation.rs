//! Per-stage motion descriptors for the active stage card.

use sc_protocol::stage_models::StageId;
use std::time::Duration;

/// Easing curve of one animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOut,
}

/// How the working indicator of a stage moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationDescriptor {
    /// Spinner frames cycled once per `cycle`.
    pub keyframes: &'static [&'static str],
    pub cycle: Duration,
    pub easing: Easing,
}

impl AnimationDescriptor {
    /// Frame to show `elapsed` after the stage became active.
    pub fn frame_at(&self, elapsed: Duration) -> &'static str {
        let cycle_ms = self.cycle.as_millis().max(1);
        let t = (elapsed.as_millis() % cycle_ms) as f64 / cycle_ms as f64;
        let eased = match self.easing {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        };
        let len = self.keyframes.len();
        let index = ((eased * len as f64) as usize).min(len.saturating_sub(1));
        self.keyframes.get(index).copied().unwrap_or(" ")
    }
}

const THINKER_FRAMES: &[&str] = &["·  ", "·· ", "···", " ··", "  ·", "   "];
const PLANNER_FRAMES: &[&str] = &["▏", "▎", "▍", "▌", "▋", "▊", "▉", "█"];
const CODER_FRAMES: &[&str] = &["</>", "<_>", "< >", "<_>"];
const TESTER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const DEPLOYER_FRAMES: &[&str] = &["▁", "▃", "▅", "▇", "▅", "▃"];

/// Motion for the given stage while it is working.
pub fn descriptor(stage: StageId) -> AnimationDescriptor {
    match stage {
        StageId::Thinker => AnimationDescriptor {
            keyframes: THINKER_FRAMES,
            cycle: Duration::from_millis(3000),
            easing: Easing::EaseInOut,
        },
        StageId::Planner => AnimationDescriptor {
            keyframes: PLANNER_FRAMES,
            cycle: Duration::from_millis(2500),
            easing: Easing::EaseInOut,
        },
        StageId::Coder => AnimationDescriptor {
            keyframes: CODER_FRAMES,
            cycle: Duration::from_millis(1500),
            easing: Easing::Linear,
        },
        StageId::Tester => AnimationDescriptor {
            keyframes: TESTER_FRAMES,
            cycle: Duration::from_millis(2000),
            easing: Easing::EaseOut,
        },
        StageId::Deployer => AnimationDescriptor {
            keyframes: DEPLOYER_FRAMES,
            cycle: Duration::from_millis(2200),
            easing: Easing::EaseInOut,
        },
    }
}

/// Delay between redraws that keeps the spinner of `stage` moving.
pub fn frame_interval(stage: StageId) -> Duration {
    let descriptor = descriptor(stage);
    descriptor.cycle / descriptor.keyframes.len().max(1) as u32
}
