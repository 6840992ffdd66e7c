//! Heart-rate response model.
//!
//! The rate follows a first-order low-pass filter toward the target set by the
//! selected intensity. Climbing uses a shorter time constant than recovery, so
//! effort shows up faster than rest does. The step is exact for any `dt`, which
//! keeps trajectories independent of tick cadence.

use serde::Serialize;
use std::collections::VecDeque;

use crate::intensity::Intensity;
use crate::zone::{classify_zone, Zone};

pub const MIN_HEART_RATE: f64 = 50.0;
pub const MAX_HEART_RATE: f64 = 200.0;
pub const RESTING_HEART_RATE: f64 = 70.0;
/// Seconds to cover ~63% of the gap when climbing.
pub const EXERTION_TAU_SECS: f64 = 1.8;
/// Seconds to cover ~63% of the gap when falling.
pub const RECOVERY_TAU_SECS: f64 = 3.2;
pub const HISTORY_CAPACITY: usize = 150;

/// Bounded FIFO of recent heart-rate samples
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History {
    samples: VecDeque<f64>,
}

impl History {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append a sample, evicting the oldest once over capacity.
    pub fn push(&mut self, bpm: f64) {
        self.samples.push_back(bpm);
        while self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session simulated physiology
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    pub current_heart_rate: f64,
    pub target_heart_rate: f64,
    pub intensity: Intensity,
    pub zone: Zone,
    pub history: History,
    /// BPM per second over the last step. Diagnostic only.
    pub heart_rate_velocity: f64,
}

impl SimulationState {
    /// Seed a fresh state at rest
    pub fn new() -> Self {
        let mut history = History::new();
        history.push(RESTING_HEART_RATE);
        Self {
            current_heart_rate: RESTING_HEART_RATE,
            target_heart_rate: Intensity::Rest.target_bpm(),
            intensity: Intensity::Rest,
            zone: classify_zone(RESTING_HEART_RATE),
            history,
            heart_rate_velocity: 0.0,
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Time constant for the regime implied by target vs current rate
pub fn response_time(current: f64, target: f64) -> f64 {
    if target > current {
        EXERTION_TAU_SECS
    } else {
        RECOVERY_TAU_SECS
    }
}

/// Advance the state by `delta_ms` of elapsed time.
///
/// Non-positive (or NaN) deltas leave the state untouched. Very large deltas
/// saturate `alpha` at 1 and snap the rate onto the target. History is the
/// caller's concern.
pub fn advance(state: &mut SimulationState, delta_ms: f64) {
    let dt = delta_ms.max(0.0) / 1000.0;
    if dt == 0.0 {
        return;
    }

    let previous = state.current_heart_rate;
    let tau = response_time(previous, state.target_heart_rate);
    let alpha = 1.0 - (-dt / tau).exp();
    let interpolated = previous + (state.target_heart_rate - previous) * alpha;
    let next = interpolated.clamp(MIN_HEART_RATE, MAX_HEART_RATE);

    state.current_heart_rate = next;
    state.heart_rate_velocity = (next - previous) / dt;
    state.zone = classify_zone(next);
}
