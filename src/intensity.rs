use serde::{Deserialize, Serialize};

use crate::simulation::SimulationState;

/// Discrete user-selected exertion level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Intensity {
    Rest,
    Jog,
    Sprint,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Rest, Intensity::Jog, Intensity::Sprint];

    /// Steady-state heart rate this intensity converges toward
    pub fn target_bpm(&self) -> f64 {
        match self {
            Intensity::Rest => 70.0,
            Intensity::Jog => 135.0,
            Intensity::Sprint => 175.0,
        }
    }

    /// Parse a requested intensity token. Unknown or empty tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "rest" => Some(Intensity::Rest),
            "jog" => Some(Intensity::Jog),
            "sprint" => Some(Intensity::Sprint),
            _ => None,
        }
    }
}

/// Apply a requested intensity to the state.
///
/// Unrecognized tokens leave intensity and target untouched. Zone and heart
/// rate are never touched here; they follow on the next `advance`.
pub fn select_intensity(state: &mut SimulationState, requested: &str) {
    if let Some(intensity) = Intensity::parse(requested) {
        state.intensity = intensity;
        state.target_heart_rate = intensity.target_bpm();
    }
}
