use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the fat-burn band.
pub const FAT_BURN_FLOOR: f64 = 95.0;
/// Lower bound (inclusive) of the cardio band.
pub const CARDIO_FLOOR: f64 = 115.0;
/// Lower bound (inclusive) of the peak band.
pub const PEAK_FLOOR: f64 = 155.0;

/// Named physiological intensity band derived from heart rate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Zone {
    Resting,
    FatBurn,
    Cardio,
    Peak,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Resting, Zone::FatBurn, Zone::Cardio, Zone::Peak];

    /// Human readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Resting => "Resting",
            Zone::FatBurn => "Fat Burn",
            Zone::Cardio => "Cardio",
            Zone::Peak => "Peak",
        }
    }

    /// Half-open BPM band `[low, high)`; peak is unbounded above.
    pub fn band(&self) -> (f64, Option<f64>) {
        match self {
            Zone::Resting => (0.0, Some(FAT_BURN_FLOOR)),
            Zone::FatBurn => (FAT_BURN_FLOOR, Some(CARDIO_FLOOR)),
            Zone::Cardio => (CARDIO_FLOOR, Some(PEAK_FLOOR)),
            Zone::Peak => (PEAK_FLOOR, None),
        }
    }
}

/// Map a heart rate to its zone. Boundary values belong to the upper zone.
pub fn classify_zone(bpm: f64) -> Zone {
    if bpm < FAT_BURN_FLOOR {
        Zone::Resting
    } else if bpm < CARDIO_FLOOR {
        Zone::FatBurn
    } else if bpm < PEAK_FLOOR {
        Zone::Cardio
    } else {
        Zone::Peak
    }
}
