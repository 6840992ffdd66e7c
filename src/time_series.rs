use crate::simulation::History;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub bpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, bpm: f64) -> Self {
        Self { t, bpm }
    }
}

impl From<(f64, f64)> for TimeSeriesPoint {
    fn from(v: (f64, f64)) -> Self {
        TimeSeriesPoint { t: v.0, bpm: v.1 }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.bpm)
    }
}

/// Lay history samples out on a time axis ending at 0 (now), one sample per
/// tick interval, so the chart scrolls left as samples age.
pub fn history_points(history: &History, tick_secs: f64) -> Vec<TimeSeriesPoint> {
    let n = history.len();
    history
        .iter()
        .enumerate()
        .map(|(i, bpm)| TimeSeriesPoint::new(-((n - 1 - i) as f64) * tick_secs, bpm))
        .collect()
}
