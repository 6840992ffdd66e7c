use crate::simulation::History;

pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;
    Some(variance.sqrt())
}

/// Shape of the recent heart-rate trace, shown on the results screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRateSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub fn summarize(history: &History) -> Option<HeartRateSummary> {
    let samples = history.to_vec();
    let mean = mean(&samples)?;
    let std_dev = std_dev(&samples)?;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(HeartRateSummary {
        mean,
        std_dev,
        min,
        max,
    })
}

/// Format seconds as `m:ss`
pub fn format_clock(secs: f64) -> String {
    let whole = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
