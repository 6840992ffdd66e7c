use thump::simulation::{MAX_HEART_RATE, MIN_HEART_RATE};
use thump::zone::Zone;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BPM_PADDING: f64 = 10.0;

/// Compute X (seconds, ending at 0) and Y (BPM) bounds for the live chart.
///
/// Y snaps outward to multiples of ten around the visible trace and never
/// leaves the physiological clamp range.
pub fn compute_chart_params(points: &[(f64, f64)], tick_secs: f64) -> ([f64; 2], [f64; 2]) {
    let earliest = points.first().map(|p| p.0).unwrap_or(0.0);
    let span = (-earliest).max(tick_secs).max(1.0);

    let lowest = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let highest = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let y_bounds = if lowest.is_finite() && highest.is_finite() {
        let low = ((lowest - BPM_PADDING) / 10.0).floor() * 10.0;
        let high = ((highest + BPM_PADDING) / 10.0).ceil() * 10.0;
        [low.max(MIN_HEART_RATE), high.min(MAX_HEART_RATE)]
    } else {
        [MIN_HEART_RATE, MAX_HEART_RATE]
    };

    ([-span, 0.0], y_bounds)
}

/// Horizontal guide lines at the edges of `zone` that fall inside `y_bounds`
pub fn zone_guides(zone: Zone, x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Vec<[(f64, f64); 2]> {
    let (low, high) = zone.band();
    [Some(low), high]
        .into_iter()
        .flatten()
        .filter(|bpm| *bpm > y_bounds[0] && *bpm < y_bounds[1])
        .map(|bpm| [(x_bounds[0], bpm), (x_bounds[1], bpm)])
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

/// Truncate to at most `max` terminal columns, marking the cut with an ellipsis
pub fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        let (x, y) = compute_chart_params(&[], 0.1);
        assert_eq!(x, [-1.0, 0.0]);
        assert_eq!(y, [MIN_HEART_RATE, MAX_HEART_RATE]);
    }

    #[test]
    fn test_compute_chart_params_snaps_to_tens() {
        let points = [(-14.9, 71.0), (-0.1, 133.0), (0.0, 134.5)];
        let (x, y) = compute_chart_params(&points, 0.1);
        assert_eq!(x, [-14.9, 0.0]);
        assert_eq!(y, [60.0, 150.0]);
    }

    #[test]
    fn test_compute_chart_params_clamps_to_range() {
        let points = [(-1.0, 50.0), (0.0, 200.0)];
        let (_, y) = compute_chart_params(&points, 0.1);
        assert_eq!(y, [MIN_HEART_RATE, MAX_HEART_RATE]);
    }

    #[test]
    fn test_zone_guides() {
        let guides = zone_guides(Zone::Cardio, [-15.0, 0.0], [60.0, 200.0]);
        assert_eq!(
            guides,
            vec![[(-15.0, 115.0), (0.0, 115.0)], [(-15.0, 155.0), (0.0, 155.0)]]
        );

        // peak has no upper edge and its floor is off-chart here
        assert!(zone_guides(Zone::Peak, [-15.0, 0.0], [60.0, 150.0]).is_empty());
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("Cardio", 10), "Cardio");
        assert_eq!(fit_width("Cardio Endurance", 8), "Cardio …");
        assert_eq!(fit_width("♥♥♥", 2), "♥…");
        assert_eq!(fit_width("anything", 0), "");
    }
}
