use serde::{Deserialize, Serialize};
use ts_rs::TS;

use counsel_core::models::score::TimedScore;

/// Slope below which a series is improving. Lower clinical scores are better.
pub const IMPROVING_SLOPE: f64 = -0.5;

/// Slope above which a series is declining.
pub const DECLINING_SLOPE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

/// Ordinary least-squares slope of `values` against their indices `0..n`.
///
/// `None` for fewer than two values. With dense integer x values the
/// denominator `n·Σx² − (Σx)²` is positive for every n ≥ 2.
pub fn slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    Some((n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x))
}

/// Classify a chronological (oldest first) score series.
pub fn classify_trend(values: &[f64]) -> Trend {
    match slope(values) {
        None => Trend::InsufficientData,
        Some(s) if s < IMPROVING_SLOPE => Trend::Improving,
        Some(s) if s > DECLINING_SLOPE => Trend::Declining,
        Some(_) => Trend::Stable,
    }
}

/// Classify dated scores, ordering them chronologically first.
pub fn classify_series(points: &[TimedScore]) -> Trend {
    let mut ordered = points.to_vec();
    ordered.sort_by_key(|p| p.timestamp);
    let values: Vec<f64> = ordered.iter().map(|p| p.value).collect();
    classify_trend(&values)
}
