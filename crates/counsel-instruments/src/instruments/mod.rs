use serde::{Deserialize, Serialize};
use ts_rs::TS;

use counsel_core::models::scoring::InterpretationRange;

pub mod gad7;
pub mod phq9;

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// `total` as a percentage of `max_total`.
pub(crate) fn percent(total: f64, max_total: f64) -> f64 {
    total / max_total * 100.0
}

/// Build percentage ranges from published raw-total cutoffs.
///
/// `cutoffs` are `(highest total in band, label, description)`, ascending;
/// the last cutoff must equal `max_total`.
pub(crate) fn ranges_from_totals(
    max_total: f64,
    cutoffs: &[(f64, &str, &str)],
) -> Vec<InterpretationRange> {
    cutoffs
        .iter()
        .map(|(upper, label, description)| {
            InterpretationRange::new(percent(*upper, max_total), *label, *description)
        })
        .collect()
}
