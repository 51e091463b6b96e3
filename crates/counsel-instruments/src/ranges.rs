//! Interpretation range coverage.
//!
//! Authors describe a scoring scale as a list of labeled upper bounds. Each
//! bound closes the half-open interval `(previous bound, bound]`; the lowest
//! interval also contains 0. A valid list therefore needs a first bound above
//! 0, a last bound of exactly 100, and strictly increasing bounds in between.
//! Ties or decreases are the only way a gap or overlap can appear.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use counsel_core::models::scoring::InterpretationRange;

use crate::error::ValidationError;

/// Subject label used for the overall (cross-category) ranges.
pub const OVERALL: &str = "overall";

const AXIS_MAX: f64 = 100.0;

/// Check that `ranges` partition `[0, 100]` without gaps or overlaps.
///
/// Input order does not matter. Errors carry `subject` so callers can name
/// the offending category.
pub fn validate_ranges(ranges: &[InterpretationRange], subject: &str) -> Result<(), ValidationError> {
    sorted_ranges(ranges, subject).map(|_| ())
}

/// A materialized interval of the percentage axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoreBand {
    pub min_percent: f64,
    pub max_percent: f64,
    /// Only the lowest band includes its lower bound (0).
    pub includes_min: bool,
    pub label: String,
    pub description: String,
}

impl ScoreBand {
    pub fn contains(&self, percent: f64) -> bool {
        let above_min = if self.includes_min {
            percent >= self.min_percent
        } else {
            percent > self.min_percent
        };
        above_min && percent <= self.max_percent
    }
}

/// Validate `ranges` and return them as explicit ascending bands.
pub fn partition(
    ranges: &[InterpretationRange],
    subject: &str,
) -> Result<Vec<ScoreBand>, ValidationError> {
    let sorted = sorted_ranges(ranges, subject)?;

    let mut bands = Vec::with_capacity(sorted.len());
    let mut lower = 0.0;
    for (i, range) in sorted.into_iter().enumerate() {
        bands.push(ScoreBand {
            min_percent: lower,
            max_percent: range.max_percent,
            includes_min: i == 0,
            label: range.label.clone(),
            description: range.description.clone(),
        });
        lower = range.max_percent;
    }
    Ok(bands)
}

/// The band containing `percent`, or `None` outside `[0, 100]`.
pub fn interpret(bands: &[ScoreBand], percent: f64) -> Option<&ScoreBand> {
    bands.iter().find(|band| band.contains(percent))
}

fn sorted_ranges<'a>(
    ranges: &'a [InterpretationRange],
    subject: &str,
) -> Result<Vec<&'a InterpretationRange>, ValidationError> {
    let mut sorted: Vec<&InterpretationRange> = ranges.iter().collect();
    sorted.sort_by(|a, b| a.max_percent.total_cmp(&b.max_percent));

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Err(ValidationError::coverage(
            subject,
            "at least one interpretation range is required",
        ));
    };

    // Negated so NaN is rejected too.
    if !(first.max_percent > 0.0) {
        return Err(ValidationError::coverage(
            subject,
            format!(
                "lowest range must end above 0% (got {}%)",
                first.max_percent
            ),
        ));
    }

    if last.max_percent != AXIS_MAX {
        return Err(ValidationError::coverage(
            subject,
            format!("highest range must end at 100% (got {}%)", last.max_percent),
        ));
    }

    for pair in sorted.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if curr.max_percent <= prev.max_percent {
            return Err(ValidationError::coverage(
                subject,
                format!(
                    "ranges '{}' and '{}' share the upper bound {}%",
                    prev.label, curr.label, curr.max_percent
                ),
            ));
        }
    }

    if let Some(blank) = sorted
        .iter()
        .find(|r| r.label.trim().is_empty() || r.description.trim().is_empty())
    {
        return Err(ValidationError::coverage(
            subject,
            format!(
                "range ending at {}% needs a label and a description",
                blank.max_percent
            ),
        ));
    }

    Ok(sorted)
}
