use std::sync::LazyLock;

use counsel_core::models::scoring::InterpretationRange;

use super::{ScoreRange, ranges_from_totals};
use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items, each rated 0–3. Total 0–27; lower is better.
pub struct Phq9;

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn item_count(&self) -> u32 {
        9
    }

    fn item_range(&self) -> ScoreRange {
        ScoreRange {
            min: 0.0,
            max: 3.0,
            step: Some(1.0),
        }
    }

    fn interpretations(&self) -> &[InterpretationRange] {
        static RANGES: LazyLock<Vec<InterpretationRange>> = LazyLock::new(|| {
            ranges_from_totals(
                27.0,
                &[
                    (4.0, "Minimal", "0-4: minimal or no depressive symptoms"),
                    (9.0, "Mild", "5-9: mild depressive symptoms"),
                    (14.0, "Moderate", "10-14: moderate depressive symptoms"),
                    (19.0, "Moderately severe", "15-19: moderately severe depressive symptoms"),
                    (27.0, "Severe", "20-27: severe depressive symptoms"),
                ],
            )
        });
        &RANGES
    }
}
