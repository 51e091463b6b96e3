use std::sync::LazyLock;

use counsel_core::models::scoring::InterpretationRange;

use super::{ScoreRange, ranges_from_totals};
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items, each rated 0–3. Total 0–21; lower is better.
pub struct Gad7;

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn item_count(&self) -> u32 {
        7
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
                21.0,
                &[
                    (4.0, "Minimal", "0-4: minimal anxiety"),
                    (9.0, "Mild", "5-9: mild anxiety"),
                    (14.0, "Moderate", "10-14: moderate anxiety"),
                    (21.0, "Severe", "15-21: severe anxiety"),
                ],
            )
        });
        &RANGES
    }
}
