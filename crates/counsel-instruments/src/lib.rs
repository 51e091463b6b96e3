//! counsel-instruments
//!
//! Assessment definition validation and standardized instrument
//! definitions. Pure functions over `counsel-core` types — no I/O, no
//! shared state, safe to call from any number of request tasks.

pub mod error;
pub mod instruments;
pub mod questions;
pub mod ranges;
pub mod scoring;

use counsel_core::models::scoring::InterpretationRange;

use error::InstrumentError;
use instruments::ScoreRange;
use ranges::ScoreBand;

/// Trait implemented by each standardized questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier (e.g., "phq9"). Also used as the score series category.
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    fn item_count(&self) -> u32;

    /// Valid answer values for a single item.
    fn item_range(&self) -> ScoreRange;

    /// Severity bands as percentages of the maximum total.
    fn interpretations(&self) -> &[InterpretationRange];

    /// Valid range for the summed total.
    fn total_range(&self) -> ScoreRange {
        let item = self.item_range();
        let count = f64::from(self.item_count());
        ScoreRange {
            min: item.min * count,
            max: item.max * count,
            step: item.step,
        }
    }

    /// Express a raw total as a percentage of the maximum total.
    fn percent_of_max(&self, total: f64) -> Result<f64, InstrumentError> {
        let range = self.total_range();
        if !range.contains(total) {
            return Err(InstrumentError::TotalOutOfRange {
                instrument_id: self.id().to_string(),
                total,
                min: range.min,
                max: range.max,
            });
        }
        Ok(instruments::percent(total, range.max))
    }

    /// Severity band for a raw total.
    fn severity(&self, total: f64) -> Result<ScoreBand, InstrumentError> {
        let percent = self.percent_of_max(total)?;
        let bands = ranges::partition(self.interpretations(), self.id())?;
        ranges::interpret(&bands, percent)
            .cloned()
            .ok_or_else(|| InstrumentError::TotalOutOfRange {
                instrument_id: self.id().to_string(),
                total,
                min: self.total_range().min,
                max: self.total_range().max,
            })
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
