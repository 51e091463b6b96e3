use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A dated numeric observation: a clinical score, or an event count of 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimedScore {
    pub timestamp: jiff::Timestamp,
    pub value: f64,
}

impl TimedScore {
    pub fn new(timestamp: jiff::Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// A single occurrence of an event (session held, task completed).
    pub fn event(timestamp: jiff::Timestamp) -> Self {
        Self::new(timestamp, 1.0)
    }
}

/// Inclusive timestamp range used when fetching score series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    pub start: jiff::Timestamp,
    pub end: jiff::Timestamp,
}

impl DateRange {
    pub fn contains(&self, timestamp: jiff::Timestamp) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}
