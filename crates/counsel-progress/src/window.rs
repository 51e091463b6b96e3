use jiff::{SignedDuration, Timestamp};

use counsel_core::models::score::{DateRange, TimedScore};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// "The last N days" relative to an explicit reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub end: Timestamp,
    pub days: u32,
}

impl TrendWindow {
    pub fn new(end: Timestamp, days: u32) -> Self {
        Self { end, days }
    }

    pub fn last_30_days(end: Timestamp) -> Self {
        Self::new(end, DEFAULT_WINDOW_DAYS)
    }

    pub fn start(&self) -> Timestamp {
        let span = SignedDuration::from_hours(i64::from(self.days) * 24);
        self.end.checked_sub(span).unwrap_or(Timestamp::MIN)
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start(),
            end: self.end,
        }
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.range().contains(timestamp)
    }

    /// Points inside the window, oldest first.
    pub fn filter(&self, points: &[TimedScore]) -> Vec<TimedScore> {
        let range = self.range();
        let mut inside: Vec<TimedScore> = points
            .iter()
            .filter(|p| range.contains(p.timestamp))
            .copied()
            .collect();
        inside.sort_by_key(|p| p.timestamp);
        inside
    }
}
