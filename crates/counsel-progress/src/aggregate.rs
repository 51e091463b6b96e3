use std::collections::BTreeMap;

use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use counsel_core::models::score::TimedScore;

/// Summed value for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyValue {
    /// `YYYY-MM-DD`
    pub date: String,
    pub value: f64,
}

/// Two independently recorded metrics for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyActivity {
    pub date: String,
    pub count_a: f64,
    pub count_b: f64,
}

/// UTC calendar-day key. Fixed width, so string order is date order.
pub fn day_key(timestamp: jiff::Timestamp) -> String {
    timestamp.to_zoned(TimeZone::UTC).date().to_string()
}

/// Sum values per day, ascending by day.
pub fn aggregate_by_day(points: &[TimedScore]) -> Vec<DailyValue> {
    sum_by_day(points)
        .into_iter()
        .map(|(date, value)| DailyValue { date, value })
        .collect()
}

/// Per-day totals of two metrics over the union of their days.
///
/// A day missing from one input gets 0 for that metric; nothing is
/// interpolated or carried forward.
pub fn merge_by_day(a: &[TimedScore], b: &[TimedScore]) -> Vec<DailyActivity> {
    let mut days: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for (date, value) in sum_by_day(a) {
        days.entry(date).or_default().0 = value;
    }
    for (date, value) in sum_by_day(b) {
        days.entry(date).or_default().1 = value;
    }

    days.into_iter()
        .map(|(date, (count_a, count_b))| DailyActivity {
            date,
            count_a,
            count_b,
        })
        .collect()
}

fn sum_by_day(points: &[TimedScore]) -> BTreeMap<String, f64> {
    let mut days = BTreeMap::new();
    for point in points {
        *days.entry(day_key(point.timestamp)).or_insert(0.0) += point.value;
    }
    days
}
