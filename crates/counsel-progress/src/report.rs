use serde::{Deserialize, Serialize};
use ts_rs::TS;

use counsel_core::models::score::TimedScore;
use counsel_instruments::Instrument;

use crate::aggregate::{DailyActivity, merge_by_day};
use crate::trend::{Trend, classify_trend};
use crate::window::TrendWindow;

/// One instrument's scores inside the window and their direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SeriesProgress {
    pub instrument_id: String,
    pub name: String,
    /// Oldest first.
    pub points: Vec<TimedScore>,
    pub trend: Trend,
    pub latest: Option<f64>,
    /// `None` when there is no score or the latest total is off the scale.
    pub latest_severity: Option<String>,
}

impl SeriesProgress {
    pub fn from_points(
        instrument: &dyn Instrument,
        points: &[TimedScore],
        window: &TrendWindow,
    ) -> Self {
        let points = window.filter(points);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let latest = values.last().copied();
        let latest_severity = latest
            .and_then(|total| instrument.severity(total).ok())
            .map(|band| band.label);

        Self {
            instrument_id: instrument.id().to_string(),
            name: instrument.name().to_string(),
            trend: classify_trend(&values),
            points,
            latest,
            latest_severity,
        }
    }
}

/// Everything the progress dashboard shows for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProgressReport {
    pub window_start: jiff::Timestamp,
    pub window_end: jiff::Timestamp,
    pub series: Vec<SeriesProgress>,
    /// Per day: `countA` sessions held, `countB` tasks completed.
    pub activity: Vec<DailyActivity>,
}

impl ProgressReport {
    pub fn build(
        window: &TrendWindow,
        series: Vec<SeriesProgress>,
        sessions: &[TimedScore],
        completed_tasks: &[TimedScore],
    ) -> Self {
        let activity = merge_by_day(&window.filter(sessions), &window.filter(completed_tasks));
        Self {
            window_start: window.start(),
            window_end: window.end,
            series,
            activity,
        }
    }

    pub fn series(&self, instrument_id: &str) -> Option<&SeriesProgress> {
        self.series.iter().find(|s| s.instrument_id == instrument_id)
    }
}
