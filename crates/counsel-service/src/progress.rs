use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use counsel_instruments::all_instruments;
use counsel_progress::report::{ProgressReport, SeriesProgress};
use counsel_progress::window::TrendWindow;

use crate::error::ServiceError;
use crate::store::{ActivitySource, ScoreSource};

/// Builds progress reports from freshly fetched records.
pub struct ProgressService<S> {
    source: Arc<S>,
    window_days: u32,
}

impl<S> ProgressService<S>
where
    S: ScoreSource + ActivitySource,
{
    pub fn new(source: Arc<S>, window_days: u32) -> Self {
        Self {
            source,
            window_days,
        }
    }

    /// Report for the `window_days` ending at `now`.
    pub async fn report(
        &self,
        subject_id: Uuid,
        now: jiff::Timestamp,
    ) -> Result<ProgressReport, ServiceError> {
        let window = TrendWindow::new(now, self.window_days);
        let range = window.range();

        let mut series = Vec::new();
        for instrument in all_instruments() {
            let points = self
                .source
                .fetch_dated_scores(subject_id, Some(instrument.id()), range)
                .await?;
            debug!(
                subject_id = %subject_id,
                instrument = instrument.id(),
                points = points.len(),
                "fetched score series"
            );
            series.push(SeriesProgress::from_points(instrument.as_ref(), &points, &window));
        }

        let sessions = self.source.fetch_sessions(subject_id, range).await?;
        let tasks = self.source.fetch_completed_tasks(subject_id, range).await?;

        Ok(ProgressReport::build(&window, series, &sessions, &tasks))
    }
}
