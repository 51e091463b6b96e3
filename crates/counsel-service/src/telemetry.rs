use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init(format: LogFormat) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        // Structured JSON logging for log aggregation
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Plain => builder.try_init(),
    };
    result.map_err(|e| TelemetryError(e.to_string()))
}
