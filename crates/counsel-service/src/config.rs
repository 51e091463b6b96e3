use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use counsel_progress::window::DEFAULT_WINDOW_DAYS;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const ENV_TREND_WINDOW_DAYS: &str = "COUNSEL_TREND_WINDOW_DAYS";
pub const ENV_LOG_FORMAT: &str = "COUNSEL_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config_version {0} is newer than this build supports ({max})", max = CURRENT_VERSION)]
    UnsupportedVersion(u32),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_LOG_FORMAT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Length of the "last N days" window used for progress trends.
    #[serde(default = "default_window_days")]
    pub trend_window_days: u32,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            trend_window_days: DEFAULT_WINDOW_DAYS,
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by `COUNSEL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TREND_WINDOW_DAYS) {
            config.trend_window_days = parse_window_days(&raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), version = config.config_version, "config loaded");
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = match json.get("config_version") {
            None | Some(serde_json::Value::Null) => 0,
            Some(raw) => raw
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "config_version".to_string(),
                    value: raw.to_string(),
                })?,
        };

        let migrated = migrate(json, on_disk_version)?;
        let config: ServiceConfig = serde_json::from_value(migrated)?;
        if config.trend_window_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "trend_window_days".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(config)
    }
}

fn parse_window_days(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(ConfigError::InvalidValue {
            key: ENV_TREND_WINDOW_DAYS.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion(from_version));
    }

    // v0 → v1: `window_days` renamed to `trend_window_days`
    if from_version < 1 {
        let Some(obj) = json.as_object_mut() else {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                value: "not a JSON object".to_string(),
            });
        };
        if let Some(days) = obj.remove("window_days") {
            obj.entry("trend_window_days").or_insert(days);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed window_days)");
    }

    Ok(json)
}
