// src/logging.rs

use crate::config::Config;
use crate::constants::LOG_FILE;
use crate::errors::{AquachatError, AquachatResult};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// One call to the network translation provider.
#[derive(Debug, Clone)]
pub struct TranslationCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub target_language: String,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

/// Routes the `log` facade to `<data_dir>/aquachat.log`.
///
/// Output must stay off stderr while the terminal is in raw mode, hence the file
/// target. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &Config) -> AquachatResult<PathBuf> {
    fs::create_dir_all(&config.data_dir)?;
    let log_path = config.data_dir.join(LOG_FILE);

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format_timestamp_millis()
    .try_init()
    .map_err(|e| AquachatError::config_error(format!("Failed to initialize logger: {}", e)))?;

    Ok(log_path)
}

/// Logs a translation provider call as a single line.
pub fn log_translation_call(entry: &TranslationCallLog) {
    let status = entry
        .response_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());

    log::info!(
        target: "aquachat::translation",
        "[{}] {} - target: {} - Status: {} - Time: {}ms",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.target_language,
        status,
        entry.response_time_ms
    );
}
