use crate::constants::{
    DEFAULT_REPLY_DELAY_MS, DEFAULT_TRANSLATE_TIMEOUT_MS, DEFAULT_TRANSLATION_CACHE_SIZE,
    GOOGLE_TRANSLATE_URL,
};
use crate::errors::{AquachatError, AquachatResult};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub reply_delay_ms: u64,
    pub translate_url: String,
    pub translate_timeout_ms: u64,
    pub translation_cache_size: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            translate_url: GOOGLE_TRANSLATE_URL.to_string(),
            translate_timeout_ms: DEFAULT_TRANSLATE_TIMEOUT_MS,
            translation_cache_size: DEFAULT_TRANSLATION_CACHE_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn translate_timeout(&self) -> Duration {
        Duration::from_millis(self.translate_timeout_ms)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("aquachat"))
        .unwrap_or_else(|| PathBuf::from(".aquachat"))
}

pub fn default_config_path() -> AquachatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| AquachatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("aquachat").join("config.json"))
}

/// Loads the config at `path`, writing the defaults there first if the file
/// does not exist yet.
pub fn load_config(path: &Path) -> AquachatResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path).map_err(|e| {
            AquachatError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| AquachatError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        Ok(config)
    } else {
        let config = Config::default();
        save_config(path, &config)?;
        Ok(config)
    }
}

pub fn save_config(path: &Path, config: &Config) -> AquachatResult<()> {
    validate_config(config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AquachatError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| AquachatError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| AquachatError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(())
}

fn validate_config(config: &Config) -> AquachatResult<()> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(AquachatError::config_error("data_dir is required"));
    }

    if config.translate_url.is_empty() {
        return Err(AquachatError::config_error("translate_url is required"));
    }

    if !config.translate_url.starts_with("http://") && !config.translate_url.starts_with("https://")
    {
        return Err(AquachatError::config_error(
            "translate_url must be an http(s) URL",
        ));
    }

    // The reply delay is cosmetic, but a multi-minute pause is almost certainly a typo.
    if config.reply_delay_ms > 60_000 {
        return Err(AquachatError::config_error(
            "reply_delay_ms must not exceed 60000",
        ));
    }

    if config.translate_timeout_ms == 0 {
        return Err(AquachatError::config_error(
            "translate_timeout_ms must be greater than 0",
        ));
    }

    if config.translation_cache_size == 0 {
        return Err(AquachatError::config_error(
            "translation_cache_size must be greater than 0",
        ));
    }

    if config.log_level.parse::<log::LevelFilter>().is_err() {
        return Err(AquachatError::config_error(format!(
            "Unknown log level: {}",
            config.log_level
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_translate_url() {
        let mut config = Config::default();
        config.translate_url = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_log_level() {
        let mut config = Config::default();
        config.log_level = "chatty".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_cache() {
        let mut config = Config::default();
        config.translation_cache_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_config(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_config_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "reply_delay_ms": 10 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.reply_delay(), Duration::from_millis(10));
        assert_eq!(config.translate_url, GOOGLE_TRANSLATE_URL);
    }

    #[test]
    fn test_load_config_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load_config(&path), Err(AquachatError::Config(_))));
    }
}
