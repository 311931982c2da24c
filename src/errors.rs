// src/errors.rs

use thiserror::Error;

/// Errors raised by the aquachat library.
///
/// Most of these never reach the user: the chat pipeline recovers from storage
/// and translation failures locally and only logs them.
#[derive(Error, Debug)]
pub enum AquachatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AquachatError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn storage_error(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn translation_error(message: impl Into<String>) -> Self {
        Self::Translation(message.into())
    }

    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::MissingCredential(message.into())
    }

    /// True for failures the translation layer should absorb with its fallback.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::Translation(_) | Self::MissingCredential(_) | Self::Http(_) | Self::Json(_)
        )
    }
}

pub type AquachatResult<T> = Result<T, AquachatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_helpers_format_messages() {
        let err = AquachatError::config_error("bad delay");
        assert_eq!(err.to_string(), "Configuration error: bad delay");

        let err = AquachatError::missing_credential("no api key");
        assert_eq!(err.to_string(), "Missing credential: no api key");
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(AquachatError::translation_error("503").is_provider_failure());
        assert!(AquachatError::missing_credential("key").is_provider_failure());
        assert!(!AquachatError::storage_error("disk full").is_provider_failure());
        assert!(!AquachatError::config_error("oops").is_provider_failure());
    }
}
