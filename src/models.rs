// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One transcript entry, user or bot.
///
/// Serialized as `{id, text, isUser, timestamp}` with an ISO-8601 timestamp.
/// `text` is always stored raw; escaping happens only when rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

/// A message before the store has assigned its id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageDraft {
    pub text: String,
    pub is_user: bool,
}

impl MessageDraft {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }
}

/// Languages offered in the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Telugu];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Telugu => "te",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Native name, shown in the language selector.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Telugu => "తెలుగు",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_message_uses_camel_case_keys() {
        let message = Message {
            id: "1700000000000".to_string(),
            text: "How much feed?".to_string(),
            is_user: true,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["isUser"], serde_json::json!(true));
        assert_eq!(value["timestamp"], serde_json::json!("2024-03-01T09:30:00Z"));
        assert!(value.get("is_user").is_none());
    }

    #[test]
    fn test_message_reads_millisecond_timestamps() {
        let raw = r#"{"id":"1","text":"hi","isUser":false,"timestamp":"2024-03-01T09:30:00.250Z"}"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.timestamp.timestamp_millis(), 1_709_285_400_250);
    }

    #[test]
    fn test_language_cycle() {
        assert_eq!(Language::English.next(), Language::Hindi);
        assert_eq!(Language::Telugu.next(), Language::English);
        assert_eq!(Language::English.previous(), Language::Telugu);
        assert_eq!(Language::from_code("te"), Some(Language::Telugu));
        assert_eq!(Language::from_code("fr"), None);
    }
}
