//! User preferences kept next to the chat history.

use crate::constants::{API_KEY_KEY, BASE_LANGUAGE, LANGUAGE_KEY, THEME_KEY};
use crate::errors::AquachatResult;
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use std::sync::Arc;

#[derive(Clone)]
pub struct Settings {
    storage: Arc<dyn KeyValueStore>,
}

impl Settings {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Active language code, `"en"` when unset or unreadable.
    pub fn language(&self) -> String {
        match self.storage.get(LANGUAGE_KEY) {
            Ok(Some(code)) if !code.trim().is_empty() => code,
            Ok(_) => BASE_LANGUAGE.to_string(),
            Err(e) => {
                log::warn!("could not read language: {}", e);
                BASE_LANGUAGE.to_string()
            }
        }
    }

    pub fn set_language(&self, code: &str) -> AquachatResult<()> {
        self.storage.set(LANGUAGE_KEY, code)
    }

    /// The stored theme, if the user ever picked one.
    pub fn stored_theme(&self) -> Option<Theme> {
        self.storage
            .get(THEME_KEY)
            .ok()
            .flatten()
            .and_then(|value| Theme::parse(&value))
    }

    pub fn theme(&self) -> Theme {
        self.stored_theme().unwrap_or_else(Theme::detect)
    }

    pub fn set_theme(&self, theme: Theme) -> AquachatResult<()> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&self) -> AquachatResult<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn api_key(&self) -> Option<String> {
        self.storage
            .get(API_KEY_KEY)
            .ok()
            .flatten()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Stores the trimmed key; a blank key removes the credential.
    pub fn set_api_key(&self, key: &str) -> AquachatResult<()> {
        let key = key.trim();
        if key.is_empty() {
            self.storage.remove(API_KEY_KEY)
        } else {
            self.storage.set(API_KEY_KEY, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn settings() -> Settings {
        Settings::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_language_defaults_to_english() {
        let settings = settings();
        assert_eq!(settings.language(), "en");

        settings.set_language("hi").unwrap();
        assert_eq!(settings.language(), "hi");
    }

    #[test]
    fn test_api_key_is_trimmed_and_blank_removes() {
        let settings = settings();
        assert_eq!(settings.api_key(), None);

        settings.set_api_key("  abc123 ").unwrap();
        assert_eq!(settings.api_key().as_deref(), Some("abc123"));

        settings.set_api_key("   ").unwrap();
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let settings = settings();
        settings.set_theme(Theme::Light).unwrap();

        assert_eq!(settings.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(settings.stored_theme(), Some(Theme::Dark));
    }
}
