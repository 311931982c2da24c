use crate::controller::{ChatController, ResetOrigin};
use crate::models::{Language, Message};
use crate::settings::Settings;
use crate::status_indicator::StatusIndicator;
use crate::theme::Theme;
use crate::transcript::TranscriptView;
use crate::translation::{fallback_translation, TranslationManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    History,
    Settings,
}

impl AppScreen {
    pub const ALL: [AppScreen; 3] = [AppScreen::Chat, AppScreen::History, AppScreen::Settings];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearHistory,
    ResetChatbot,
}

impl ConfirmAction {
    pub fn prompt(self) -> &'static str {
        match self {
            ConfirmAction::ClearHistory => "Are you sure you want to clear all chat history?",
            ConfirmAction::ResetChatbot => {
                "Are you sure you want to reset the chatbot? This will clear all chat history."
            }
        }
    }

    fn origin(self) -> ResetOrigin {
        match self {
            ConfirmAction::ClearHistory => ResetOrigin::History,
            ConfirmAction::ResetChatbot => ResetOrigin::Settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Theme,
    Language,
    ApiKey,
    Reset,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::Theme,
        SettingsField::Language,
        SettingsField::ApiKey,
        SettingsField::Reset,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Interface text in the active language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiLabels {
    pub chat: String,
    pub history: String,
    pub settings: String,
    pub placeholder: String,
    pub chat_history: String,
    pub clear_all: String,
    pub no_history: String,
    pub light_mode: String,
    pub dark_mode: String,
    pub reset_chatbot: String,
    pub language: String,
    pub api_key: String,
}

impl UiLabels {
    const KEYS: [&'static str; 12] = [
        "Chat",
        "History",
        "Settings",
        "Ask about fish farming, feed, diseases, water quality...",
        "Chat History",
        "Clear All",
        "No chat history yet.",
        "Light Mode",
        "Dark Mode",
        "Reset Chatbot",
        "Language",
        "Translation API Key",
    ];

    pub fn english() -> Self {
        Self::from_texts(Self::KEYS.map(str::to_string))
    }

    /// Translates every label, sharing one `timeout` across the batch.
    ///
    /// Labels still missing at the deadline use the fallback dictionary or stay
    /// in English.
    pub async fn resolve(
        translator: &TranslationManager,
        language: &str,
        timeout: Duration,
    ) -> Self {
        let deadline = Instant::now() + timeout;
        let mut texts = Self::KEYS.map(str::to_string);
        let mut missed = 0;
        for (text, key) in texts.iter_mut().zip(Self::KEYS) {
            let translated = translator.translate_text(key, language);
            match tokio::time::timeout_at(deadline, translated).await {
                Ok(translated) => *text = translated,
                Err(_) => {
                    missed += 1;
                    *text = fallback_translation(key, language)
                        .unwrap_or(key)
                        .to_string();
                }
            }
        }
        if missed > 0 {
            log::warn!(
                "{} labels not translated to '{}' within {:?}",
                missed,
                language,
                timeout
            );
        }
        Self::from_texts(texts)
    }

    fn from_texts(texts: [String; 12]) -> Self {
        let [
            chat,
            history,
            settings,
            placeholder,
            chat_history,
            clear_all,
            no_history,
            light_mode,
            dark_mode,
            reset_chatbot,
            language,
            api_key,
        ] = texts;
        Self {
            chat,
            history,
            settings,
            placeholder,
            chat_history,
            clear_all,
            no_history,
            light_mode,
            dark_mode,
            reset_chatbot,
            language,
            api_key,
        }
    }

    pub fn screen(&self, screen: AppScreen) -> &str {
        match screen {
            AppScreen::Chat => &self.chat,
            AppScreen::History => &self.history,
            AppScreen::Settings => &self.settings,
        }
    }

    pub fn theme(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light_mode,
            Theme::Dark => &self.dark_mode,
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub confirm: Option<ConfirmAction>,
    pub notice: Option<String>,
    pub chat_input: String,
    pub api_key_input: String,
    pub settings_field: SettingsField,
    /// `None` keeps the chat pinned to the newest message.
    pub chat_scroll: Option<u16>,
    pub chat_max_scroll: u16,
    pub history_scroll: u16,
    pub history: Vec<Message>,
    pub theme: Theme,
    pub language: Language,
    pub labels: UiLabels,
    pub status_indicator: StatusIndicator,
    pub should_quit: bool,
    pub controller: ChatController,
    pub transcript: Arc<TranscriptView>,
    pub settings: Settings,
    pub translator: Arc<TranslationManager>,
    seen_scroll_epoch: u64,
}

impl App {
    pub fn new(
        controller: ChatController,
        transcript: Arc<TranscriptView>,
        settings: Settings,
        translator: Arc<TranslationManager>,
    ) -> App {
        let language = Language::from_code(&settings.language()).unwrap_or(Language::English);

        App {
            screen: AppScreen::Chat,
            confirm: None,
            notice: None,
            chat_input: String::new(),
            api_key_input: settings.api_key().unwrap_or_default(),
            settings_field: SettingsField::Theme,
            chat_scroll: None,
            chat_max_scroll: 0,
            history_scroll: 0,
            history: Vec::new(),
            theme: settings.theme(),
            language,
            labels: UiLabels::english(),
            status_indicator: StatusIndicator::new(),
            should_quit: false,
            controller,
            transcript,
            settings,
            translator,
            seen_scroll_epoch: 0,
        }
    }

    /// Pulls the latest session state in before a redraw.
    pub async fn refresh(&mut self) {
        self.history = self.controller.messages().await;

        let transcript = self.transcript.snapshot();
        if transcript.scroll_epoch != self.seen_scroll_epoch {
            self.seen_scroll_epoch = transcript.scroll_epoch;
            self.chat_scroll = None;
        }
        self.status_indicator.set_typing(transcript.typing);
        self.status_indicator.update_spinner();
    }

    pub fn scroll_up(&mut self) {
        let current = self.chat_scroll.unwrap_or(self.chat_max_scroll);
        self.chat_scroll = Some(current.saturating_sub(1));
    }

    pub fn scroll_down(&mut self) {
        if let Some(current) = self.chat_scroll {
            let next = current + 1;
            self.chat_scroll = if next >= self.chat_max_scroll {
                None
            } else {
                Some(next)
            };
        }
    }

    pub async fn load_labels(&mut self) {
        let timeout = self.controller.options().translate_timeout;
        self.labels = UiLabels::resolve(&self.translator, self.language.code(), timeout).await;
    }

    pub async fn set_language(&mut self, language: Language) {
        if let Err(e) = self.settings.set_language(language.code()) {
            log::error!("failed to save language: {}", e);
            return;
        }
        self.language = language;
        self.load_labels().await;
        self.controller.rerender().await;
    }

    pub fn toggle_theme(&mut self) {
        match self.settings.toggle_theme() {
            Ok(theme) => self.theme = theme,
            Err(e) => log::error!("failed to save theme: {}", e),
        }
    }

    pub fn save_api_key(&mut self) {
        let key = self.api_key_input.trim().to_string();
        match self.translator.set_api_key(&key) {
            Ok(()) => {
                self.api_key_input = key;
                self.notice = Some("Translation API key saved.".to_string());
            }
            Err(e) => log::error!("failed to save API key: {}", e),
        }
    }

    pub async fn run_confirmed(&mut self, action: ConfirmAction) {
        self.controller.reset(action.origin()).await;
        self.history = self.controller.messages().await;
        self.history_scroll = 0;
        if action == ConfirmAction::ResetChatbot {
            self.notice = Some("Chatbot has been reset successfully!".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::storage::MemoryStore;
    use crate::translation::test_support::{StalledProvider, TaggingProvider};

    fn manager(provider: impl crate::translation::TranslationProvider + 'static) -> TranslationManager {
        let settings = Settings::new(Arc::new(MemoryStore::new()));
        TranslationManager::new(Box::new(provider), settings, 16)
    }

    #[tokio::test]
    async fn test_resolve_uses_provider_labels() {
        let translator = manager(TaggingProvider);
        let labels = UiLabels::resolve(&translator, "te", Duration::from_secs(1)).await;

        assert_eq!(labels.chat, "[te] Chat");
        assert_eq!(labels.api_key, "[te] Translation API Key");
    }

    #[tokio::test]
    async fn test_resolve_is_bounded_when_provider_stalls() {
        let translator = manager(StalledProvider);
        let started = std::time::Instant::now();

        let labels = UiLabels::resolve(&translator, "hi", Duration::from_millis(100)).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(Some(labels.chat.as_str()), fallback_translation("Chat", "hi"));
        assert_eq!(Some(labels.clear_all.as_str()), fallback_translation("Clear All", "hi"));
    }

    #[tokio::test]
    async fn test_resolve_english_is_identity() {
        let translator = manager(StalledProvider);
        let labels = UiLabels::resolve(&translator, "en", Duration::from_millis(50)).await;
        assert_eq!(labels, UiLabels::english());
    }
}
