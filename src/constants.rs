// Storage keys
pub const CHAT_HISTORY_KEY: &str = "chatHistory";
pub const LANGUAGE_KEY: &str = "language";
pub const API_KEY_KEY: &str = "google_translate_api_key";
pub const THEME_KEY: &str = "theme";

// Language
pub const BASE_LANGUAGE: &str = "en";

// Translation Constants
pub const GOOGLE_TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";
pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";
pub const DEFAULT_TRANSLATE_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_TRANSLATION_CACHE_SIZE: usize = 100;

// Chat Constants
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1_500;
pub const BOT_NAME: &str = "Fishery Bot";
pub const WELCOME_MESSAGE: &str = "Hello! I'm your aquaculture assistant. Ask me anything about fish farming, feed, diseases, water quality, or government schemes. I can help in English, Hindi, and Telugu!";

// Files
pub const STORAGE_FILE: &str = "storage.json";
pub const LOG_FILE: &str = "aquachat.log";
