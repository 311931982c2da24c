//! Text translation: network provider first, static dictionary second.
//!
//! `TranslationManager::translate_text` never fails. Whatever goes wrong with
//! the provider, the caller gets either a dictionary entry or the text it
//! passed in.

use crate::constants::{BASE_LANGUAGE, WELCOME_MESSAGE};
use crate::errors::{AquachatError, AquachatResult};
use crate::logging::{log_translation_call, TranslationCallLog};
use crate::responder::{
    DISEASE_RESPONSE, FALLBACK_RESPONSE, FEED_RESPONSE, SCHEME_RESPONSE, WATER_RESPONSE,
};
use crate::settings::Settings;
use async_trait::async_trait;
use chrono::Utc;
use lru::LruCache;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Body of a provider request. The source language is always the base language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
}

impl<'a> TranslationRequest<'a> {
    pub fn new(text: &'a str, target: &'a str) -> Self {
        Self {
            q: text,
            source: BASE_LANGUAGE,
            target,
            format: "text",
        }
    }
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        request: &TranslationRequest<'_>,
        api_key: Option<&str>,
    ) -> AquachatResult<String>;
}

#[derive(Debug, Deserialize)]
struct GoogleTranslateResponse {
    data: GoogleTranslateData,
}

#[derive(Debug, Deserialize)]
struct GoogleTranslateData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

/// Google Cloud Translation v2 over HTTPS.
pub struct GoogleTranslateProvider {
    client: Client,
    endpoint: String,
}

impl GoogleTranslateProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AquachatResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn translate(
        &self,
        request: &TranslationRequest<'_>,
        api_key: Option<&str>,
    ) -> AquachatResult<String> {
        let api_key = api_key.ok_or_else(|| {
            AquachatError::missing_credential("no translation API key configured")
        })?;

        let start_time = Instant::now();
        let sent = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await;

        let mut call = TranslationCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            target_language: request.target.to_string(),
            response_status: None,
            response_time_ms: start_time.elapsed().as_millis(),
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                log_translation_call(&call);
                return Err(e.into());
            }
        };

        let status = response.status();
        call.response_status = Some(status.as_u16());
        log_translation_call(&call);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AquachatError::translation_error(format!(
                "API returned error: {} - {}",
                status, error_text
            )));
        }

        let body: GoogleTranslateResponse = response.json().await?;
        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| AquachatError::translation_error("Response missing translations"))
    }
}

// source text -> translated text, per target language
static FALLBACK_TRANSLATIONS: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let hi: HashMap<&str, &str> = [
            ("Chat", "चैट"),
            ("History", "इतिहास"),
            ("Settings", "सेटिंग्स"),
            ("Ask about fish farming, feed, diseases, water quality...", "मछली पालन, चारा, बीमारी, पानी की गुणवत्ता के बारे में पूछें..."),
            ("Hello! I'm your aquaculture assistant.", "नमस्ते! मैं आपका मत्स्य पालन सहायक हूँ।"),
            ("Chat History", "चैट इतिहास"),
            ("Clear All", "सभी साफ करें"),
            ("No chat history yet.", "अभी तक कोई चैट इतिहास नहीं।"),
            ("Light Mode", "लाइट मोड"),
            ("Dark Mode", "डार्क मोड"),
            ("Reset Chatbot", "चैटबॉट रीसेट करें"),
            ("Language", "भाषा"),
            ("Translation API Key", "अनुवाद API कुंजी"),
            (WELCOME_MESSAGE, "नमस्ते! मैं आपका मत्स्य पालन सहायक हूँ। मछली पालन, चारा, बीमारियों, पानी की गुणवत्ता या सरकारी योजनाओं के बारे में कुछ भी पूछें। मैं अंग्रेज़ी, हिंदी और तेलुगु में मदद कर सकता हूँ!"),
            (FEED_RESPONSE, "मछलियों की बेहतर वृद्धि के लिए 25-35% प्रोटीन वाला संतुलित आहार दें। चारा देने की आवृत्ति मछली के आकार और पानी के तापमान पर निर्भर करती है। क्या आप अपनी मछली की प्रजाति के लिए विशेष सुझाव चाहते हैं?"),
            (DISEASE_RESPONSE, "मछलियों की आम बीमारियों में जीवाणु संक्रमण, परजीवी और वायरल रोग शामिल हैं। बचाव के मुख्य उपाय: पानी की अच्छी गुणवत्ता बनाए रखें, अधिक भीड़ से बचें और नई मछलियों को अलग रखें। आप कौन से लक्षण देख रहे हैं?"),
            (WATER_RESPONSE, "पानी के महत्वपूर्ण मानक: pH (6.5-8.5), घुलित ऑक्सीजन (>5mg/L), अमोनिया (<0.25mg/L) और तापमान। नियमित जांच और पानी बदलना बहुत जरूरी है। क्या आपको पानी की गुणवत्ता से जुड़ी किसी खास समस्या में मदद चाहिए?"),
            (SCHEME_RESPONSE, "कई सरकारी योजनाएं मत्स्य पालन में सहायता करती हैं: पीएम-किसान, नीली क्रांति और राज्य-विशेष मत्स्य कार्यक्रम। ये तालाब निर्माण, उपकरण और प्रशिक्षण के लिए सब्सिडी देती हैं। क्या आप पात्रता मानदंडों के बारे में जानना चाहेंगे?"),
            (FALLBACK_RESPONSE, "मैं मत्स्य पालन के हर पहलू में आपकी मदद के लिए यहाँ हूँ! आप मुझसे मछली के चारे, रोग प्रबंधन, पानी की गुणवत्ता, तालाब निर्माण, सरकारी योजनाओं या मछली पालन से जुड़े किसी भी सवाल के बारे में पूछ सकते हैं। आज मैं आपकी कैसे मदद करूँ?"),
        ]
        .into_iter()
        .collect();

        let te: HashMap<&str, &str> = [
            ("Chat", "చాట్"),
            ("History", "చరిత్ర"),
            ("Settings", "సెట్టింగులు"),
            ("Ask about fish farming, feed, diseases, water quality...", "చేప పెంపకం, మేత, వ్యాధులు, నీటి నాణ్యత గురించి అడగండి..."),
            ("Hello! I'm your aquaculture assistant.", "నమస్కారం! నేను మీ మత్స్య పెంపకం సహాయకుడిని."),
            ("Chat History", "చాట్ చరిత్ర"),
            ("Clear All", "అన్నీ క్లియర్ చేయండి"),
            ("No chat history yet.", "ఇంకా చాట్ చరిత్ర లేదు."),
            ("Light Mode", "లైట్ మోడ్"),
            ("Dark Mode", "డార్క్ మోడ్"),
            ("Reset Chatbot", "చాట్‌బాట్‌ను రీసెట్ చేయండి"),
            ("Language", "భాష"),
            ("Translation API Key", "అనువాద API కీ"),
            (WELCOME_MESSAGE, "నమస్కారం! నేను మీ మత్స్య పెంపకం సహాయకుడిని. చేపల పెంపకం, మేత, వ్యాధులు, నీటి నాణ్యత లేదా ప్రభుత్వ పథకాల గురించి ఏదైనా అడగండి. నేను ఇంగ్లీష్, హిందీ మరియు తెలుగులో సహాయం చేయగలను!"),
            (FEED_RESPONSE, "చేపలు బాగా పెరగడానికి 25-35% ప్రోటీన్ ఉన్న సమతుల్య ఆహారం ఇవ్వండి. మేత ఇచ్చే తరచుదనం చేపల పరిమాణం మరియు నీటి ఉష్ణోగ్రతపై ఆధారపడి ఉంటుంది. మీ చేప జాతికి ప్రత్యేక సూచనలు కావాలా?"),
            (DISEASE_RESPONSE, "చేపలకు సాధారణంగా వచ్చే వ్యాధులలో బ్యాక్టీరియా ఇన్ఫెక్షన్లు, పరాన్నజీవులు మరియు వైరల్ వ్యాధులు ఉన్నాయి. ముఖ్యమైన నివారణ చర్యలు: మంచి నీటి నాణ్యతను కాపాడండి, అధిక సాంద్రతను నివారించండి మరియు కొత్త చేపలను వేరుగా ఉంచండి. మీరు ఏ లక్షణాలను గమనిస్తున్నారు?"),
            (WATER_RESPONSE, "ముఖ్యమైన నీటి ప్రమాణాలు: pH (6.5-8.5), కరిగిన ఆక్సిజన్ (>5mg/L), అమ్మోనియా (<0.25mg/L) మరియు ఉష్ణోగ్రత. క్రమం తప్పకుండా పరీక్షించడం మరియు నీటిని మార్చడం చాలా ముఖ్యం. నీటి నాణ్యతకు సంబంధించిన ఏదైనా సమస్యలో సహాయం కావాలా?"),
            (SCHEME_RESPONSE, "అనేక ప్రభుత్వ పథకాలు మత్స్య పెంపకానికి సహాయం చేస్తాయి: పీఎం-కిసాన్, నీలి విప్లవం మరియు రాష్ట్ర మత్స్య కార్యక్రమాలు. ఇవి చెరువు నిర్మాణం, పరికరాలు మరియు శిక్షణ కోసం రాయితీలు అందిస్తాయి. అర్హత ప్రమాణాల వివరాలు కావాలా?"),
            (FALLBACK_RESPONSE, "మత్స్య పెంపకంలోని అన్ని విషయాల్లో సహాయం చేయడానికి నేను ఇక్కడ ఉన్నాను! చేపల మేత, వ్యాధుల నిర్వహణ, నీటి నాణ్యత, చెరువు నిర్మాణం, ప్రభుత్వ పథకాలు లేదా చేపల పెంపకానికి సంబంధించిన ఏ ప్రశ్న అయినా అడగండి. ఈ రోజు నేను మీకు ఎలా సహాయం చేయగలను?"),
        ]
        .into_iter()
        .collect();

        HashMap::from([("hi", hi), ("te", te)])
    });

/// Exact-match dictionary lookup.
pub fn fallback_translation(text: &str, target: &str) -> Option<&'static str> {
    FALLBACK_TRANSLATIONS
        .get(target)
        .and_then(|table| table.get(text))
        .copied()
}

pub struct TranslationManager {
    provider: Box<dyn TranslationProvider>,
    settings: Settings,
    cache: Mutex<LruCache<(String, String), String>>,
}

impl TranslationManager {
    pub fn new(provider: Box<dyn TranslationProvider>, settings: Settings, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            provider,
            settings,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn api_key(&self) -> Option<String> {
        self.settings.api_key()
    }

    pub fn set_api_key(&self, key: &str) -> AquachatResult<()> {
        self.settings.set_api_key(key)
    }

    /// Translates `text` from English into `target`.
    ///
    /// Identity for English or empty text. Provider failures fall back to the
    /// static dictionary, then to `text` itself.
    pub async fn translate_text(&self, text: &str, target: &str) -> String {
        if target == BASE_LANGUAGE || text.is_empty() {
            return text.to_string();
        }

        let cache_key = (target.to_string(), text.to_string());
        if let Some(hit) = self.cache.lock().ok().and_then(|mut c| c.get(&cache_key).cloned()) {
            return hit;
        }

        let request = TranslationRequest::new(text, target);
        let api_key = self.settings.api_key();
        match self.provider.translate(&request, api_key.as_deref()).await {
            Ok(translated) => {
                if let Ok(mut cache) = self.cache.lock() {
                    cache.put(cache_key, translated.clone());
                }
                translated
            }
            Err(e) => {
                if e.is_provider_failure() {
                    log::warn!(
                        "Translation API not available ({}), using fallback translations",
                        e
                    );
                } else {
                    log::error!("translation failed unexpectedly ({}), using fallback translations", e);
                }
                fallback_translation(text, target)
                    .map(str::to_string)
                    .unwrap_or_else(|| text.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Always fails, counting how often it was asked.
    #[derive(Default)]
    pub struct FailingProvider {
        pub calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TranslationProvider for FailingProvider {
        async fn translate(
            &self,
            _request: &TranslationRequest<'_>,
            _api_key: Option<&str>,
        ) -> AquachatResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AquachatError::translation_error("provider offline"))
        }
    }

    /// Answers `[target] text`.
    pub struct TaggingProvider;

    #[async_trait]
    impl TranslationProvider for TaggingProvider {
        async fn translate(
            &self,
            request: &TranslationRequest<'_>,
            _api_key: Option<&str>,
        ) -> AquachatResult<String> {
            Ok(format!("[{}] {}", request.target, request.q))
        }
    }

    /// Never answers within any reasonable timeout.
    pub struct StalledProvider;

    #[async_trait]
    impl TranslationProvider for StalledProvider {
        async fn translate(
            &self,
            _request: &TranslationRequest<'_>,
            _api_key: Option<&str>,
        ) -> AquachatResult<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(AquachatError::translation_error("unreachable"))
        }
    }
}
