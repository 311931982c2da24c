//! The chat session: send, wait, answer.
//!
//! A session is `Idle` until a non-blank message is accepted, then `Awaiting`
//! until its bot reply has been stored. While awaiting, further sends are
//! dropped and the input surface is disabled. `send_message` resolves only
//! once the reply is stored, so a turn can never be left half-finished.

use crate::config::Config;
use crate::constants::WELCOME_MESSAGE;
use crate::message_store::MessageStore;
use crate::models::{Message, MessageDraft};
use crate::renderer::{ChatSurface, Renderer};
use crate::responder::{classify, select_response};
use crate::settings::Settings;
use crate::translation::TranslationManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Awaiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Rejected(RejectReason),
    Completed { user: Message, reply: Message },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOrigin {
    History,
    Settings,
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub reply_delay: Duration,
    pub translate_timeout: Duration,
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            reply_delay: config.reply_delay(),
            translate_timeout: config.translate_timeout(),
        }
    }
}

struct ChatSession {
    store: MessageStore,
    state: ChatState,
}

impl ChatSession {
    fn ensure_welcome(&mut self) {
        if self.store.is_empty() {
            self.store.append(MessageDraft::bot(WELCOME_MESSAGE));
        }
    }
}

/// Cheap to clone; every clone drives the same session.
#[derive(Clone)]
pub struct ChatController {
    session: Arc<Mutex<ChatSession>>,
    translator: Arc<TranslationManager>,
    settings: Settings,
    renderer: Renderer,
    options: ControllerOptions,
}

impl ChatController {
    /// Loads the persisted transcript (adding the welcome message to an empty
    /// one) and draws it.
    pub fn new(
        mut store: MessageStore,
        translator: Arc<TranslationManager>,
        settings: Settings,
        surface: Arc<dyn ChatSurface>,
        options: ControllerOptions,
    ) -> Self {
        store.load();
        let mut session = ChatSession {
            store,
            state: ChatState::Idle,
        };
        session.ensure_welcome();

        let renderer = Renderer::new(surface);
        renderer.render_all(session.store.messages());
        renderer.set_input_enabled(true);

        Self {
            session: Arc::new(Mutex::new(session)),
            translator,
            settings,
            renderer,
            options,
        }
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub async fn state(&self) -> ChatState {
        self.session.lock().await.state
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.session.lock().await.store.messages().to_vec()
    }

    pub async fn message_count(&self) -> usize {
        self.session.lock().await.store.len()
    }

    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let input = text.trim();
        if input.is_empty() {
            return SendOutcome::Rejected(RejectReason::Empty);
        }

        let user = {
            let mut session = self.session.lock().await;
            if session.state == ChatState::Awaiting {
                log::debug!("send ignored: a reply is still pending");
                return SendOutcome::Rejected(RejectReason::Busy);
            }
            session.state = ChatState::Awaiting;
            self.renderer.set_input_enabled(false);

            let user = session.store.append(MessageDraft::user(input));
            self.renderer.render_one(&user);
            self.renderer.show_typing();
            user
        };
        log::info!("accepted message {} (topic: {:?})", user.id, classify(input));

        tokio::time::sleep(self.options.reply_delay).await;
        self.renderer.hide_typing();

        let reply_text = self.compose_reply(input).await;

        let mut session = self.session.lock().await;
        let reply = session.store.append(MessageDraft::bot(reply_text));
        self.renderer.render_one(&reply);
        session.state = ChatState::Idle;
        self.renderer.set_input_enabled(true);

        SendOutcome::Completed { user, reply }
    }

    /// Canned answer in the active language. A translation that outlives the
    /// timeout is abandoned and the English text is used instead.
    async fn compose_reply(&self, input: &str) -> String {
        let base = select_response(input);
        let language = self.settings.language();

        match tokio::time::timeout(
            self.options.translate_timeout,
            self.translator.translate_text(base, &language),
        )
        .await
        {
            Ok(translated) => translated,
            Err(_) => {
                log::warn!(
                    "translation to '{}' timed out after {:?}; replying untranslated",
                    language,
                    self.options.translate_timeout
                );
                base.to_string()
            }
        }
    }

    /// Wipes the transcript back to the single welcome message.
    ///
    /// A reply that is still pending will land after the welcome message.
    pub async fn reset(&self, origin: ResetOrigin) {
        let mut session = self.session.lock().await;
        session.store.clear();
        session.ensure_welcome();
        self.renderer.render_all(session.store.messages());
        log::info!("chat history cleared from {:?}", origin);
    }

    /// Redraws the whole transcript from the store.
    pub async fn rerender(&self) {
        let session = self.session.lock().await;
        self.renderer.render_all(session.store.messages());
    }
}
