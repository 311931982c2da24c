use crate::chat_message::Bubble;
use crate::renderer::ChatSurface;
use std::sync::{Mutex, MutexGuard};

/// What the chat pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptState {
    pub bubbles: Vec<Bubble>,
    pub typing: bool,
    pub input_enabled: bool,
    /// Bumped on every scroll-to-latest request so the view can re-pin itself.
    pub scroll_epoch: u64,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self {
            bubbles: Vec::new(),
            typing: false,
            input_enabled: true,
            scroll_epoch: 0,
        }
    }
}

/// In-memory [`ChatSurface`]; the TUI draws from snapshots of it.
#[derive(Debug, Default)]
pub struct TranscriptView {
    state: Mutex<TranscriptState>,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TranscriptState {
        self.state().clone()
    }

    pub fn input_enabled(&self) -> bool {
        self.state().input_enabled
    }

    fn state(&self) -> MutexGuard<'_, TranscriptState> {
        // A panic while holding this lock cannot leave the state half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ChatSurface for TranscriptView {
    fn clear(&self) {
        self.state().bubbles.clear();
    }

    fn append(&self, bubble: Bubble) {
        self.state().bubbles.push(bubble);
    }

    fn set_typing(&self, typing: bool) {
        self.state().typing = typing;
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.state().input_enabled = enabled;
    }

    fn scroll_to_latest(&self) {
        let mut state = self.state();
        state.scroll_epoch = state.scroll_epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_message::Sender;

    #[test]
    fn test_surface_operations_update_snapshot() {
        let view = TranscriptView::new();
        assert!(view.input_enabled());

        view.append(Bubble {
            id: "1".to_string(),
            sender: Sender::Bot,
            text: "hi".to_string(),
            time: "10:00".to_string(),
        });
        view.set_typing(true);
        view.set_input_enabled(false);
        view.scroll_to_latest();

        let state = view.snapshot();
        assert_eq!(state.bubbles.len(), 1);
        assert!(state.typing);
        assert!(!state.input_enabled);
        assert_eq!(state.scroll_epoch, 1);

        view.clear();
        assert!(view.snapshot().bubbles.is_empty());
    }
}
