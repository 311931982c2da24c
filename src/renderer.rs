//! Projection of stored messages onto a [`ChatSurface`].

use crate::chat_message::{Bubble, Sender};
use crate::models::Message;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;
use std::sync::Arc;

/// Whatever displays the transcript: a terminal pane, or a buffer in tests.
pub trait ChatSurface: Send + Sync {
    fn clear(&self);
    fn append(&self, bubble: Bubble);
    fn set_typing(&self, typing: bool);
    fn set_input_enabled(&self, enabled: bool);
    fn scroll_to_latest(&self);
}

#[derive(Clone)]
pub struct Renderer {
    surface: Arc<dyn ChatSurface>,
}

impl Renderer {
    pub fn new(surface: Arc<dyn ChatSurface>) -> Self {
        Self { surface }
    }

    /// Clears the surface and redraws `messages` in order.
    pub fn render_all(&self, messages: &[Message]) {
        self.surface.clear();
        for message in messages {
            self.surface.append(bubble_for(message));
        }
        self.surface.scroll_to_latest();
    }

    pub fn render_one(&self, message: &Message) {
        self.surface.append(bubble_for(message));
        self.surface.scroll_to_latest();
    }

    pub fn show_typing(&self) {
        self.surface.set_typing(true);
        self.surface.scroll_to_latest();
    }

    pub fn hide_typing(&self) {
        self.surface.set_typing(false);
    }

    pub fn set_input_enabled(&self, enabled: bool) {
        self.surface.set_input_enabled(enabled);
    }
}

pub fn bubble_for(message: &Message) -> Bubble {
    Bubble {
        id: message.id.clone(),
        sender: if message.is_user {
            Sender::User
        } else {
            Sender::Bot
        },
        text: escape_text(&message.text),
        time: format_time(message.timestamp),
    }
}

/// Makes control characters visible so message text can never drive the
/// terminal (cursor movement, colors, title changes). Newlines and tabs survive.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => escaped.push('\n'),
            '\t' => escaped.push_str("    "),
            '\r' => {}
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{{{:x}}}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Local wall-clock `HH:MM`.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Local date and time, as shown on the history screen.
pub fn format_date_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptView;
    use chrono::TimeZone;

    fn message(id: &str, text: &str, is_user: bool) -> Message {
        Message {
            id: id.to_string(),
            text: text.to_string(),
            is_user,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_escape_neutralizes_terminal_sequences() {
        let escaped = escape_text("\u{1b}[31mred\u{7}");
        assert_eq!(escaped, "\\u{1b}[31mred\\u{7}");
        assert!(!escaped.chars().any(|c| c.is_control()));
    }

    #[test]
    fn test_escape_keeps_plain_text_and_newlines() {
        assert_eq!(escape_text("<b>feed</b> & water\nok"), "<b>feed</b> & water\nok");
        assert_eq!(escape_text("a\r\nb"), "a\nb");
    }

    #[test]
    fn test_format_time_is_hour_minute() {
        let time = format_time(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
        assert!(time.ends_with("30"));
    }

    #[test]
    fn test_bubble_for_maps_sender_and_escapes() {
        let bubble = bubble_for(&message("7", "sick\u{1b}", true));
        assert_eq!(bubble.sender, Sender::User);
        assert_eq!(bubble.id, "7");
        assert_eq!(bubble.text, "sick\\u{1b}");
    }

    #[test]
    fn test_render_all_is_idempotent() {
        let view = Arc::new(TranscriptView::new());
        let renderer = Renderer::new(view.clone());
        let messages = vec![
            message("1", "hello", false),
            message("2", "feed?", true),
            message("3", "protein", false),
        ];

        renderer.render_all(&messages);
        let first = view.snapshot().bubbles;
        renderer.render_all(&messages);
        let second = view.snapshot().bubbles;

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_one_appends_without_disturbing() {
        let view = Arc::new(TranscriptView::new());
        let renderer = Renderer::new(view.clone());

        renderer.render_all(&[message("1", "hello", false)]);
        renderer.render_one(&message("2", "water?", true));

        let ids: Vec<_> = view.snapshot().bubbles.into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
