use crate::constants::BOT_NAME;
use crate::theme::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug)]
pub struct StatusIndicator {
    typing: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            typing: false,
            spinner_idx: 0,
        }
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if !self.typing {
            return;
        }

        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let spinner = spinner_frames[self.spinner_idx % spinner_frames.len()];

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(palette.bot)),
            Span::raw(" "),
            Span::styled(
                format!("{} is typing...", BOT_NAME),
                Style::default().fg(palette.muted),
            ),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}
