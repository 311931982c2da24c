use crate::constants::BOT_NAME;
use crate::theme::Palette;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn icon(self) -> &'static str {
        match self {
            Sender::User => "●",
            Sender::Bot => "◆",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => BOT_NAME,
        }
    }
}

/// One drawn transcript entry. `text` is already escaped for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub time: String,
}

impl Bubble {
    pub fn render(&self, width: u16, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style(palette);

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, width, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn base_style(&self, palette: &Palette) -> Style {
        Style::default().fg(match self.sender {
            Sender::User => palette.user,
            Sender::Bot => palette.bot,
        })
    }

    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(self.sender.icon().to_string(), style),
            Span::styled(" ", style),
            Span::styled(
                self.sender.label().to_string(),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", style),
            Span::styled(self.time.clone(), style.add_modifier(Modifier::DIM)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, width: u16, style: Style) {
        let wrap_width = (width as usize).saturating_sub(4 + self.indent().len()).max(1);

        for paragraph in self.text.split('\n') {
            for wrapped_line in wrap(paragraph, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped_line.into_owned(), style),
                ]));
            }
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}
