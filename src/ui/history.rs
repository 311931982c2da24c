use crate::app::App;
use crate::chat_message::Sender;
use crate::renderer::{escape_text, format_date_time};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_history(f: &mut Frame<'_>, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let title = if app.history.is_empty() {
        format!(" {} ", app.labels.chat_history)
    } else {
        format!(" {}  [c] {} ", app.labels.chat_history, app.labels.clear_all)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title(title);

    if app.history.is_empty() {
        let empty = Paragraph::new(format!(
            "{} Start a conversation to see your messages here!",
            app.labels.no_history
        ))
        .block(block)
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::new();
    for message in &app.history {
        let (sender, color) = if message.is_user {
            (Sender::User, palette.user)
        } else {
            (Sender::Bot, palette.bot)
        };

        lines.push(Line::from(vec![
            Span::styled(
                sender.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format_date_time(message.timestamp),
                Style::default().fg(palette.muted),
            ),
        ]));
        for text_line in escape_text(&message.text).split('\n') {
            lines.push(Line::from(Span::styled(
                text_line.to_string(),
                Style::default().fg(palette.text),
            )));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.history_scroll, 0));
    f.render_widget(paragraph, area);
}
