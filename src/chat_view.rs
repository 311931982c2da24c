use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    draw_messages(f, app, chunks[0]);
    app.status_indicator
        .render(f, chunks[1], &app.theme.palette());
    draw_input(f, app, chunks[2]);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.theme.palette();
    let transcript = app.transcript.snapshot();

    let mut lines = Vec::new();
    for bubble in &transcript.bubbles {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(bubble.render(area.width, &palette));
    }

    keep_tail(&mut lines, usize::from(u16::MAX));
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(area.height);
    app.chat_max_scroll = max_scroll;
    let chat_scroll = app.chat_scroll.unwrap_or(max_scroll).min(max_scroll);

    let msgs_para = Paragraph::new(lines).style(Style::default().fg(palette.text));
    f.render_widget(msgs_para.scroll((chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();
    let enabled = app.transcript.input_enabled();

    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(palette.muted),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prefix_style = if enabled {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let body = if app.chat_input.is_empty() {
        Span::styled(
            app.labels.placeholder.clone(),
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(app.chat_input.clone(), Style::default().fg(palette.text))
    };

    let input = Line::from(vec![Span::styled("→ ", prefix_style), body]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = u16::try_from(app.chat_input.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(palette.muted),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        },
    );

    if enabled && app.confirm.is_none() {
        let cursor_x = cursor_column(area, text_width, scroll_offset);
        f.set_cursor_position((cursor_x, area.y.saturating_add(1)));
    }
}

/// Drops the oldest lines so the newest stay reachable by a `u16` scroll.
fn keep_tail<T>(lines: &mut Vec<T>, max: usize) {
    if lines.len() > max {
        lines.drain(..lines.len() - max);
    }
}

fn cursor_column(area: Rect, text_width: u16, scroll_offset: u16) -> u16 {
    area.x
        .saturating_add(2)
        .saturating_add(text_width.saturating_sub(scroll_offset))
        .min(area.right().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_tail_preserves_newest_lines() {
        let mut lines: Vec<usize> = (0..70_000).collect();
        keep_tail(&mut lines, usize::from(u16::MAX));

        assert_eq!(lines.len(), usize::from(u16::MAX));
        assert_eq!(lines.last(), Some(&69_999));
        assert_eq!(lines.first(), Some(&(70_000 - usize::from(u16::MAX))));

        let mut short = vec![1, 2, 3];
        keep_tail(&mut short, 10);
        assert_eq!(short, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_column_stays_inside_area() {
        let area = Rect::new(4, 0, 40, 3);
        assert_eq!(cursor_column(area, 5, 0), 11);
        assert_eq!(cursor_column(area, u16::MAX, 0), area.right() - 1);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 3);
        assert_eq!(cursor_column(edge, 500, 0), edge.right() - 1);
    }
}
