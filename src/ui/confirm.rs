use crate::theme::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// A centered yes/no box over `area`.
pub fn draw_confirm(f: &mut Frame<'_>, area: Rect, title: &str, prompt: &str, palette: &Palette) {
    let popup = centered_rect(60, 30, area);
    draw_box(f, popup, title, &format!("{}\n\nPress 'y' to confirm or 'n' to cancel.", prompt), palette);
}

/// A centered message box, dismissed by any key.
pub fn draw_notice(f: &mut Frame<'_>, area: Rect, message: &str, palette: &Palette) {
    let popup = centered_rect(50, 20, area);
    draw_box(f, popup, "Notice", message, palette);
}

fn draw_box(f: &mut Frame<'_>, area: Rect, title: &str, text: &str, palette: &Palette) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .style(Style::default().fg(palette.warning).bg(palette.background));

    let paragraph = Paragraph::new(text.to_string())
        .block(block)
        .style(
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
