use crate::app::{App, AppScreen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.muted));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(10)])
        .split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("🐟 ", Style::default()),
        Span::styled(
            "Fishery.News",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(title, chunks[0]);

    let titles: Vec<Line> = AppScreen::ALL
        .iter()
        .map(|screen| Line::from(app.labels.screen(*screen).to_string()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.screen.index())
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(" │ ");
    f.render_widget(tabs, chunks[1]);
}
