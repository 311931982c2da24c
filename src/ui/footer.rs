use crate::app::{App, AppScreen, SettingsField};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let instructions = if app.confirm.is_some() {
        "Press 'y' to confirm or 'n' to cancel."
    } else if app.notice.is_some() {
        "Press any key to continue."
    } else {
        match app.screen {
            AppScreen::Chat if app.status_indicator.is_typing() => {
                "Waiting for a reply... PgUp/PgDn to scroll. Tab to switch screens. Ctrl+C to quit."
            }
            AppScreen::Chat => {
                "Type your message and press Enter to send. PgUp/PgDn to scroll. Tab to switch screens. Ctrl+C to quit."
            }
            AppScreen::History => "Up/Down to scroll, 'c' to clear all history. Tab to switch screens.",
            AppScreen::Settings => match app.settings_field {
                SettingsField::Language => "Left/Right to change language. Up/Down to move.",
                SettingsField::ApiKey => "Type the key and press Enter to save. Up/Down to move.",
                _ => "Up/Down to move, Enter to select. Tab to switch screens.",
            },
        }
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
