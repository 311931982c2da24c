use crate::app::{App, SettingsField};
use crate::models::Language;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_settings(f: &mut Frame<'_>, area: Rect, app: &App) {
    let palette = app.theme.palette();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title(format!(" {} ", app.labels.settings));

    let masked_key = if app.api_key_input.is_empty() {
        "(not set)".to_string()
    } else if app.settings_field == SettingsField::ApiKey {
        app.api_key_input.clone()
    } else {
        "•".repeat(app.api_key_input.chars().count().min(24))
    };

    let languages = Language::ALL
        .iter()
        .map(|lang| {
            if *lang == app.language {
                format!("[{}]", lang.display_name())
            } else {
                lang.display_name().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let rows: [(SettingsField, String, String); 4] = [
        (
            SettingsField::Theme,
            "Theme".to_string(),
            app.labels.theme(app.theme).to_string(),
        ),
        (SettingsField::Language, app.labels.language.clone(), languages),
        (SettingsField::ApiKey, app.labels.api_key.clone(), masked_key),
        (
            SettingsField::Reset,
            app.labels.reset_chatbot.clone(),
            String::new(),
        ),
    ];

    let mut lines = vec![Line::from("")];
    for (field, label, value) in rows {
        let selected = field == app.settings_field;
        let marker = if selected { "▶ " } else { "  " };
        let label_style = if selected {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        let label_style = if field == SettingsField::Reset {
            label_style.fg(palette.warning)
        } else {
            label_style
        };

        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<24}", label), label_style),
            Span::styled(value, Style::default().fg(palette.muted)),
        ]));
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
