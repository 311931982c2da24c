use crate::app::{App, AppScreen, ConfirmAction, SettingsField};
use crate::renderer::ChatSurface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Routes one key press. Overlays take the key before the active screen does.
pub async fn handle_key(key: KeyEvent, app: &mut App) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if let Some(action) = app.confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.confirm = None;
                app.run_confirmed(action).await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm = None;
            }
            _ => {}
        }
        return;
    }

    if app.notice.take().is_some() {
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.screen = app.screen.next();
            return;
        }
        KeyCode::BackTab => {
            app.screen = app.screen.previous();
            return;
        }
        _ => {}
    }

    match app.screen {
        AppScreen::Chat => handle_chat_input(key, app),
        AppScreen::History => handle_history_input(key, app),
        AppScreen::Settings => handle_settings_input(key, app).await,
    }
}

fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::PageUp | KeyCode::Up => app.scroll_up(),
        KeyCode::PageDown | KeyCode::Down => app.scroll_down(),
        _ if !app.transcript.input_enabled() => {}
        KeyCode::Enter => {
            if app.chat_input.trim().is_empty() {
                return;
            }
            let text = std::mem::take(&mut app.chat_input);
            // Lock now; the controller unlocks once the reply is stored.
            app.transcript.set_input_enabled(false);
            let controller = app.controller.clone();
            tokio::spawn(async move {
                controller.send_message(&text).await;
            });
        }
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => app.chat_input.push(c),
        _ => {}
    }
}

fn handle_history_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => app.history_scroll = app.history_scroll.saturating_sub(1),
        KeyCode::Down => app.history_scroll = app.history_scroll.saturating_add(1),
        KeyCode::Char('c') | KeyCode::Char('C') if !app.history.is_empty() => {
            app.confirm = Some(ConfirmAction::ClearHistory);
        }
        KeyCode::Esc => app.screen = AppScreen::Chat,
        _ => {}
    }
}

async fn handle_settings_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => {
            app.settings_field = app.settings_field.previous();
            return;
        }
        KeyCode::Down => {
            app.settings_field = app.settings_field.next();
            return;
        }
        KeyCode::Esc => {
            app.screen = AppScreen::Chat;
            return;
        }
        _ => {}
    }

    match app.settings_field {
        SettingsField::Theme => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.toggle_theme();
            }
        }
        SettingsField::Language => match key.code {
            KeyCode::Left => app.set_language(app.language.previous()).await,
            KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                app.set_language(app.language.next()).await
            }
            _ => {}
        },
        SettingsField::ApiKey => match key.code {
            KeyCode::Enter => app.save_api_key(),
            KeyCode::Backspace => {
                app.api_key_input.pop();
            }
            KeyCode::Char(c) => app.api_key_input.push(c),
            _ => {}
        },
        SettingsField::Reset => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.confirm = Some(ConfirmAction::ResetChatbot);
            }
        }
    }
}
