/*
[INPUT]:  Crossterm key events
[OUTPUT]: Navigation, text editing, and task actions applied to AppState
[POS]:    TUI key routing
[UPDATE]: 2026-10-07 Route keys to screens instead of the task manager
[UPDATE]: 2026-10-08 Use tui-input requests for the text field
[UPDATE]: 2026-10-16 Screen keys do nothing on the Logs tab
*/

use batteryabn_client::{ClearScope, TaskKind};
use batteryabn_dashboard::View;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::InputRequest;

use super::app::{AppState, InputMode, Tab};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.input_mode == InputMode::Editing {
        handle_editing_key(app, key.code);
        return false;
    }

    if handle_screen_key(app, key.code) {
        return false;
    }

    // the Logs tab hides the mounted screen
    let on_logs = app.current_tab == Tab::Logs;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char(digit @ '1'..='7') => {
            let index = digit as usize - '1' as usize;
            app.set_tab(Tab::ALL[index]);
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        _ if on_logs => {}
        KeyCode::Enter => app.open_selected(false),
        KeyCode::Char('t') => app.open_selected(true),
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('d') => app.dismiss_notice(),
        KeyCode::Char('/') | KeyCode::Char('i') => app.start_editing(),
        _ => {}
    }
    false
}

/// Keys that only mean something on one screen. Returns `true` when consumed.
fn handle_screen_key(app: &mut AppState, key: KeyCode) -> bool {
    if app.current_tab == Tab::Logs {
        return false;
    }
    let on_trigger = matches!(app.screen(), View::TaskTrigger(_));
    let on_unlisted = matches!(app.screen(), View::UnlistedProjects(_));
    let on_status = matches!(app.screen(), View::TaskStatus(_));

    match key {
        KeyCode::Char('u') if on_trigger => app.trigger(TaskKind::Update),
        KeyCode::Char('R') if on_trigger => app.trigger(TaskKind::Reset),
        KeyCode::Char('c') if on_trigger => app.trigger(TaskKind::Create),
        KeyCode::Char('p') if on_trigger => app.trigger(TaskKind::Process),
        KeyCode::Char('U') if on_trigger || on_unlisted => app.trigger_project_update(),
        KeyCode::Char('a') if on_status => app.clear_tasks(ClearScope::All),
        KeyCode::Char('f') if on_status => app.clear_tasks(ClearScope::Finished),
        KeyCode::Char('x') if on_status => app.clear_tasks(ClearScope::Failed),
        _ => return false,
    }
    true
}

fn handle_editing_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Enter => app.commit_input(),
        KeyCode::Esc => app.cancel_editing(),
        KeyCode::Char(ch) => app.edit(InputRequest::InsertChar(ch)),
        KeyCode::Backspace => app.edit(InputRequest::DeletePrevChar),
        KeyCode::Delete => app.edit(InputRequest::DeleteNextChar),
        KeyCode::Left => app.edit(InputRequest::GoToPrevChar),
        KeyCode::Right => app.edit(InputRequest::GoToNextChar),
        KeyCode::Home => app.edit(InputRequest::GoToStart),
        KeyCode::End => app.edit(InputRequest::GoToEnd),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batteryabn_client::BatteryClient;
    use batteryabn_dashboard::{BlobStore, DashboardConfig, Executor, Route, Screen};
    use tokio::sync::mpsc;

    use crate::tui::LogBuffer;

    fn app() -> AppState {
        let config = DashboardConfig {
            api_base_url: "http://127.0.0.1:1/api".to_string(),
            ..DashboardConfig::default()
        };
        let client = BatteryClient::with_config(config.client_config()).expect("client init");
        let blobs = BlobStore::in_temp_dir().expect("blob store");
        let (events, _) = mpsc::unbounded_channel();
        AppState::new(config, Executor::new(client, blobs), LogBuffer::handle(16), events)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_logs_tab_ignores_screen_keys() {
        let mut app = app();
        app.navigate(Route::Cells("GMJuly2022".to_string()));
        app.set_tab(Tab::Logs);

        for code in [
            KeyCode::Enter,
            KeyCode::Char('t'),
            KeyCode::Esc,
            KeyCode::Backspace,
            KeyCode::Char('r'),
            KeyCode::Char('d'),
            KeyCode::Char('i'),
        ] {
            assert!(!press(&mut app, code));
        }

        assert_eq!(app.current_tab, Tab::Logs);
        assert_eq!(app.screen().route(), Route::Cells("GMJuly2022".to_string()));
        assert_eq!(app.routes.depth(), 2);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn test_back_key_pops_outside_logs_tab() {
        let mut app = app();
        app.navigate(Route::Cells("GMJuly2022".to_string()));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen().route(), Route::Projects);
        assert!(!press(&mut app, KeyCode::Char('l')));
        assert_eq!(app.current_tab, Tab::Unlisted);
    }
}
