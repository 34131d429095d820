/*
[INPUT]:  Dashboard config, request executor, log buffer, terminal input, request responses
[OUTPUT]: Ratatui-based TUI run loop, rendering, and shared styles
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
[UPDATE]: 2026-10-07 Drive routed screens; responses arrive over the UI channel
[UPDATE]: 2026-10-09 Add optional periodic status refresh on the tick
*/

use std::time::Duration;

use anyhow::Result;
use batteryabn_dashboard::{DashboardConfig, Executor, MountId, Response, Screen};
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::LogBufferHandle;
use super::app::{AppState, InputMode, Tab};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub(super) enum UiEvent {
    Input(CrosstermEvent),
    Response { mount: MountId, response: Response },
}

pub async fn run_tui_with_log(
    config: DashboardConfig,
    executor: Executor,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();
    let input_tx = event_tx.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = input_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(config, executor, log_buffer, event_tx);
    info!("dashboard started");

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
            _ = tick.tick() => {
                app.tick();
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key_event(&mut app, key) {
                            should_quit = true;
                        }
                    }
                    Some(UiEvent::Response { mount, response }) => {
                        app.apply_response(mount, response);
                    }
                    Some(UiEvent::Input(_)) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    info!("dashboard stopped");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[0], app.current_tab);

    if app.current_tab == Tab::Logs {
        draw_logs(frame, layout[1].union(layout[2]), &app.log_buffer);
    } else {
        draw_header(frame, layout[1], app);
        draw_screen(frame, layout[2], app);
    }

    draw_footer(frame, layout[3], app);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let line1 = if app.input_mode == InputMode::Editing {
        Line::from(vec![
            Span::styled("[Enter]", key_style),
            Span::raw(" Apply  "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Cancel"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Up/Down]", key_style),
            Span::raw(" Select  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Open  "),
            Span::styled("[t]", key_style),
            Span::raw(" Test records  "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Back  "),
            Span::styled("[Tab/1-7]", key_style),
            Span::raw(" Tabs  "),
            Span::styled("[r]", key_style),
            Span::raw(" Refresh  "),
            Span::styled("[d]", key_style),
            Span::raw(" Dismiss  "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ])
    };

    let mut line2 = screen_hotkeys(app, key_style);
    line2.push(Span::raw(format!("Status: {}", app.status_message)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, Line::from(line2)]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn screen_hotkeys(app: &AppState, key_style: Style) -> Vec<Span<'static>> {
    use batteryabn_dashboard::View;

    let keys: &[(&'static str, &'static str)] = match app.screen() {
        _ if app.current_tab == Tab::Logs => &[],
        View::TaskTrigger(_) => &[
            ("[i]", " Target  "),
            ("[u]", " Update  "),
            ("[R]", " Reset  "),
            ("[c]", " Create  "),
            ("[p]", " Process  "),
            ("[U]", " Project update  "),
        ],
        View::TaskStatus(_) => &[
            ("[a]", " Clear all  "),
            ("[f]", " Clear finished  "),
            ("[x]", " Clear failed  "),
        ],
        View::UnlistedProjects(_) => &[("[U]", " Project update  ")],
        View::CellSearch(_) | View::TestRecordSearch(_) => &[("[/]", " Search  ")],
        _ => &[],
    };
    keys.iter()
        .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
        .collect()
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn error_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn success_style() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn loading_label(app: &AppState) -> &'static str {
    if app.screen().is_loading() { " (loading)" } else { "" }
}
