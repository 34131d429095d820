/*
[INPUT]:  The mounted screen and the selection state
[OUTPUT]: Screen body: bucket grid for task status, lists and detail panels elsewhere
[POS]:    TUI UI screen body rendering
[UPDATE]: 2026-10-07 Replace the task list panel with routed screen bodies
*/

use batteryabn_client::TaskBucket;
use batteryabn_dashboard::views::TaskStatusView;
use batteryabn_dashboard::{Screen, View};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, error_style};

pub(in crate::tui) fn draw_screen(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let title = app.screen().route().title();
    let body = match app.screen() {
        View::TaskStatus(view) => {
            draw_task_buckets(frame, area, view);
            return;
        }
        View::TaskTrigger(_)
        | View::Project(_)
        | View::Cell(_)
        | View::CellPlot(_)
        | View::TestRecord(_) => Body::Detail,
        _ => Body::List,
    };
    match body {
        Body::Detail => draw_detail(frame, area, app, &title),
        Body::List => draw_list(frame, area, app, &title),
    }
}

enum Body {
    Detail,
    List,
}

fn draw_task_buckets(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, view: &TaskStatusView) {
    if view.snapshot().is_none() {
        let style = if view.is_failed() { error_style() } else { Style::default() };
        let lines = view
            .render_lines()
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>();
        let widget = Paragraph::new(lines).style(style).block(panel("Task Status"));
        frame.render_widget(widget, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let cells = rows
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .to_vec()
        })
        .collect::<Vec<_>>();

    for (bucket, cell) in TaskBucket::ALL.into_iter().zip(cells) {
        let width = cell.width.saturating_sub(2) as usize;
        let items = view
            .rows(bucket)
            .iter()
            .map(|row| ListItem::new(fit(row, width)))
            .collect::<Vec<_>>();
        let style = match bucket {
            TaskBucket::Failed => Style::default().fg(Color::LightRed),
            TaskBucket::Finished => Style::default().fg(Color::LightGreen),
            _ => Style::default(),
        };
        let title = format!("{} ({})", bucket.heading(), view.count(bucket));
        frame.render_widget(List::new(items).style(style).block(panel(title)), cell);
    }
}

fn draw_list(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &mut AppState, title: &str) {
    let entries = app.entries();
    if entries.is_empty() {
        let mut lines = app.screen().render_lines();
        if lines.iter().all(|line| line.is_empty()) && !app.screen().is_loading() {
            lines = vec!["No results".to_string()];
        }
        let widget = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .wrap(Wrap { trim: false })
            .block(panel(title.to_string()));
        frame.render_widget(widget, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items = entries
        .iter()
        .map(|entry| ListItem::new(fit(&entry.label, width)))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(panel(format!("{title} ({})", entries.len())))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_detail(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &mut AppState, title: &str) {
    let entries = app.entries();
    let entry_height = if entries.is_empty() { 0 } else { entries.len() as u16 + 2 };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(entry_height)])
        .split(area);

    let style = if app.screen().is_failed() { error_style() } else { Style::default() };
    let lines = app
        .screen()
        .render_lines()
        .into_iter()
        .map(Line::from)
        .collect::<Vec<_>>();
    let widget = Paragraph::new(lines)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(panel(title.to_string()));
    frame.render_widget(widget, parts[0]);

    if !entries.is_empty() {
        let items = entries
            .iter()
            .map(|entry| ListItem::new(entry.label.clone()))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(panel("Open".to_string()))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, parts[1], &mut app.list_state);
    }
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(title.into())
}

/// Truncate `text` to `width` display columns
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        used += ch_width;
        fitted.push(ch);
    }
    fitted.push('…');
    fitted
}
