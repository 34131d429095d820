/*
[INPUT]:  Current tab, route breadcrumb, notice, and text input state
[OUTPUT]: Tab bar and header (breadcrumb, input field, notice) renderers
[POS]:    TUI UI layout module
[UPDATE]: 2026-02-10 Use shared tab bar renderer
[UPDATE]: 2026-10-07 Render dashboard tabs and the route header
*/

use batteryabn_dashboard::{Notice, Screen};
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::tui::app::{AppState, InputMode, Tab};
use crate::tui::runtime::{border_style, error_style, header_style, loading_label, success_style};

pub(in crate::tui) fn draw_tabs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    current_tab: Tab,
) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| Line::from(format!("{} {}", index + 1, tab.title())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("batteryabn"),
        )
        .highlight_style(header_style())
        .select(current_tab.index());

    frame.render_widget(tabs, area);
}

/// Breadcrumb on the left; input field or notice on the right
pub(in crate::tui) fn draw_header(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let breadcrumb = Paragraph::new(format!("{}{}", app.routes.breadcrumb(), loading_label(app)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Route"),
        );
    frame.render_widget(breadcrumb, columns[0]);

    if app.accepts_input() {
        draw_input(frame, columns[1], app);
    } else {
        draw_notice(frame, columns[1], app.screen().notice());
    }
}

fn draw_input(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let editing = app.input_mode == InputMode::Editing;
    let title = match app.screen().notice() {
        Some(notice) if !editing => notice.text().to_string(),
        _ if editing => "Editing".to_string(),
        _ => "Input [i]".to_string(),
    };
    let style = match app.screen().notice() {
        Some(notice) if !editing && notice.is_error() => error_style(),
        Some(_) if !editing => success_style(),
        _ => border_style(),
    };

    let width = area.width.saturating_sub(2) as usize;
    let scroll = app.input.visual_scroll(width);
    let widget = Paragraph::new(app.input.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title),
        );
    frame.render_widget(widget, area);

    if editing {
        let cursor = app.input.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position(Position::new(area.x + 1 + cursor as u16, area.y + 1));
    }
}

fn draw_notice(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, notice: Option<&Notice>) {
    let (line, style) = match notice {
        Some(notice) => {
            let mut spans = vec![Span::raw(notice.text().to_string())];
            if let Some(detail) = notice.detail() {
                spans.push(Span::raw(format!(" - {detail}")));
            }
            let style = if notice.is_error() { error_style() } else { success_style() };
            (Line::from(spans), style)
        }
        None => (Line::from(""), border_style()),
    };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title("Notice [d]"),
    );
    frame.render_widget(widget, area);
}
