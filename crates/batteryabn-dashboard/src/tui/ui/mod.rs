/*
[INPUT]:  TUI app state and the mounted screen
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: 2026-02-10 Re-export shared draw_tabs helper
[UPDATE]: 2026-10-07 Export header and screen body renderers
*/

mod layout;
mod logs;
mod screen;

pub(in crate::tui) use layout::{draw_header, draw_tabs};
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use screen::draw_screen;
