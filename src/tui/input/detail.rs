use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// Keys while the detail panel is open
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.close_detail(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => app.detail_scroll = 0,
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}
