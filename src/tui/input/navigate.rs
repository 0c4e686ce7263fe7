use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Bound, Mode};

/// Horizontal scroll step, in cells
const SCROLL_STEP: i32 = 8;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Clear any transient status message on keypress
    app.status_message = None;

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::PageDown) => app.move_cursor(10),
        (_, KeyCode::PageUp) => app.move_cursor(-10),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible.len().saturating_sub(1);
        }

        (_, KeyCode::Char('h') | KeyCode::Left) => app.scroll_timeline(-SCROLL_STEP),
        (_, KeyCode::Char('l') | KeyCode::Right) => app.scroll_timeline(SCROLL_STEP),

        (_, KeyCode::Enter) => app.activate_cursor(),

        (_, KeyCode::Char('/')) if app.features.search => {
            app.search_input = app.criteria.search.clone();
            app.mode = Mode::Search;
        }
        (_, KeyCode::Char('c')) if app.features.search => app.clear_search(),

        (_, KeyCode::Char('f')) => begin_date_entry(app, Bound::From),
        (_, KeyCode::Char('t')) => begin_date_entry(app, Bound::To),
        (m, KeyCode::Char('C')) if !m.contains(KeyModifiers::CONTROL) => app.clear_dates(),

        (_, KeyCode::Char('v')) => {
            let next = app.criteria.view_mode.next();
            app.set_view_mode(next);
        }

        (_, KeyCode::Char('R')) => {
            if !app.is_loading() {
                app.start_load();
            }
        }

        (_, KeyCode::Char('?')) => app.show_help = true,

        _ => {}
    }
}

fn begin_date_entry(app: &mut App, bound: Bound) {
    app.date_input = app
        .bound(bound)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    app.mode = Mode::DateEntry(bound);
}
