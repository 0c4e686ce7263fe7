use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

use super::pop_grapheme;

pub(super) fn handle_search(app: &mut App, key: KeyEvent, now: Instant) {
    match (key.modifiers, key.code) {
        // Cancel: drop anything not yet applied
        (_, KeyCode::Esc) => {
            app.search_debounce.cancel();
            app.search_input = app.criteria.search.clone();
            app.mode = Mode::Navigate;
        }

        // Apply now and leave the prompt
        (_, KeyCode::Enter) => {
            app.flush_search();
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            pop_grapheme(&mut app.search_input);
            app.edit_search(now);
        }

        // Ctrl+U clears the prompt
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear();
            app.edit_search(now);
        }

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            app.edit_search(now);
        }

        _ => {}
    }
}
