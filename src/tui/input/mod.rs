mod date_entry;
mod detail;
mod navigate;
mod search;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::util::unicode;

use date_entry::handle_date_entry;
use detail::handle_detail;
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts everything
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Search => handle_search(app, key, now),
        Mode::DateEntry(bound) => handle_date_entry(app, key, bound),
        Mode::Navigate if app.detail.is_some() => handle_detail(app, key),
        Mode::Navigate => handle_navigate(app, key),
    }
}

/// Remove the last grapheme from a text buffer
fn pop_grapheme(buf: &mut String) {
    if let Some(at) = unicode::prev_grapheme_boundary(buf, buf.len()) {
        buf.truncate(at);
    }
}
