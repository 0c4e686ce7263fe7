use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::filter::parse_date_bound;
use crate::tui::app::{App, Bound, Mode};

use super::pop_grapheme;

pub(super) fn handle_date_entry(app: &mut App, key: KeyEvent, bound: Bound) {
    match key.code {
        KeyCode::Esc => {
            app.date_input.clear();
            app.status_message = None;
            app.mode = Mode::Navigate;
        }
        // An empty buffer clears the bound
        KeyCode::Enter => match parse_date_bound(&app.date_input) {
            Ok(date) => {
                app.set_bound(bound, date);
                app.date_input.clear();
                app.status_message = None;
                app.mode = Mode::Navigate;
            }
            Err(e) => {
                tracing::debug!(input = %app.date_input, "rejected date bound");
                app.status_message = Some(e.to_string());
            }
        },
        KeyCode::Backspace => pop_grapheme(&mut app.date_input),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if app.date_input.len() < 10 {
                app.date_input.push(c);
            }
        }
        _ => {}
    }
}
