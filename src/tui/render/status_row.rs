use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, LoadState, Mode};
use crate::util::unicode;

use super::spans_width;

/// Pad `spans` so that `hint` ends flush with the right edge, if it fits
fn push_right_hint<'a>(spans: &mut Vec<Span<'a>>, hint: String, style: Style, width: usize) {
    let used = spans_width(spans);
    let hint_w = unicode::display_width(&hint);
    if used + hint_w < width {
        spans.push(Span::styled(" ".repeat(width - used - hint_w), style));
        spans.push(Span::styled(hint, style));
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let error = Style::default().fg(app.theme.red).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor = Style::default().fg(app.theme.highlight).bg(bg);

    let line = match app.mode {
        Mode::Search => {
            // Search prompt: /pattern▌
            let mut spans = vec![
                Span::styled(format!("/{}", app.search_input), bright),
                Span::styled("\u{258C}", cursor),
            ];
            push_right_hint(&mut spans, "Enter apply  Esc cancel".into(), dim, width);
            Line::from(spans)
        }
        Mode::DateEntry(bound) => {
            let mut spans = vec![
                Span::styled(format!("{}: {}", bound.label(), app.date_input), bright),
                Span::styled("\u{258C}", cursor),
            ];
            match &app.status_message {
                Some(msg) => push_right_hint(&mut spans, msg.clone(), error, width),
                None => push_right_hint(
                    &mut spans,
                    "YYYY-MM-DD  empty clears  Enter set  Esc cancel".into(),
                    dim,
                    width,
                ),
            }
            Line::from(spans)
        }
        Mode::Navigate => {
            let mut spans: Vec<Span> = Vec::new();
            if let Some(msg) = &app.status_message {
                spans.push(Span::styled(format!(" {}", msg), error));
            } else if let LoadState::Failed(msg) = &app.load_state {
                spans.push(Span::styled(format!(" load failed: {}", msg), error));
            } else if app.is_loading() {
                spans.push(Span::styled(" loading\u{2026}", dim));
            }
            let hint = if app.detail.is_some() {
                "jk scroll  Esc close  ? help"
            } else {
                "/ search  f/t dates  v view  R reload  ? help"
            };
            push_right_hint(&mut spans, hint.into(), dim, width);
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
