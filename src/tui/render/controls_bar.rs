use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Bound, Mode};

use super::spans_width;

fn bound_text(app: &App, bound: Bound) -> String {
    // Show the live buffer while that bound is being edited
    if app.mode == Mode::DateEntry(bound) {
        return format!("{}\u{258C}", app.date_input);
    }
    app.bound(bound)
        .map(|d: NaiveDate| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "\u{2014}".to_string())
}

/// Render the controls bar: title, view mode, date bounds, search, row count
pub fn render_controls_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text_bright).bg(bg);
    let active = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let sep = Span::styled("  ", Style::default().bg(bg));

    let mut spans = vec![
        Span::styled(
            " Gantt ",
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled("View: ", label),
        Span::styled(app.criteria.view_mode.as_str(), value),
    ];

    for bound in [Bound::From, Bound::To] {
        let style = if app.mode == Mode::DateEntry(bound) {
            active
        } else {
            value
        };
        spans.push(sep.clone());
        spans.push(Span::styled(
            match bound {
                Bound::From => "From: ",
                Bound::To => "To: ",
            },
            label,
        ));
        spans.push(Span::styled(bound_text(app, bound), style));
    }

    if app.features.search && (app.criteria.has_search() || app.mode == Mode::Search) {
        let (text, style) = if app.mode == Mode::Search {
            (format!("{}\u{258C}", app.search_input), active)
        } else {
            (app.criteria.search.clone(), value)
        };
        spans.push(sep.clone());
        spans.push(Span::styled("Search: ", label));
        spans.push(Span::styled(text, style));
    }

    let mut clear_keys = Vec::new();
    if app.features.search && app.criteria.has_search() {
        clear_keys.push("c");
    }
    if app.criteria.has_dates() {
        clear_keys.push("C");
    }
    if !clear_keys.is_empty() && app.mode == Mode::Navigate {
        spans.push(sep.clone());
        spans.push(Span::styled(format!("({} clear)", clear_keys.join("/")), label));
    }

    // Right-aligned row count
    let count = format!("{}/{} rows ", app.visible.len(), app.items.len());
    let used = spans_width(&spans);
    if used + count.len() < width {
        spans.push(Span::styled(
            " ".repeat(width - used - count.len()),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(count, label));
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.grid).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(spans), separator])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_view_mode_bounds_and_count() {
        let mut app = app_with_records(SAMPLE_JSON);
        app.set_bound(Bound::From, NaiveDate::from_ymd_opt(2024, 1, 6));
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_controls_bar(frame, &app, area);
        });
        assert!(out.contains("View: Month"));
        assert!(out.contains("From: 2024-01-06"));
        assert!(out.contains("To: \u{2014}"));
        assert!(out.contains("4/5 rows"));
        assert!(out.contains("(C clear)"));
    }

    #[test]
    fn shows_live_search_input() {
        let mut app = app_with_records(SAMPLE_JSON);
        app.mode = Mode::Search;
        app.search_input = "p1".into();
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_controls_bar(frame, &app, area);
        });
        assert!(out.contains("Search: p1"));
    }

    #[test]
    fn search_hidden_when_feature_off() {
        let mut app = app_with_records(SAMPLE_JSON);
        app.apply_search("P2".into());
        app.features.search = false;
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_controls_bar(frame, &app, area);
        });
        assert!(!out.contains("Search:"));
    }
}
