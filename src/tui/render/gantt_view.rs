use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::DisplayItem;
use crate::model::urgency::Rgb;
use crate::ops::timescale::{Timescale, cell_width};
use crate::tui::app::App;
use crate::tui::theme::rgb;
use crate::util::unicode;

use super::{fit_cell, push_highlighted_spans, spans_width};

const ID_W: usize = 14;
const PM_W: usize = 8;
const DATE_W: usize = 10;
const REOPEN_MIN_W: usize = 4;
/// ID, PM, START and ECD columns plus one separator cell after each
pub const HEADER_W: usize = ID_W + PM_W + DATE_W * 2 + 4;

pub const EMPTY_PLACEHOLDER: &str = "No valid tasks to display...";
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Render the Gantt chart: column titles, then one line per visible row
pub fn render_gantt_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.is_loading() || app.visible.is_empty() {
        let text = if app.is_loading() {
            LOADING_PLACEHOLDER
        } else {
            EMPTY_PLACEHOLDER
        };
        let placeholder = Paragraph::new(vec![Line::from(""), Line::from(text)])
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(placeholder, area);
        return;
    }

    // Keep the cursor on screen
    let rows_h = (area.height as usize).saturating_sub(1).max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + rows_h {
        app.scroll_offset = app.cursor + 1 - rows_h;
    }

    let body_w = (area.width as usize).saturating_sub(HEADER_W);
    let scale = app.timescale();

    let mut lines: Vec<Line> = Vec::with_capacity(rows_h + 1);
    lines.push(column_titles(app, &scale, body_w));

    let search_re = app.search_re();
    for (idx, item) in app
        .visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(rows_h)
    {
        let selected = idx == app.cursor;
        let mut spans = render_row_header(app, item, selected, search_re.as_ref());
        spans.extend(render_row_body(app, item, &scale, body_w, selected));
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn column_titles<'a>(app: &App, scale: &Timescale, body_w: usize) -> Line<'a> {
    let bg = app.theme.background;
    let title = Style::default()
        .fg(app.theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let header = format!(
        "{} {} {} {} ",
        fit_cell("ID", ID_W),
        fit_cell("PM", PM_W),
        fit_cell("START", DATE_W),
        fit_cell("ECD", DATE_W)
    );

    // Unit labels, each clipped to its own cell span
    let mut ruler = vec![' '; body_w];
    let cw = usize::from(cell_width(scale.mode));
    let scroll = app.timeline_scroll as usize;
    for (offset, text) in scale.labels() {
        let start = offset as usize;
        for (i, c) in text.chars().take(cw.saturating_sub(1)).enumerate() {
            if let Some(x) = (start + i).checked_sub(scroll)
                && x < body_w
            {
                ruler[x] = c;
            }
        }
    }

    Line::from(vec![
        Span::styled(header, title),
        Span::styled(
            ruler.into_iter().collect::<String>(),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ])
}

/// Row header: ID with subproject/reopen badges, PM first name, start, ECD.
pub fn render_row_header<'a>(
    app: &App,
    item: &DisplayItem,
    selected: bool,
    search_re: Option<&regex::Regex>,
) -> Vec<Span<'a>> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let text = Style::default().fg(app.theme.text).bg(row_bg);
    let id_style = if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        text
    };
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let badge = Style::default()
        .fg(app.theme.badge_fg)
        .bg(app.theme.badge_bg)
        .add_modifier(Modifier::BOLD);

    let indent = if item.is_child() { " " } else { "" };
    let ordinal = item
        .ordinal
        .filter(|_| app.features.badges)
        .map(|n| format!("S{}", n));
    let reopen = item.reopen.as_deref().filter(|_| app.features.badges);

    // The ID yields cells so the reopen marker stays readable
    let mut room = ID_W.saturating_sub(indent.len());
    if let Some(s) = &ordinal {
        room = room.saturating_sub(s.len() + 1);
    }
    let reopen_min = reopen.map_or(0, |r| unicode::display_width(r).min(REOPEN_MIN_W) + 1);
    let id_text = unicode::truncate_to_width(&item.id, room.saturating_sub(reopen_min));

    let mut badges: Vec<String> = ordinal.into_iter().collect();
    if let Some(r) = reopen {
        let left = room.saturating_sub(unicode::display_width(&id_text) + 1);
        badges.push(unicode::truncate_to_width(r, left));
    }

    let mut spans: Vec<Span<'a>> = vec![Span::styled(indent.to_string(), text)];
    push_highlighted_spans(&mut spans, &id_text, id_style, match_style, search_re);
    for b in badges.into_iter().filter(|b| !b.is_empty()) {
        spans.push(Span::styled(" ", text));
        spans.push(Span::styled(b, badge));
    }
    let used = spans_width(&spans);
    spans.push(Span::styled(
        " ".repeat(ID_W.saturating_sub(used) + 1),
        text,
    ));

    let pm = app
        .project_manager(item.project_id())
        .and_then(|m| m.split_whitespace().next())
        .unwrap_or("");
    spans.push(Span::styled(format!("{} ", fit_cell(pm, PM_W)), text));
    spans.push(Span::styled(
        format!("{} ", item.start.format("%Y-%m-%d")),
        text,
    ));
    spans.push(Span::styled(format!("{} ", item.end.format("%Y-%m-%d")), text));
    spans
}

/// Readable label color on top of a bar fill
fn label_color(fill: Rgb) -> Color {
    let luma = (299 * u32::from(fill.0) + 587 * u32::from(fill.1) + 114 * u32::from(fill.2)) / 1000;
    if luma > 150 {
        Color::Rgb(0, 0, 0)
    } else {
        Color::Rgb(0xFF, 0xFF, 0xFF)
    }
}

/// Row body: the item's bar on the shared scale, with grid and today marker.
pub fn render_row_body<'a>(
    app: &App,
    item: &DisplayItem,
    scale: &Timescale,
    width: usize,
    selected: bool,
) -> Vec<Span<'a>> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let (bar_start, bar_end) = scale.bar(item.start, item.end);
    let today = scale.offset(app.today.and_time(chrono::NaiveTime::MIN)).floor() as i64;
    let cw = i64::from(cell_width(scale.mode));
    let fill = rgb(item.colors.background);
    let label_fg = label_color(item.colors.progress);
    let label: Vec<char> = item.label.chars().collect();

    let mut spans = Vec::with_capacity(width);
    for x in 0..width {
        let g = i64::from(app.timeline_scroll) + x as i64;
        let span = if (bar_start..bar_end).contains(&g) {
            let style = Style::default().fg(label_fg).bg(fill);
            let rel = (g - bar_start) as usize;
            let last = g == bar_end - 1;
            if item.colors.outlined && rel == 0 {
                Span::styled("\u{258F}", style.fg(app.theme.dim))
            } else if item.colors.outlined && last {
                Span::styled("\u{2595}", style.fg(app.theme.dim))
            } else {
                // Name written inside the bar, clipped to its length
                let c = label.get(rel).copied().unwrap_or(' ');
                Span::styled(c.to_string(), style)
            }
        } else if g == today {
            Span::styled("\u{2502}", Style::default().fg(app.theme.red).bg(row_bg))
        } else if g % cw == 0 {
            Span::styled("\u{250A}", Style::default().fg(app.theme.grid).bg(row_bg))
        } else {
            Span::styled(" ", Style::default().bg(row_bg))
        };
        spans.push(span);
    }
    spans
}
