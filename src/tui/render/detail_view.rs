use chrono::NaiveDateTime;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::urgency::resolve_color;
use crate::ops::detail::{DetailRecord, NOT_AVAILABLE};
use crate::tui::app::App;
use crate::tui::theme::rgb;

use super::fit_cell;

const LABEL_W: usize = 18;

fn date_text(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}

fn field<'a>(label: &str, value: Option<&str>, label_style: Style, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {}", fit_cell(label, LABEL_W)), label_style),
        Span::styled(value.unwrap_or(NOT_AVAILABLE).to_string(), value_style),
    ])
}

/// One fixed-width table line
fn table_row<'a>(cells: &[&str], widths: &[usize], style: Style) -> Line<'a> {
    let text: String = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| fit_cell(c, *w))
        .collect::<Vec<_>>()
        .join(" ");
    Line::from(Span::styled(format!(" {}", text), style))
}

/// Render the detail panel for the selected project or subproject
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };

    let bg = app.theme.background;
    let title = if detail.is_subproject() {
        " Subproject Details "
    } else {
        " Project Details "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = detail_lines(app, detail);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn detail_lines<'a>(app: &App, detail: &DetailRecord) -> Vec<Line<'a>> {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text).bg(bg);
    let header = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'a>> = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", detail.id), label),
            Span::styled(detail.name.clone(), header),
        ]),
        Line::from(""),
    ];

    if let Some(parent) = &detail.parent_name {
        lines.push(field("Parent Project:", Some(parent), label, value));
    }

    // Status with a swatch in the chart color
    let status = detail.status_label.as_deref().unwrap_or(NOT_AVAILABLE);
    lines.push(Line::from(vec![
        Span::styled(format!(" {}", fit_cell("Status:", LABEL_W)), label),
        Span::styled(
            "\u{25A0} ",
            Style::default()
                .fg(rgb(resolve_color(detail.urgency.as_deref())))
                .bg(bg),
        ),
        Span::styled(status.to_string(), value),
    ]));

    let start = date_text(detail.start);
    let end = date_text(detail.end);
    lines.push(field("Start:", Some(&start), label, value));
    lines.push(field("ECD:", Some(&end), label, value));
    lines.push(field("Engineer:", detail.engineer.as_deref(), label, value));
    lines.push(field("Project Manager:", detail.manager.as_deref(), label, value));
    lines.push(field("Team:", detail.team.as_deref(), label, value));
    if let Some(reopen) = &detail.reopen {
        lines.push(field("Reopen:", Some(reopen), label, value));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Description", header)));
    lines.push(Line::from(Span::styled(
        format!(" {}", detail.description.as_deref().unwrap_or(NOT_AVAILABLE)),
        value,
    )));

    if app.features.finance && !detail.is_subproject() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Receivable Details", header)));
        let widths = [10, 12, 10, 20, 10, 16];
        lines.push(table_row(
            &["Invoice", "Service Date", "Due Date", "Status", "Amount", "Comments"],
            &widths,
            label,
        ));
        if detail.receivables.is_empty() {
            lines.push(Line::from(Span::styled(" No receivables", label)));
        }
        for r in &detail.receivables {
            lines.push(table_row(
                &[
                    r.invoice.as_str(),
                    r.service_date.as_str(),
                    r.due_date.as_str(),
                    r.status.as_str(),
                    r.amount.as_str(),
                    r.comments.as_str(),
                ],
                &widths,
                value,
            ));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Payable Details", header)));
        let widths = [10, 12, 12, 13, 10, 16];
        lines.push(table_row(
            &["Invoice No", "Invoice Date", "Booked Date", "Received Date", "Amount", "Comments"],
            &widths,
            label,
        ));
        if detail.payables.is_empty() {
            lines.push(Line::from(Span::styled(" No payables", label)));
        }
        for p in &detail.payables {
            lines.push(table_row(
                &[
                    p.invoice_no.as_str(),
                    p.invoice_date.as_str(),
                    p.booked_date.as_str(),
                    p.received_date.as_str(),
                    p.amount.as_str(),
                    p.comments.as_str(),
                ],
                &widths,
                value,
            ));
        }
    }

    lines
}
