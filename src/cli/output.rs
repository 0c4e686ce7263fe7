use crate::model::DisplayItem;
use crate::ops::detail::{DetailRecord, NOT_AVAILABLE};

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a display row as a one-line summary.
/// Subprojects are indented and carry their `S<n>` ordinal.
pub fn format_item_line(item: &DisplayItem) -> String {
    let badge = item
        .ordinal
        .map(|n| format!(" S{}", n))
        .unwrap_or_default();
    let reopen = item
        .reopen
        .as_ref()
        .map(|r| format!(" [{}]", r))
        .unwrap_or_default();
    let id = format!("{}{}", item.id, badge);
    let indent = if item.is_child() { "  " } else { "" };
    format!(
        "{}{:<14} {} {}  {}{}",
        indent,
        id,
        item.start.format("%Y-%m-%d"),
        item.end.format("%Y-%m-%d"),
        item.label,
        reopen
    )
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    lines.push(format!("{:<17}{}", label, value.unwrap_or(NOT_AVAILABLE)));
}

/// Format the detail view for a project or subproject
pub fn format_detail(detail: &DetailRecord, finance: bool) -> Vec<String> {
    let mut lines = Vec::new();

    // Header
    lines.push(format!("{} {}", detail.id, detail.name));
    lines.push(String::new());

    if let Some(parent) = &detail.parent_name {
        push_field(&mut lines, "Parent Project:", Some(parent));
    }
    push_field(&mut lines, "Status:", detail.status_label.as_deref());
    let date = |d: Option<chrono::NaiveDateTime>| d.map(|d| d.format("%Y-%m-%d").to_string());
    push_field(&mut lines, "Start:", date(detail.start).as_deref());
    push_field(&mut lines, "ECD:", date(detail.end).as_deref());
    push_field(&mut lines, "Engineer:", detail.engineer.as_deref());
    push_field(&mut lines, "Project Manager:", detail.manager.as_deref());
    push_field(&mut lines, "Team:", detail.team.as_deref());
    if let Some(reopen) = &detail.reopen {
        push_field(&mut lines, "Reopen:", Some(reopen));
    }
    push_field(&mut lines, "Description:", detail.description.as_deref());

    if finance && !detail.is_subproject() {
        lines.push(String::new());
        lines.push("Receivable Details".to_string());
        if detail.receivables.is_empty() {
            lines.push("  (none)".to_string());
        }
        for r in &detail.receivables {
            lines.push(format!(
                "  {}  service {}  due {}  {}  {}  {}",
                r.invoice, r.service_date, r.due_date, r.status, r.amount, r.comments
            ));
        }

        lines.push(String::new());
        lines.push("Payable Details".to_string());
        if detail.payables.is_empty() {
            lines.push("  (none)".to_string());
        }
        for p in &detail.payables {
            lines.push(format!(
                "  {}  invoiced {}  booked {}  received {}  {}  {}",
                p.invoice_no, p.invoice_date, p.booked_date, p.received_date, p.amount, p.comments
            ));
        }
    }

    lines
}
