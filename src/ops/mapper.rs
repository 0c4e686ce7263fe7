use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::item::{BarColors, DisplayItem, ItemKind};
use crate::model::record::{ChildRecord, ProjectRecord, non_empty};
use crate::model::urgency::resolve_color;

/// Parse a backend date string into an instant.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS` and
/// bare `YYYY-MM-DD` (midnight). Blank and zero dates are rejected.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() || s.starts_with("0000-00-00") {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse both ends of a span, swapping them if inverted.
/// Returns `None` if either end is missing or unparsable.
fn parse_span(start: Option<&str>, end: Option<&str>) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = parse_instant(start?)?;
    let end = parse_instant(end?)?;
    if end < start {
        Some((end, start))
    } else {
        Some((start, end))
    }
}

fn reopen_marker(value: Option<&str>) -> Option<String> {
    non_empty(value).map(|s| s.trim().to_string())
}

fn project_item(record: &ProjectRecord) -> Option<DisplayItem> {
    let (start, end) = parse_span(record.start.as_deref(), record.end.as_deref())?;
    Some(DisplayItem {
        id: record.id.clone(),
        label: record.display_name().to_string(),
        start,
        end,
        kind: ItemKind::Project,
        project: None,
        ordinal: None,
        colors: BarColors::solid(resolve_color(record.urgency.as_deref())),
        reopen: reopen_marker(record.reopen_status.as_deref()),
    })
}

fn child_item(parent_id: &str, child: &ChildRecord, index: usize) -> Option<DisplayItem> {
    let (start, end) = parse_span(child.start.as_deref(), child.end.as_deref())?;
    Some(DisplayItem {
        id: child.id.clone(),
        label: format!("\u{2192} {}", child.display_name()),
        start,
        end,
        kind: ItemKind::ChildTask,
        project: Some(parent_id.to_string()),
        ordinal: Some(index + 1),
        colors: BarColors::solid(resolve_color(child.urgency.as_deref())),
        reopen: reopen_marker(child.reopen_status.as_deref()),
    })
}

/// Flatten one project into its display rows: the project itself followed
/// by each valid child in original order.
///
/// A project with a missing or unparsable date yields nothing, children
/// included. Children with bad dates are skipped. A child's ordinal is its
/// position in the original children list, so skipped siblings do not
/// renumber the rest.
pub fn map_record(record: &ProjectRecord) -> Vec<DisplayItem> {
    let Some(project) = project_item(record) else {
        return Vec::new();
    };
    let mut items = Vec::with_capacity(record.children.len() + 1);
    items.push(project);
    items.extend(
        record
            .children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| child_item(&record.id, child, i)),
    );
    items
}

/// Flatten every project, preserving input order
pub fn map_records(records: &[ProjectRecord]) -> Vec<DisplayItem> {
    records.iter().flat_map(map_record).collect()
}
