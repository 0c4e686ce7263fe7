use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::filter::FilterCriteria;
use crate::model::item::DisplayItem;

/// Error for user-entered date bounds
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parse a date bound typed by the user. Blank input clears the bound.
pub fn parse_date_bound(input: &str) -> Result<Option<NaiveDate>, FilterError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FilterError::InvalidDate(input.to_string()))
}

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Case-insensitive substring match on the item's own id or its owning
/// project id. `needle` must already be lowercased.
fn matches_search(item: &DisplayItem, needle: &str) -> bool {
    item.id.to_lowercase().contains(needle)
        || item
            .project
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains(needle))
}

fn passes(item: &DisplayItem, needle: &str, criteria: &FilterCriteria) -> bool {
    if !needle.is_empty() && !matches_search(item, needle) {
        return false;
    }
    if let Some(from) = criteria.from
        && item.end < at_midnight(from)
    {
        return false;
    }
    if let Some(to) = criteria.to
        && item.start > at_midnight(to)
    {
        return false;
    }
    true
}

/// Compute the visible subset of `items`. Criteria are combined with AND;
/// empty criteria return the whole list in order.
pub fn apply_filter(items: &[DisplayItem], criteria: &FilterCriteria) -> Vec<DisplayItem> {
    let needle = criteria.search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| passes(item, &needle, criteria))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::ProjectRecord;
    use crate::ops::mapper::map_records;
    use pretty_assertions::assert_eq;

    fn scenario_items() -> Vec<DisplayItem> {
        let records: Vec<ProjectRecord> = serde_json::from_str(
            r#"[{"id":"P1","start":"2024-01-10","end":"2024-01-01","urgency":"red",
                 "children":[{"id":"P1-C1","start":"2024-01-02","end":"2024-01-05","urgency":"green"}]},
                {"id":"P2","start":"2024-03-01","end":"2024-04-01",
                 "children":[{"id":"SP2_1","start":"2024-03-02","end":"2024-03-10"}]}]"#,
        )
        .unwrap();
        map_records(&records)
    }

    fn ids(items: &[DisplayItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_criteria_is_identity() {
        let items = scenario_items();
        assert_eq!(apply_filter(&items, &FilterCriteria::default()), items);
    }

    #[test]
    fn lower_bound_keeps_items_ending_after() {
        let items = scenario_items();
        let criteria = FilterCriteria {
            from: Some(date("2024-01-06")),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&items, &criteria)), vec!["P1", "P2", "SP2_1"]);
    }

    #[test]
    fn upper_bound_keeps_items_starting_before() {
        let items = scenario_items();
        let criteria = FilterCriteria {
            to: Some(date("2024-01-01")),
            ..Default::default()
        };
        // P1 starts exactly at the bound
        assert_eq!(ids(&apply_filter(&items, &criteria)), vec!["P1"]);
    }

    #[test]
    fn search_on_child_id_is_case_insensitive() {
        let items = scenario_items();
        let criteria = FilterCriteria {
            search: "p1-c1".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&items, &criteria)), vec!["P1-C1"]);
    }

    #[test]
    fn search_on_project_id_includes_children() {
        let items = scenario_items();
        let criteria = FilterCriteria {
            search: "P2".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&items, &criteria)), vec!["P2", "SP2_1"]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let items = scenario_items();
        let criteria = FilterCriteria {
            search: "p".into(),
            from: Some(date("2024-03-05")),
            to: Some(date("2024-03-05")),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filter(&items, &criteria)), vec!["P2", "SP2_1"]);

        let criteria = FilterCriteria {
            search: "p1".into(),
            from: Some(date("2024-03-05")),
            ..Default::default()
        };
        assert!(apply_filter(&items, &criteria).is_empty());
    }

    #[test]
    fn date_bound_parsing() {
        assert_eq!(parse_date_bound(""), Ok(None));
        assert_eq!(parse_date_bound(" 2024-01-06 "), Ok(Some(date("2024-01-06"))));
        assert_eq!(
            parse_date_bound("06/01/2024"),
            Err(FilterError::InvalidDate("06/01/2024".into()))
        );
    }
}
