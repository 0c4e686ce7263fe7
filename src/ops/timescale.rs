use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::model::filter::ViewMode;
use crate::model::item::DisplayItem;

/// Maps instants to horizontal cell offsets for one chart granularity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timescale {
    pub mode: ViewMode,
    /// First day of the first unit shown
    pub origin: NaiveDate,
    /// Number of units (days, months or years) covered
    pub units: u32,
}

/// Cells per unit for each granularity
pub fn cell_width(mode: ViewMode) -> u16 {
    match mode {
        ViewMode::Day => 3,
        ViewMode::Month => 8,
        ViewMode::Year => 12,
    }
}

/// Start of the unit containing `date`
fn unit_floor(mode: ViewMode, date: NaiveDate) -> NaiveDate {
    match mode {
        ViewMode::Day => date,
        ViewMode::Month => date.with_day(1).unwrap_or(date),
        ViewMode::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
}

fn add_units(mode: ViewMode, date: NaiveDate, n: u32) -> NaiveDate {
    match mode {
        ViewMode::Day => date + chrono::Duration::days(i64::from(n)),
        ViewMode::Month => date.checked_add_months(Months::new(n)).unwrap_or(date),
        ViewMode::Year => date
            .checked_add_months(Months::new(n.saturating_mul(12)))
            .unwrap_or(date),
    }
}

fn sub_unit(mode: ViewMode, date: NaiveDate) -> NaiveDate {
    match mode {
        ViewMode::Day => date - chrono::Duration::days(1),
        ViewMode::Month => date.checked_sub_months(Months::new(1)).unwrap_or(date),
        ViewMode::Year => date.checked_sub_months(Months::new(12)).unwrap_or(date),
    }
}

/// Whole units between two unit-aligned dates
fn units_between(mode: ViewMode, from: NaiveDate, to: NaiveDate) -> i64 {
    match mode {
        ViewMode::Day => (to - from).num_days(),
        ViewMode::Month => {
            i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
        }
        ViewMode::Year => i64::from(to.year() - from.year()),
    }
}

impl Timescale {
    /// Scale covering every item with one unit of padding on each side.
    /// An empty list yields the units around `today`.
    pub fn fit(items: &[DisplayItem], mode: ViewMode, today: NaiveDate) -> Timescale {
        let min = items.iter().map(|i| i.start.date()).min().unwrap_or(today);
        let max = items.iter().map(|i| i.end.date()).max().unwrap_or(today);
        let origin = sub_unit(mode, unit_floor(mode, min));
        let last = unit_floor(mode, max);
        let span = units_between(mode, origin, last).max(0) as u32;
        Timescale {
            mode,
            origin,
            units: span + 2,
        }
    }

    /// Total chart width in cells
    pub fn width(&self) -> u32 {
        self.units * u32::from(cell_width(self.mode))
    }

    /// Fractional cell offset of an instant (may be negative or past the end)
    pub fn offset(&self, at: NaiveDateTime) -> f64 {
        let date = at.date();
        let unit_start = unit_floor(self.mode, date);
        let whole = units_between(self.mode, self.origin, unit_start) as f64;
        let next = add_units(self.mode, unit_start, 1);
        let unit_secs = (next.and_time(chrono::NaiveTime::MIN)
            - unit_start.and_time(chrono::NaiveTime::MIN))
        .num_seconds()
        .max(1) as f64;
        let into = (at - unit_start.and_time(chrono::NaiveTime::MIN)).num_seconds() as f64;
        (whole + into / unit_secs) * f64::from(cell_width(self.mode))
    }

    /// Cell range `[start, end)` for a bar, at least one cell wide
    pub fn bar(&self, start: NaiveDateTime, end: NaiveDateTime) -> (i64, i64) {
        let s = self.offset(start).floor() as i64;
        let e = self.offset(end).ceil() as i64;
        (s, e.max(s + 1))
    }

    /// Column labels: cell offset and text for every unit
    pub fn labels(&self) -> Vec<(u32, String)> {
        let w = u32::from(cell_width(self.mode));
        (0..self.units)
            .map(|i| {
                let date = add_units(self.mode, self.origin, i);
                let text = match self.mode {
                    ViewMode::Day => format!("{:02}", date.day()),
                    ViewMode::Month => date.format("%b %y").to_string(),
                    ViewMode::Year => date.format("%Y").to_string(),
                };
                (i * w, text)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{BarColors, ItemKind};
    use crate::model::urgency::DEFAULT_COLOR;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn item(start: &str, end: &str) -> DisplayItem {
        DisplayItem {
            id: "X".into(),
            label: "X".into(),
            start: d(start).and_hms_opt(0, 0, 0).unwrap(),
            end: d(end).and_hms_opt(0, 0, 0).unwrap(),
            kind: ItemKind::Project,
            project: None,
            ordinal: None,
            colors: BarColors::solid(DEFAULT_COLOR),
            reopen: None,
        }
    }

    #[test]
    fn month_scale_pads_one_unit_each_side() {
        let items = vec![item("2024-01-10", "2024-03-05")];
        let scale = Timescale::fit(&items, ViewMode::Month, d("2000-01-01"));
        assert_eq!(scale.origin, d("2023-12-01"));
        // Dec, Jan, Feb, Mar, Apr
        assert_eq!(scale.units, 5);
        assert_eq!(scale.width(), 40);
        assert_eq!(scale.labels()[1], (8, "Jan 24".to_string()));
    }

    #[test]
    fn day_offsets_are_linear() {
        let items = vec![item("2024-01-02", "2024-01-05")];
        let scale = Timescale::fit(&items, ViewMode::Day, d("2000-01-01"));
        assert_eq!(scale.origin, d("2024-01-01"));
        let (s, e) = scale.bar(items[0].start, items[0].end);
        assert_eq!((s, e), (3, 12));
    }

    #[test]
    fn zero_length_bar_is_one_cell() {
        let items = vec![item("2024-06-15", "2024-06-15")];
        let scale = Timescale::fit(&items, ViewMode::Year, d("2000-01-01"));
        let (s, e) = scale.bar(items[0].start, items[0].end);
        assert_eq!(e - s, 1);
    }

    #[test]
    fn empty_list_centers_on_today() {
        let scale = Timescale::fit(&[], ViewMode::Year, d("2025-07-01"));
        assert_eq!(scale.origin, d("2024-01-01"));
        // 2024, 2025, 2026
        assert_eq!(scale.units, 3);
    }
}
