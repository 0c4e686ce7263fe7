use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Chart time granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Day,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    /// Stored preference value
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Month => "Month",
            ViewMode::Year => "Year",
        }
    }

    pub fn parse(s: &str) -> Option<ViewMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Some(ViewMode::Day),
            "month" => Some(ViewMode::Month),
            "year" => Some(ViewMode::Year),
            _ => None,
        }
    }

    /// Day -> Month -> Year -> Day
    pub fn next(self) -> ViewMode {
        match self {
            ViewMode::Day => ViewMode::Month,
            ViewMode::Month => ViewMode::Year,
            ViewMode::Year => ViewMode::Day,
        }
    }
}

/// The user's current filter selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Effective (debounced) search text
    pub search: String,
    /// Keep items ending on or after this date
    pub from: Option<NaiveDate>,
    /// Keep items starting on or before this date
    pub to: Option<NaiveDate>,
    pub view_mode: ViewMode,
}

impl FilterCriteria {
    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    pub fn has_dates(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}
