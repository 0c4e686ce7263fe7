use chrono::NaiveDateTime;
use serde::Serialize;

use super::urgency::Rgb;

/// Whether a display row stands for a project or one of its subprojects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Project,
    ChildTask,
}

/// Bar colors handed to the chart: progress fill, background fill, and
/// whether the bar needs an outline because the fill is near white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarColors {
    pub progress: Rgb,
    pub background: Rgb,
    pub outlined: bool,
}

impl BarColors {
    pub fn solid(color: Rgb) -> Self {
        BarColors {
            progress: color,
            background: color,
            outlined: color.is_near_white(),
        }
    }
}

/// One flattened, renderable row of the Gantt chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    pub id: String,
    pub label: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub kind: ItemKind,
    /// Owning project id (children only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// 1-based position among the parent's subprojects (children only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,
    pub colors: BarColors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reopen: Option<String>,
}

impl DisplayItem {
    /// The project this row belongs to: its own id for projects
    pub fn project_id(&self) -> &str {
        self.project.as_deref().unwrap_or(&self.id)
    }

    pub fn is_child(&self) -> bool {
        self.kind == ItemKind::ChildTask
    }
}
