use std::path::PathBuf;

use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::fetch::{DataSource, parse_records};
use crate::io::prefs::PrefStore;
use crate::model::Config;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Two projects with subprojects, one undated child, and finance rows on P1.
pub const SAMPLE_JSON: &str = r#"[
  {
    "id": "P1",
    "name": "Water Plant",
    "start": "2024-01-01",
    "end": "2024-01-10",
    "urgency": "red",
    "project_manager": "Alice Smith",
    "p_team": "Team A",
    "assign_to": "Bob",
    "project_details": "Pump upgrade",
    "children": [
      { "id": "P1-C1", "name": "Survey", "start": "2024-01-02", "end": "2024-01-05", "urgency": "green" },
      { "id": "P1-C2", "name": "Install", "start": "2024-01-06", "end": "2024-01-09", "urgency": "white", "reopen_status": "Reopened" }
    ],
    "invoices": [
      { "invoice_number": "INV-1", "due_date": "2024-02-01", "payment_status": "paid", "amount": 1500 }
    ],
    "ready_to_invoice": [
      { "service_date": "2024-01-20", "price": 0 }
    ],
    "unpaid_invoices": [
      { "invoice_no": "U-7", "amount": "200.5", "comments": "late" }
    ]
  },
  {
    "id": "P2",
    "name": "Road Survey",
    "start": "2024-02-01",
    "end": "2024-03-01",
    "urgency": "yellow",
    "project_manager": "Carol"
  },
  {
    "id": "P3",
    "name": "Bridge",
    "start": "2024-03-01",
    "end": "2024-04-01",
    "children": [
      { "id": "P3-C1", "name": "No dates" }
    ]
  }
]"#;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn test_source() -> DataSource {
    DataSource::File(PathBuf::from("/tmp/ganttboard-test.json"))
}

/// An app with no data loaded and in-memory prefs
pub fn empty_app() -> App {
    let mut app = App::new(test_source(), &Config::default(), PrefStore::in_memory());
    app.today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    app
}

/// An app holding the parsed records from `json`
pub fn app_with_records(json: &str) -> App {
    let mut app = empty_app();
    app.set_records(parse_records(json, "test").unwrap());
    app
}

pub fn visible_ids(app: &App) -> Vec<&str> {
    app.visible.iter().map(|i| i.id.as_str()).collect()
}
