use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::fetch::{DataSource, LoadEvent, Loader};
use crate::io::prefs::{PrefKey, PrefStore};
use crate::model::{Config, DisplayItem, FeatureConfig, FilterCriteria, ProjectRecord, ViewMode};
use crate::ops::detail::{DetailRecord, resolve_detail};
use crate::ops::filter::apply_filter;
use crate::ops::mapper::map_records;
use crate::ops::timescale::Timescale;

use super::debounce::Debouncer;
use super::input;
use super::render;
use super::theme::Theme;

/// Which date bound is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    From,
    To,
}

impl Bound {
    pub fn label(self) -> &'static str {
        match self {
            Bound::From => "from",
            Bound::To => "to",
        }
    }

    fn pref_key(self) -> PrefKey {
        match self {
            Bound::From => PrefKey::FilterStart,
            Bound::To => PrefKey::FilterEnd,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    DateEntry(Bound),
}

/// Progress of the schedule fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Main application state
pub struct App {
    /// Backing records from the last completed load
    pub records: Vec<ProjectRecord>,
    /// Every mapped row, in chart order
    pub items: Vec<DisplayItem>,
    /// Rows passing the current criteria
    pub visible: Vec<DisplayItem>,
    pub criteria: FilterCriteria,
    pub features: FeatureConfig,
    pub prefs: PrefStore,
    pub theme: Theme,
    pub mode: Mode,
    pub load_state: LoadState,
    pub should_quit: bool,
    pub show_help: bool,
    /// Search text as typed; applied to `criteria` after the debounce
    pub search_input: String,
    pub search_debounce: Debouncer<String>,
    /// Buffer for the date bound being edited
    pub date_input: String,
    /// Cursor index into `visible`
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Horizontal timeline scroll, in cells
    pub timeline_scroll: u32,
    /// Id of the row whose detail is open
    pub selected_id: Option<String>,
    pub detail: Option<DetailRecord>,
    pub detail_scroll: u16,
    /// Transient message for the status row (errors, confirmations)
    pub status_message: Option<String>,
    pub source: DataSource,
    pub today: NaiveDate,
    loader: Option<Loader>,
}

impl App {
    /// Build the app, reading initial filter values from `prefs` once
    pub fn new(source: DataSource, config: &Config, prefs: PrefStore) -> Self {
        let features = config.features;
        let view_mode = prefs
            .get(PrefKey::ViewMode)
            .and_then(ViewMode::parse)
            .unwrap_or_default();
        let parse_bound =
            |key| prefs.get(key).and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        let search = if features.search {
            prefs.get(PrefKey::SearchTerm).unwrap_or_default().to_string()
        } else {
            String::new()
        };
        let criteria = FilterCriteria {
            search: search.clone(),
            from: parse_bound(PrefKey::FilterStart),
            to: parse_bound(PrefKey::FilterEnd),
            view_mode,
        };

        App {
            records: Vec::new(),
            items: Vec::new(),
            visible: Vec::new(),
            criteria,
            features,
            prefs,
            theme: Theme::from_config(&config.ui),
            mode: Mode::Navigate,
            load_state: LoadState::Ready,
            should_quit: false,
            show_help: false,
            search_input: search,
            search_debounce: Debouncer::new(Duration::from_millis(config.ui.debounce_ms)),
            date_input: String::new(),
            cursor: 0,
            scroll_offset: 0,
            timeline_scroll: 0,
            selected_id: None,
            detail: None,
            detail_scroll: 0,
            status_message: None,
            source,
            today: Local::now().date_naive(),
            loader: None,
        }
    }

    // -----------------------------------------------------------------------
    // Data
    // -----------------------------------------------------------------------

    /// Start a background load of the schedule
    pub fn start_load(&mut self) {
        tracing::info!(source = %self.source.describe(), "loading schedule");
        self.loader = Some(Loader::spawn(self.source.clone()));
        self.load_state = LoadState::Loading;
    }

    /// Apply a finished background load, if any
    pub fn poll_loader(&mut self) {
        let Some(event) = self.loader.as_ref().and_then(Loader::poll) else {
            return;
        };
        self.loader = None;
        match event {
            LoadEvent::Loaded(records) => self.set_records(records),
            LoadEvent::Failed(message) => {
                self.set_records(Vec::new());
                self.load_state = LoadState::Failed(message.clone());
                self.status_message = Some(message);
            }
        }
    }

    /// Replace the whole schedule and re-run the mapper
    pub fn set_records(&mut self, records: Vec<ProjectRecord>) {
        self.items = map_records(&records);
        self.records = records;
        self.load_state = LoadState::Ready;
        tracing::debug!(rows = self.items.len(), "schedule mapped");

        // Refresh an open detail against the new data, or close it if gone
        if let Some(id) = self.selected_id.clone() {
            self.detail = resolve_detail(&self.records, &id);
            if self.detail.is_none() {
                self.selected_id = None;
            }
        }
        self.recompute_visible();
    }

    /// Re-run the filter over the mapped rows
    pub fn recompute_visible(&mut self) {
        self.visible = apply_filter(&self.items, &self.criteria);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        if self.visible.is_empty() {
            self.cursor = 0;
            self.scroll_offset = 0;
        } else if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len() - 1;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Manager of the project owning `project_id`
    pub fn project_manager(&self, project_id: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.id == project_id)
            .and_then(|r| r.project_manager.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    pub fn timescale(&self) -> Timescale {
        Timescale::fit(&self.visible, self.criteria.view_mode, self.today)
    }

    /// Regex highlighting the active search in row ids
    pub fn search_re(&self) -> Option<Regex> {
        if !self.criteria.has_search() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(self.criteria.search.trim()))).ok()
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    /// Record a keystroke's worth of search input; applies after the quiet period
    pub fn edit_search(&mut self, now: Instant) {
        self.search_debounce.push(self.search_input.clone(), now);
    }

    /// Apply a debounced search if its quiet period has elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(search) = self.search_debounce.poll(now) {
            self.apply_search(search);
        }
    }

    /// Apply any pending search immediately
    pub fn flush_search(&mut self) {
        if let Some(search) = self.search_debounce.flush() {
            self.apply_search(search);
        }
    }

    /// Set the effective search text, persist it, and refilter
    pub fn apply_search(&mut self, search: String) {
        if search == self.criteria.search {
            return;
        }
        if search.is_empty() {
            self.prefs.remove(PrefKey::SearchTerm);
        } else {
            self.prefs.set(PrefKey::SearchTerm, &search);
        }
        self.criteria.search = search;
        self.recompute_visible();
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_debounce.cancel();
        self.criteria.search.clear();
        self.prefs.remove(PrefKey::SearchTerm);
        self.recompute_visible();
    }

    /// Set or clear one date bound, persist it, and refilter
    pub fn set_bound(&mut self, bound: Bound, date: Option<NaiveDate>) {
        match date {
            Some(d) => self
                .prefs
                .set(bound.pref_key(), &d.format("%Y-%m-%d").to_string()),
            None => self.prefs.remove(bound.pref_key()),
        }
        match bound {
            Bound::From => self.criteria.from = date,
            Bound::To => self.criteria.to = date,
        }
        self.recompute_visible();
    }

    pub fn bound(&self, bound: Bound) -> Option<NaiveDate> {
        match bound {
            Bound::From => self.criteria.from,
            Bound::To => self.criteria.to,
        }
    }

    pub fn clear_dates(&mut self) {
        self.criteria.from = None;
        self.criteria.to = None;
        self.prefs.remove(PrefKey::FilterStart);
        self.prefs.remove(PrefKey::FilterEnd);
        self.recompute_visible();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.criteria.view_mode = mode;
        self.timeline_scroll = 0;
        self.prefs.set(PrefKey::ViewMode, mode.as_str());
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Open the detail view for a row id. Unknown ids leave it closed.
    pub fn activate(&mut self, id: &str) {
        if self.selected_id.as_deref() == Some(id) && self.detail.is_some() {
            return;
        }
        match resolve_detail(&self.records, id) {
            Some(detail) => {
                self.selected_id = Some(id.to_string());
                self.detail = Some(detail);
                self.detail_scroll = 0;
            }
            None => {
                tracing::warn!(id, "no record behind selected row");
            }
        }
    }

    /// Activate the row under the cursor
    pub fn activate_cursor(&mut self) {
        if let Some(id) = self.visible.get(self.cursor).map(|i| i.id.clone()) {
            self.activate(&id);
        }
    }

    pub fn close_detail(&mut self) {
        self.selected_id = None;
        self.detail = None;
        self.detail_scroll = 0;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let max = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn scroll_timeline(&mut self, delta: i32) {
        let max = self.timescale().width();
        self.timeline_scroll = self.timeline_scroll.saturating_add_signed(delta).min(max);
    }

    /// How long the event loop may block before something needs attention
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let idle = if self.loader.is_some() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(250)
        };
        self.search_debounce
            .time_left(now)
            .map_or(idle, |left| left.min(idle))
    }
}

/// Everything needed to start the dashboard
pub struct RunOptions {
    pub source: DataSource,
    pub config: Config,
    pub prefs: PrefStore,
}

/// Run the TUI application
pub fn run(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(options.source, &options.config, options.prefs);
    app.start_load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // A search still waiting on its quiet period is kept
    app.flush_search();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.poll_loader();
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
