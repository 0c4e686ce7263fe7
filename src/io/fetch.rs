//! Loading the schedule tree from the REST endpoint or a local JSON file.
//!
//! The TUI never blocks on the network: `Loader::spawn` runs the fetch on a
//! worker thread and the event loop drains results with `poll()` each tick.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::model::record::ProjectRecord;

/// Where the schedule comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http { url: String, timeout: Duration },
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Http { url, .. } => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

/// Error type for loading the schedule
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("could not read response from {url}: {source}")]
    Body { url: String, source: std::io::Error },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid schedule data from {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
}

/// Parse a JSON array of project records
pub fn parse_records(json: &str, origin: &str) -> Result<Vec<ProjectRecord>, FetchError> {
    serde_json::from_str(json).map_err(|source| FetchError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn fetch_http(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let response = ureq::get(url)
        .timeout(timeout)
        .set("Accept", "application/json")
        .call()
        .map_err(|e| FetchError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;
    response.into_string().map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

/// Fetch and parse the whole schedule. Blocking.
pub fn fetch_records(source: &DataSource) -> Result<Vec<ProjectRecord>, FetchError> {
    let body = match source {
        DataSource::Http { url, timeout } => fetch_http(url, *timeout)?,
        DataSource::File(path) => {
            fs::read_to_string(path).map_err(|e| FetchError::ReadError {
                path: path.clone(),
                source: e,
            })?
        }
    };
    let records = parse_records(&body, &source.describe())?;
    tracing::info!(source = %source.describe(), projects = records.len(), "schedule loaded");
    Ok(records)
}

/// Result of a background load
#[derive(Debug)]
pub enum LoadEvent {
    Loaded(Vec<ProjectRecord>),
    Failed(String),
}

/// A single in-flight background load
pub struct Loader {
    rx: mpsc::Receiver<LoadEvent>,
}

impl Loader {
    /// Start fetching on a worker thread
    pub fn spawn(source: DataSource) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let event = match fetch_records(&source) {
                Ok(records) => LoadEvent::Loaded(records),
                Err(e) => {
                    tracing::error!(error = %e, "error fetching schedule");
                    LoadEvent::Failed(e.to_string())
                }
            };
            let _ = tx.send(event);
        });
        Loader { rx }
    }

    /// Non-blocking check for the result. Returns `None` while still loading.
    /// A worker that died without reporting is surfaced as a failure.
    pub fn poll(&self) -> Option<LoadEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(LoadEvent::Failed("loader stopped unexpectedly".into()))
            }
        }
    }
}
