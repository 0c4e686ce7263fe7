use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Keys of the persisted dashboard preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    ViewMode,
    SearchTerm,
    FilterStart,
    FilterEnd,
}

impl PrefKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefKey::ViewMode => "ganttViewMode",
            PrefKey::SearchTerm => "ganttSearchTerm",
            PrefKey::FilterStart => "ganttFilterStart",
            PrefKey::FilterEnd => "ganttFilterEnd",
        }
    }
}

/// String key-value preference store mirrored to `prefs.json`.
///
/// The file is read once on open; every `set`/`remove` writes the whole map
/// back. A store without a path lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct PrefStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

/// Path of the preferences file inside a state directory
pub fn prefs_path(state_dir: &Path) -> PathBuf {
    state_dir.join("prefs.json")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl PrefStore {
    /// Open the store at `path`. A missing or malformed file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        PrefStore {
            path: Some(path),
            values,
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        PrefStore::default()
    }

    pub fn get(&self, key: PrefKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }

    /// Store a value and write through. Write failures are logged, not returned.
    pub fn set(&mut self, key: PrefKey, value: &str) {
        if self.get(key) == Some(value) {
            return;
        }
        self.values.insert(key.as_str().to_string(), value.to_string());
        self.flush();
    }

    /// Remove a value and write through.
    pub fn remove(&mut self, key: PrefKey) {
        if self.values.remove(key.as_str()).is_some() {
            self.flush();
        }
    }

    fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let result = serde_json::to_vec_pretty(&self.values)
            .map_err(io::Error::other)
            .and_then(|bytes| atomic_write(path, &bytes));
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "could not save preferences");
        }
    }
}
