//! Dark-mode preference persistence
//!
//! A single flag stored as a key in a small TOML file next to the config.
//! Presence of the key means dark mode; light mode removes it. Storage
//! failures are logged and otherwise ignored.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::{debug, warn};

/// Key holding the dark-mode flag
pub const DARK_MODE_KEY: &str = "INTL_DARK";

/// Value stored under [`DARK_MODE_KEY`] while dark mode is on
const DARK_MODE_VALUE: &str = "YES";

/// Persisted dark-mode flag
pub trait PreferenceStore {
    /// Whether dark mode was enabled; `false` if never set or unreadable
    fn read(&self) -> bool;

    /// Persist the flag. `write(false)` is the same as [`clear`](Self::clear).
    fn write(&mut self, enabled: bool);

    /// Remove the stored flag
    fn clear(&mut self);
}

/// Preference file on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    /// `None` when no config directory could be determined
    path: Option<PathBuf>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `~/.config/clanboard/preferences.toml`, or a no-op store without a config dir
    pub fn default_location() -> Self {
        match crate::config::Config::dir() {
            Ok(dir) => Self::new(dir.join("preferences.toml")),
            Err(e) => {
                warn!("preferences unavailable: {:#}", e);
                Self { path: None }
            }
        }
    }

    fn update(&self, f: impl FnOnce(&mut Table)) {
        let Some(path) = &self.path else { return };

        let mut entries = load_entries(path).unwrap_or_else(|e| {
            warn!("discarding unreadable preferences: {:#}", e);
            Table::new()
        });
        f(&mut entries);

        if let Err(e) = save_entries(path, &entries) {
            warn!("failed to store preference: {:#}", e);
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self) -> bool {
        let Some(path) = &self.path else { return false };

        match load_entries(path) {
            Ok(entries) => is_enabled(&entries),
            Err(e) => {
                warn!("failed to read preferences: {:#}", e);
                false
            }
        }
    }

    fn write(&mut self, enabled: bool) {
        if !enabled {
            self.clear();
            return;
        }

        debug!("storing dark mode preference");
        self.update(|entries| {
            entries.insert(DARK_MODE_KEY.to_string(), dark_value());
        });
    }

    fn clear(&mut self) {
        debug!("clearing dark mode preference");
        self.update(|entries| {
            entries.remove(DARK_MODE_KEY);
        });
    }
}

/// In-memory store: used for `--dark`/`--light` runs and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: Table,
}

impl MemoryPreferenceStore {
    pub fn with_dark(enabled: bool) -> Self {
        let mut store = Self::default();
        store.write(enabled);
        store
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self) -> bool {
        is_enabled(&self.entries)
    }

    fn write(&mut self, enabled: bool) {
        if enabled {
            self.entries.insert(DARK_MODE_KEY.to_string(), dark_value());
        } else {
            self.clear();
        }
    }

    fn clear(&mut self) {
        self.entries.remove(DARK_MODE_KEY);
    }
}

fn dark_value() -> Value {
    Value::String(DARK_MODE_VALUE.to_string())
}

fn is_enabled(entries: &Table) -> bool {
    entries
        .get(DARK_MODE_KEY)
        .and_then(Value::as_str)
        .is_some_and(|value| !value.is_empty())
}

/// Missing file reads as no entries. Unrelated keys keep whatever type they have.
fn load_entries(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Ok(Table::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences from {:?}", path))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse preferences from {:?}", path))
}

/// Empty entries remove the file
fn save_entries(path: &Path, entries: &Table) -> Result<()> {
    if entries.is_empty() {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove preferences {:?}", path))?;
        }
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let content = toml::to_string(entries).context("Failed to serialize preferences")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write preferences to {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("preferences.toml"));
        assert!(!store.read());
    }

    #[test]
    fn test_dark_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = FilePreferenceStore::new(&path);
        store.write(true);

        let reloaded = FilePreferenceStore::new(&path);
        assert!(reloaded.read());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("INTL_DARK"));
        assert!(content.contains("YES"));
    }

    #[test]
    fn test_light_removes_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut store = FilePreferenceStore::new(&path);
        store.write(true);
        store.write(false);

        assert!(!path.exists());
        assert!(!FilePreferenceStore::new(&path).read());
    }

    #[test]
    fn test_clear_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "OTHER = \"1\"\nINTL_DARK = \"YES\"\n").unwrap();

        let mut store = FilePreferenceStore::new(&path);
        assert!(store.read());
        store.clear();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("INTL_DARK"));
        assert!(content.contains("OTHER"));
    }

    #[test]
    fn test_toggle_keeps_non_string_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "OTHER = 1\nENABLED = true\n").unwrap();

        let mut store = FilePreferenceStore::new(&path);
        assert!(!store.read());
        store.write(true);
        assert!(store.read());
        store.write(false);

        let entries: Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries.get("OTHER"), Some(&Value::Integer(1)));
        assert_eq!(entries.get("ENABLED"), Some(&Value::Boolean(true)));
        assert!(!entries.contains_key(DARK_MODE_KEY));
    }

    #[test]
    fn test_non_string_flag_reads_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "INTL_DARK = 1\n").unwrap();

        assert!(!FilePreferenceStore::new(&path).read());
    }

    #[test]
    fn test_garbage_file_reads_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "not = [valid").unwrap();

        let mut store = FilePreferenceStore::new(&path);
        assert!(!store.read());

        // Writing recovers the file
        store.write(true);
        assert!(store.read());
    }

    #[test]
    fn test_unavailable_store_is_noop() {
        let mut store = FilePreferenceStore { path: None };
        store.write(true);
        assert!(!store.read());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryPreferenceStore::default();
        assert!(!store.read());

        store.write(true);
        assert!(store.read());
        assert!(store.contains_key(DARK_MODE_KEY));

        store.write(false);
        assert!(!store.read());
        assert!(!store.contains_key(DARK_MODE_KEY));
    }
}
