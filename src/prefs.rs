//! User preferences with JSON persistence
//!
//! Views never touch storage directly: they hold a [`Preferences`] handle
//! built over a [`PreferenceStore`]. Production uses [`JsonFileStore`], tests
//! use [`MemoryStore`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::consts::{PREF_BASE_URL, PREF_PERIOD};
use crate::errors::{Error, Result};

/// String key/value storage that survives across sessions
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used as a fake in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `entries`
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| Error::Preferences(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk
///
/// The whole file is rewritten atomically (temp file + rename) on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let values: BTreeMap<String, String> = serde_json::from_str(&content)
                .map_err(|e| Error::Preferences(format!("{}: {}", path.display(), e)))?;
            info!("Loaded {} preferences from {:?}", values.len(), path);
            values
        } else {
            debug!("No preference file at {:?}, starting empty", path);
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| Error::Preferences(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }
}

/// Typed handle over a [`PreferenceStore`]
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Preferences over a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn base_url(&self) -> Option<String> {
        self.store.get(PREF_BASE_URL)
    }

    /// Persist the base URL. Failures are logged, the edit itself still stands.
    pub fn set_base_url(&self, base_url: &str) {
        if let Err(e) = self.store.set(PREF_BASE_URL, base_url) {
            warn!("Failed to persist base URL: {}", e);
        }
    }

    pub fn period(&self) -> Option<String> {
        self.store.get(PREF_PERIOD)
    }

    pub fn set_period(&self, period: &str) {
        if let Err(e) = self.store.set(PREF_PERIOD, period) {
            warn!("Failed to persist period: {}", e);
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("base_url", &self.base_url())
            .field("period", &self.period())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("pnl_prefs_{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store() {
        let prefs = Preferences::in_memory();
        assert_eq!(prefs.base_url(), None);

        prefs.set_base_url("https://a.test");
        prefs.set_base_url("https://b.test");
        assert_eq!(prefs.base_url().as_deref(), Some("https://b.test"));

        let clone = prefs.clone();
        clone.set_period("month");
        assert_eq!(prefs.period().as_deref(), Some("month"));
    }

    #[test]
    fn test_json_store_persists_across_open() {
        let path = temp_path();
        {
            let store = JsonFileStore::open(&path).unwrap();
            let prefs = Preferences::new(Arc::new(store));
            prefs.set_base_url("https://persisted.test");
            prefs.set_period("allTime");
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(PREF_BASE_URL).as_deref(),
            Some("https://persisted.test")
        );
        assert_eq!(reopened.get(PREF_PERIOD).as_deref(), Some("allTime"));
        assert!(!path.with_extension("tmp").exists());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let path = temp_path();
        std::fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::Preferences(_)));
        std::fs::remove_file(&path).ok();
    }
}
