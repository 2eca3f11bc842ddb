//! # File Store
//!
//! `KeyValueStore` backed by a single JSON object on disk.
//!
//! ## File Layout
//! ```text
//! ~/.local/share/gold-calculator/storage.json
//! {
//!   "gold-calculator-credentials": "{\"ana@x.com\":{\"password\":…}}",
//!   "gold-calculator-current-user": "{\"id\":\"1700000000123\",…}",
//!   "gold-calculator-users": "[{\"id\":\"1700000000123\",…}]"
//! }
//! ```
//!
//! Values stay JSON *text*, exactly as the browser would hold them, so a
//! dump of `localStorage` and this file carry the same strings.
//!
//! ## Write Path
//! Every `set`/`remove` rewrites the whole file through a temp file and a
//! rename, so a crash mid-write leaves the previous version intact. The map
//! is tiny (three keys), so rewriting it is cheap.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::port::KeyValueStore;

/// File name used by [`FileStore::in_dir`].
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// JSON-file backed store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens (or lazily creates) the store at `path`.
    ///
    /// ## Behavior
    /// - Missing file: empty store, file created on first write
    /// - Unparseable file: logged, treated as empty, replaced on first write
    /// - Unreadable file (permissions, …): error
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = ?path, error = %err, "Storage file is not a JSON object of strings, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = ?path, "Storage file not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        info!(path = ?path, keys = entries.len(), "File store opened");

        Ok(FileStore {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens `storage.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(dir.as_ref().join(STORAGE_FILE_NAME))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::write(parent, source))?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Encode {
            key: STORAGE_FILE_NAME.to_string(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::write(&tmp, source))?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::write(&self.path, source))?;

        debug!(path = ?self.path, keys = entries.len(), "Storage file written");
        Ok(())
    }

    /// Applies `change`, writes the file, and rolls the key back if the
    /// write fails so memory never runs ahead of disk.
    fn update(&self, key: &str, change: Option<&str>) -> StoreResult<()> {
        let mut entries = self.lock();

        let previous = match change {
            Some(value) => entries.insert(key.to_string(), value.to_string()),
            None => entries.remove(key),
        };

        if let Err(err) = self.persist(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(err);
        }

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.update(key, Some(value))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.update(key, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path()).unwrap();

        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");

        let store = FileStore::in_dir(&nested).unwrap();
        store.set("gold-calculator-users", "[]").unwrap();
        store.set("other", "1").unwrap();
        store.remove("other").unwrap();
        drop(store);

        let reopened = FileStore::in_dir(&nested).unwrap();
        assert_eq!(
            reopened.get("gold-calculator-users").unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(reopened.get("other").unwrap(), None);
        assert!(!nested.join("storage.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_opens_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("blocker");
        let store = FileStore::in_dir(&parent).unwrap();

        // A regular file where the parent directory should be makes every write fail.
        fs::write(&parent, "").unwrap();
        let err = store.set("k", "v").unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.get("k").unwrap(), None);
    }
}
