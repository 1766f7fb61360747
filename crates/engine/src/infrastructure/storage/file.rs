//! JSON file storage
//!
//! Stores key-value pairs in a single JSON object on disk. The whole file is
//! read once at open and rewritten after every change: the new content goes to
//! a sibling `.tmp` file which is then renamed over the target, so a crash
//! mid-write leaves the previous file intact.
//!
//! A file that exists but cannot be read or parsed is never overwritten in
//! place. Every `load` reports the failure until the next write, which first
//! moves the bad file aside to `<name>.corrupt`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::infrastructure::ports::{RepoError, StoragePort};

/// File-backed key-value storage with an in-memory cache.
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: RwLock<Cache>,
}

#[derive(Default)]
struct Cache {
    entries: HashMap<String, String>,
    /// Why the file on disk could not be loaded, until it is moved aside
    unreadable: Option<RepoError>,
}

impl FileStorage {
    /// Open the storage file at `storage_path`.
    ///
    /// A missing file is an empty storage. An unreadable or unparsable file
    /// opens empty too, but `load` returns the failure until the next write.
    pub fn open(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(entries) => Cache {
                        entries,
                        unreadable: None,
                    },
                    Err(e) => {
                        tracing::warn!(path = ?storage_path, "Failed to parse storage file: {}", e);
                        Cache {
                            entries: HashMap::new(),
                            unreadable: Some(RepoError::serialization(e)),
                        }
                    }
                },
                Err(e) => {
                    tracing::warn!(path = ?storage_path, "Failed to read storage file: {}", e);
                    Cache {
                        entries: HashMap::new(),
                        unreadable: Some(RepoError::storage("read", e)),
                    }
                }
            }
        } else {
            Cache::default()
        };

        tracing::debug!("File storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Where an unreadable storage file is moved before the first write.
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling_path(".corrupt")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name: OsString = self
            .storage_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.storage_path.with_file_name(name)
    }

    /// Move an unreadable file out of the way so the next write cannot
    /// destroy it.
    fn set_aside_unreadable(&self, cache: &mut Cache) -> Result<(), RepoError> {
        if cache.unreadable.is_none() {
            return Ok(());
        }
        if self.storage_path.exists() {
            let corrupt_path = self.corrupt_path();
            fs::rename(&self.storage_path, &corrupt_path).map_err(|e| {
                tracing::error!("Failed to move unreadable storage file aside: {}", e);
                RepoError::storage("set_aside", e)
            })?;
            tracing::warn!(path = ?corrupt_path, "Unreadable storage file moved aside");
        }
        cache.unreadable = None;
        Ok(())
    }

    /// Write the cache to disk.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), RepoError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    tracing::error!("Failed to create storage directory: {}", e);
                    RepoError::storage("create_dir", e)
                })?;
            }
        }

        let data = serde_json::to_string_pretty(entries).map_err(|e| {
            tracing::error!("Failed to serialize storage data: {}", e);
            RepoError::serialization(e)
        })?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, data).map_err(|e| {
            tracing::error!("Failed to write storage file: {}", e);
            RepoError::storage("write", e)
        })?;
        fs::rename(&temp_path, &self.storage_path).map_err(|e| {
            tracing::error!("Failed to replace storage file: {}", e);
            RepoError::storage("rename", e)
        })
    }

    fn lock_poisoned(operation: &'static str, e: impl ToString) -> RepoError {
        tracing::error!("Storage lock poisoned during {}", operation);
        RepoError::storage(operation, e)
    }
}

impl StoragePort for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, RepoError> {
        let guard = self
            .cache
            .read()
            .map_err(|e| Self::lock_poisoned("load", e))?;
        if let Some(err) = &guard.unreadable {
            return Err(err.clone());
        }
        Ok(guard.entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), RepoError> {
        let mut guard = self
            .cache
            .write()
            .map_err(|e| Self::lock_poisoned("save", e))?;
        self.set_aside_unreadable(&mut guard)?;
        guard.entries.insert(key.to_string(), value.to_string());
        self.persist(&guard.entries)
    }

    fn remove(&self, key: &str) -> Result<(), RepoError> {
        let mut guard = self
            .cache
            .write()
            .map_err(|e| Self::lock_poisoned("remove", e))?;
        if guard.entries.remove(key).is_none() {
            return Ok(());
        }
        self.set_aside_unreadable(&mut guard)?;
        self.persist(&guard.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json"));

        assert_eq!(storage.load("ambrien-characters").unwrap(), None);
    }

    #[test]
    fn save_writes_through_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = FileStorage::open(&path);
        storage.save("ambrien-characters", "[]").unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(
            reopened.load("ambrien-characters").unwrap().as_deref(),
            Some("[]")
        );
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("storage.json");

        FileStorage::open(&path).save("k", "v").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn remove_deletes_key_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::open(&path);
        storage.save("a", "1").unwrap();
        storage.save("b", "2").unwrap();

        storage.remove("a").unwrap();

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.load("a").unwrap(), None);
        assert_eq!(reopened.load("b").unwrap().as_deref(), Some("2"));
    }

    mod unreadable_file {
        use super::*;

        const TRUNCATED: &str = r#"{ "ambrien-characters": "[{\"id\":"#;

        #[test]
        fn load_reports_the_parse_failure() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("storage.json");
            fs::write(&path, TRUNCATED).unwrap();

            let storage = FileStorage::open(&path);

            let err = storage.load("ambrien-characters").unwrap_err();
            assert!(err.is_serialization());
            assert!(storage.load("any-other-key").is_err());
            assert_eq!(fs::read_to_string(&path).unwrap(), TRUNCATED);
        }

        #[test]
        fn save_moves_the_bad_file_aside_first() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("storage.json");
            fs::write(&path, TRUNCATED).unwrap();
            let storage = FileStorage::open(&path);

            storage.save("ambrien-characters", "[]").unwrap();

            assert_eq!(fs::read_to_string(storage.corrupt_path()).unwrap(), TRUNCATED);
            assert_eq!(
                storage.load("ambrien-characters").unwrap().as_deref(),
                Some("[]")
            );
            let reopened = FileStorage::open(&path);
            assert_eq!(
                reopened.load("ambrien-characters").unwrap().as_deref(),
                Some("[]")
            );
        }

        #[test]
        fn removing_an_absent_key_leaves_the_bad_file_alone() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("storage.json");
            fs::write(&path, TRUNCATED).unwrap();
            let storage = FileStorage::open(&path);

            storage.remove("ambrien-characters").unwrap();

            assert_eq!(fs::read_to_string(&path).unwrap(), TRUNCATED);
            assert!(storage.load("ambrien-characters").is_err());
        }
    }
}
