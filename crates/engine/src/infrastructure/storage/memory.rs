//! In-memory storage, for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::infrastructure::ports::{RepoError, StoragePort};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, mostly for fixtures.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value.into());
        }
        self
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, RepoError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RepoError::storage("load", e))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), RepoError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| RepoError::storage("save", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RepoError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| RepoError::storage("remove", e))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_save_remove() {
        let storage = MemoryStorage::new().with_entry("seed", "1");

        assert_eq!(storage.load("seed").unwrap().as_deref(), Some("1"));
        storage.save("seed", "2").unwrap();
        assert_eq!(storage.load("seed").unwrap().as_deref(), Some("2"));
        storage.remove("seed").unwrap();
        assert_eq!(storage.load("seed").unwrap(), None);
    }
}
