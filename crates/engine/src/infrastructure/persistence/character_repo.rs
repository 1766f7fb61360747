//! Character collection stored as a JSON array under one storage key.

use std::sync::Arc;

use ambrien_domain::Character;

use crate::infrastructure::ports::{CharacterRepo, RepoError, StoragePort};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "ambrien-characters";

/// [`CharacterRepo`] over any key-value storage.
pub struct JsonCharacterRepo {
    storage: Arc<dyn StoragePort>,
    key: String,
}

impl JsonCharacterRepo {
    pub fn new(storage: Arc<dyn StoragePort>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CharacterRepo for JsonCharacterRepo {
    fn load_all(&self) -> Result<Vec<Character>, RepoError> {
        let Some(raw) = self.storage.load(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored characters");
            return Ok(Vec::new());
        };

        let characters: Vec<Character> = serde_json::from_str(&raw)?;
        tracing::debug!(key = %self.key, count = characters.len(), "Loaded characters");
        Ok(characters)
    }

    fn save_all(&self, characters: &[Character]) -> Result<(), RepoError> {
        let raw = serde_json::to_string(characters)?;
        self.storage.save(&self.key, &raw)
    }
}
