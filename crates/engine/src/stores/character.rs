//! Character store
//!
//! The session's working collection. Loaded once from the repository when the
//! session opens, kept in insertion order, and written back in full after
//! every change.

use std::sync::Arc;

use ambrien_domain::{Character, CharacterId};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// Errors from the character store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// The stored collection could not be read; the store started empty.
    #[error("Failed to load characters: {0}")]
    Load(#[source] RepoError),

    /// The collection could not be written; the in-memory change is kept.
    #[error("Failed to persist characters: {0}")]
    Persist(#[source] RepoError),
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Appended at the end of the collection.
    Inserted,
    /// Replaced the character with the same id, at its position.
    Replaced { index: usize },
}

pub struct CharacterStore {
    repo: Arc<dyn CharacterRepo>,
    characters: Vec<Character>,
}

impl CharacterStore {
    /// Open the store from the repository.
    ///
    /// Never fails: when the stored data cannot be loaded the store starts
    /// empty and the load error is handed back for the caller to report.
    pub fn open(repo: Arc<dyn CharacterRepo>) -> (Self, Option<StoreError>) {
        let (characters, load_error) = match repo.load_all() {
            Ok(characters) => {
                tracing::info!(count = characters.len(), "Character store opened");
                (characters, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored characters unreadable, starting empty");
                (Vec::new(), Some(StoreError::Load(e)))
            }
        };

        (Self { repo, characters }, load_error)
    }

    /// All characters in insertion order.
    pub fn list(&self) -> &[Character] {
        &self.characters
    }

    pub fn find_by_id(&self, id: CharacterId) -> Result<&Character, StoreError> {
        self.characters
            .iter()
            .find(|c| c.id() == id)
            .ok_or(StoreError::CharacterNotFound(id))
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id() == id)
    }

    /// Insert a new character or replace the one with the same id, then
    /// persist the whole collection.
    ///
    /// A persistence failure is returned as `StoreError::Persist`; the
    /// in-memory collection keeps the change either way.
    pub fn upsert(&mut self, character: Character) -> Result<UpsertOutcome, StoreError> {
        let id = character.id();
        let outcome = match self.position(id) {
            Some(index) => {
                self.characters[index] = character;
                UpsertOutcome::Replaced { index }
            }
            None => {
                self.characters.push(character);
                UpsertOutcome::Inserted
            }
        };
        tracing::debug!(character_id = %id, ?outcome, "Character upserted");

        self.persist()?;
        Ok(outcome)
    }

    /// Delete a character, then persist.
    pub fn remove(&mut self, id: CharacterId) -> Result<Character, StoreError> {
        let index = self.position(id).ok_or(StoreError::CharacterNotFound(id))?;
        let removed = self.characters.remove(index);
        tracing::debug!(character_id = %id, "Character removed");

        self.persist()?;
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.repo.save_all(&self.characters).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist characters");
            StoreError::Persist(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::{JsonCharacterRepo, DEFAULT_STORAGE_KEY};
    use crate::infrastructure::ports::MockCharacterRepo;
    use crate::infrastructure::storage::MemoryStorage;
    use ambrien_domain::TraitList;
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    fn named(name: &str) -> Character {
        let mut character = Character::new(fixed_time());
        character.set_name(name, fixed_time());
        character
    }

    fn empty_store() -> CharacterStore {
        let mut repo = MockCharacterRepo::new();
        repo.expect_load_all().returning(|| Ok(Vec::new()));
        repo.expect_save_all().returning(|_| Ok(()));
        let (store, load_error) = CharacterStore::open(Arc::new(repo));
        assert!(load_error.is_none());
        store
    }

    mod open {
        use super::*;

        #[test]
        fn loads_stored_characters_in_order() {
            let stored = vec![named("Corwin"), named("Random")];
            let expected = stored.clone();
            let mut repo = MockCharacterRepo::new();
            repo.expect_load_all()
                .times(1)
                .returning(move || Ok(stored.clone()));

            let (store, load_error) = CharacterStore::open(Arc::new(repo));

            assert!(load_error.is_none());
            assert_eq!(store.list(), expected.as_slice());
        }

        #[test]
        fn malformed_data_opens_empty_with_load_error() {
            let storage = MemoryStorage::new().with_entry(DEFAULT_STORAGE_KEY, "][");
            let repo = JsonCharacterRepo::new(Arc::new(storage), DEFAULT_STORAGE_KEY);

            let (store, load_error) = CharacterStore::open(Arc::new(repo));

            assert!(store.is_empty());
            assert!(matches!(load_error, Some(StoreError::Load(_))));
        }
    }

    mod upsert {
        use super::*;

        #[test]
        fn upsert_then_find_is_deep_equal() {
            let mut store = empty_store();
            let mut character = named("Merlin");
            character.add_trait(TraitList::Allies, "Mandor", fixed_time());

            let outcome = store.upsert(character.clone()).unwrap();

            assert_eq!(outcome, UpsertOutcome::Inserted);
            assert_eq!(store.find_by_id(character.id()).unwrap(), &character);
        }

        #[test]
        fn upsert_existing_keeps_length_and_order() {
            let mut store = empty_store();
            let first = named("Corwin");
            let second = named("Random");
            let third = named("Fiona");
            for character in [&first, &second, &third] {
                store.upsert(character.clone()).unwrap();
            }

            let mut edited = second.clone();
            edited.set_name("Random, King of Amber", fixed_time());
            let outcome = store.upsert(edited).unwrap();

            assert_eq!(outcome, UpsertOutcome::Replaced { index: 1 });
            assert_eq!(store.len(), 3);
            let names: Vec<_> = store.list().iter().map(|c| c.name()).collect();
            assert_eq!(names, ["Corwin", "Random, King of Amber", "Fiona"]);
        }

        #[test]
        fn every_upsert_persists_the_whole_collection() {
            let mut repo = MockCharacterRepo::new();
            repo.expect_load_all().returning(|| Ok(Vec::new()));
            repo.expect_save_all()
                .withf(|characters: &[Character]| characters.len() == 1)
                .times(1)
                .returning(|_| Ok(()));
            repo.expect_save_all()
                .withf(|characters: &[Character]| characters.len() == 2)
                .times(1)
                .returning(|_| Ok(()));
            let (mut store, _) = CharacterStore::open(Arc::new(repo));

            store.upsert(named("a")).unwrap();
            store.upsert(named("b")).unwrap();
        }

        #[test]
        fn persist_failure_is_reported_and_change_kept() {
            let mut repo = MockCharacterRepo::new();
            repo.expect_load_all().returning(|| Ok(Vec::new()));
            repo.expect_save_all()
                .returning(|_| Err(RepoError::storage("write", "disk full")));
            let (mut store, _) = CharacterStore::open(Arc::new(repo));
            let character = named("Dworkin");

            let err = store.upsert(character.clone()).unwrap_err();

            assert!(matches!(err, StoreError::Persist(_)));
            assert!(store.contains(character.id()));
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn unknown_id_is_not_found() {
            let store = empty_store();
            let id = CharacterId::new();

            assert!(matches!(
                store.find_by_id(id),
                Err(StoreError::CharacterNotFound(missing)) if missing == id
            ));
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn remove_deletes_and_persists() {
            let storage = Arc::new(MemoryStorage::new());
            let repo = Arc::new(JsonCharacterRepo::new(storage.clone(), DEFAULT_STORAGE_KEY));
            let (mut store, _) = CharacterStore::open(repo.clone());
            let keep = named("Benedict");
            let gone = named("Brand");
            store.upsert(keep.clone()).unwrap();
            store.upsert(gone.clone()).unwrap();

            let removed = store.remove(gone.id()).unwrap();

            assert_eq!(removed.name(), "Brand");
            assert_eq!(store.len(), 1);
            assert_eq!(repo.load_all().unwrap(), vec![keep]);
        }

        #[test]
        fn remove_unknown_id_fails() {
            let mut store = empty_store();
            assert!(matches!(
                store.remove(CharacterId::new()),
                Err(StoreError::CharacterNotFound(_))
            ));
        }
    }
}
