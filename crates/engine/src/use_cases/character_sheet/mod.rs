//! Character sheet use cases.
//!
//! The calling layer over the character store. Every operation requires an
//! established session. Locked characters cannot be opened for editing or
//! saved over; the character aggregate itself does not enforce the lock.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use ambrien_domain::{Character, CharacterId, LockChange, PowerCatalog};

use crate::infrastructure::ports::{AuthPort, ClockPort};
use crate::stores::{CharacterStore, UpsertOutcome};

// =============================================================================
// Result Types
// =============================================================================

/// Result of saving a character.
#[derive(Debug, Clone)]
pub struct SaveResult {
    /// The character as stored.
    pub character: Character,
    /// Whether the save created a new entry or replaced one.
    pub outcome: UpsertOutcome,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for character sheet use cases.
pub struct CharacterSheetUseCases {
    store: CharacterStore,
    catalog: PowerCatalog,
    clock: Arc<dyn ClockPort>,
    auth: Arc<dyn AuthPort>,
}

impl CharacterSheetUseCases {
    pub fn new(
        store: CharacterStore,
        catalog: PowerCatalog,
        clock: Arc<dyn ClockPort>,
        auth: Arc<dyn AuthPort>,
    ) -> Self {
        Self {
            store,
            catalog,
            clock,
            auth,
        }
    }

    fn ensure_session(&self) -> Result<(), CharacterSheetError> {
        if self.auth.is_session_established() {
            Ok(())
        } else {
            tracing::warn!("Character sheet operation refused: no session");
            Err(CharacterSheetError::NotAuthenticated)
        }
    }

    /// The power catalog drafts acquire powers from.
    pub fn catalog(&self) -> &PowerCatalog {
        &self.catalog
    }

    /// Mutable catalog access, for cost adjustments. Already acquired powers
    /// keep the cost they were bought at.
    pub fn catalog_mut(&mut self) -> &mut PowerCatalog {
        &mut self.catalog
    }

    /// A blank draft stamped with the current time. Nothing is stored until
    /// [`save`](Self::save).
    pub fn new_draft(&self) -> Result<Character, CharacterSheetError> {
        self.ensure_session()?;
        Ok(Character::new(self.clock.now()))
    }

    /// A working copy of a stored character.
    ///
    /// # Errors
    ///
    /// `CharacterLocked` when the stored character is locked.
    pub fn begin_edit(&self, id: CharacterId) -> Result<Character, CharacterSheetError> {
        self.ensure_session()?;
        let stored = self.store.find_by_id(id)?;
        if stored.is_locked() {
            return Err(CharacterSheetError::CharacterLocked(id));
        }
        Ok(stored.clone())
    }

    /// Validate and store a draft.
    ///
    /// Refuses to overwrite a locked stored character, requires a non-blank
    /// name, and stamps `updated_at` before the upsert.
    pub fn save(&mut self, mut draft: Character) -> Result<SaveResult, CharacterSheetError> {
        self.ensure_session()?;

        let id = draft.id();
        if let Ok(stored) = self.store.find_by_id(id) {
            if stored.is_locked() {
                return Err(CharacterSheetError::CharacterLocked(id));
            }
        }
        draft.validate_for_save()?;

        draft.touch(self.clock.now());
        let outcome = self.store.upsert(draft.clone())?;
        tracing::info!(character_id = %id, name = draft.name(), "Character saved");

        Ok(SaveResult {
            character: draft,
            outcome,
        })
    }

    /// Flip the lock on a stored character.
    pub fn toggle_lock(&mut self, id: CharacterId) -> Result<LockChange, CharacterSheetError> {
        self.ensure_session()?;

        let mut character = self.store.find_by_id(id)?.clone();
        let change = character.toggle_lock(self.clock.now());
        self.store.upsert(character)?;
        tracing::info!(character_id = %id, ?change, "Character lock toggled");

        Ok(change)
    }

    /// Delete a stored character. Locked characters can be deleted.
    pub fn remove(&mut self, id: CharacterId) -> Result<Character, CharacterSheetError> {
        self.ensure_session()?;
        let removed = self.store.remove(id)?;
        tracing::info!(character_id = %id, "Character deleted");
        Ok(removed)
    }

    pub fn list(&self) -> Result<&[Character], CharacterSheetError> {
        self.ensure_session()?;
        Ok(self.store.list())
    }

    pub fn get(&self, id: CharacterId) -> Result<&Character, CharacterSheetError> {
        self.ensure_session()?;
        Ok(self.store.find_by_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockAuthPort, MockCharacterRepo, MockClockPort, RepoError};
    use crate::stores::StoreError;
    use ambrien_domain::{DomainError, TraitList};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    fn saved_at() -> DateTime<Utc> {
        created_at() + Duration::hours(1)
    }

    fn signed_in() -> Arc<MockAuthPort> {
        let mut auth = MockAuthPort::new();
        auth.expect_is_session_established().return_const(true);
        Arc::new(auth)
    }

    fn signed_out() -> Arc<MockAuthPort> {
        let mut auth = MockAuthPort::new();
        auth.expect_is_session_established().return_const(false);
        Arc::new(auth)
    }

    fn open_store(stored: Vec<Character>) -> CharacterStore {
        let mut repo = MockCharacterRepo::new();
        repo.expect_load_all().returning(move || Ok(stored.clone()));
        repo.expect_save_all().returning(|_| Ok(()));
        CharacterStore::open(Arc::new(repo)).0
    }

    fn use_cases_with(stored: Vec<Character>, auth: Arc<MockAuthPort>) -> CharacterSheetUseCases {
        CharacterSheetUseCases::new(
            open_store(stored),
            PowerCatalog::standard(),
            Arc::new(FixedClock(saved_at())),
            auth,
        )
    }

    fn named(name: &str) -> Character {
        let mut character = Character::new(created_at());
        character.set_name(name, created_at());
        character
    }

    fn locked(name: &str) -> Character {
        let mut character = named(name);
        character.lock(created_at());
        character
    }

    mod session {
        use super::*;

        #[test]
        fn every_operation_requires_a_session() {
            let character = named("Corwin");
            let id = character.id();
            let mut use_cases = use_cases_with(vec![character.clone()], signed_out());

            assert!(matches!(
                use_cases.new_draft(),
                Err(CharacterSheetError::NotAuthenticated)
            ));
            assert!(matches!(
                use_cases.begin_edit(id),
                Err(CharacterSheetError::NotAuthenticated)
            ));
            assert!(matches!(
                use_cases.save(character),
                Err(CharacterSheetError::NotAuthenticated)
            ));
            assert!(matches!(
                use_cases.toggle_lock(id),
                Err(CharacterSheetError::NotAuthenticated)
            ));
            assert!(matches!(
                use_cases.remove(id),
                Err(CharacterSheetError::NotAuthenticated)
            ));
            assert!(matches!(
                use_cases.list(),
                Err(CharacterSheetError::NotAuthenticated)
            ));
            assert!(matches!(
                use_cases.get(id),
                Err(CharacterSheetError::NotAuthenticated)
            ));
        }
    }

    mod drafts {
        use super::*;

        #[test]
        fn new_draft_uses_the_clock_and_is_not_stored() {
            let mut clock = MockClockPort::new();
            clock.expect_now().times(1).returning(created_at);
            let use_cases = CharacterSheetUseCases::new(
                open_store(Vec::new()),
                PowerCatalog::standard(),
                Arc::new(clock),
                signed_in(),
            );

            let draft = use_cases.new_draft().unwrap();

            assert_eq!(draft.created_at(), created_at());
            assert_eq!(draft.points_total(), 800);
            assert!(use_cases.list().unwrap().is_empty());
        }

        #[test]
        fn drafts_acquire_powers_from_the_catalog() {
            let use_cases = use_cases_with(Vec::new(), signed_in());
            let mut draft = use_cases.new_draft().unwrap();

            draft
                .add_power(use_cases.catalog(), "pattern", saved_at())
                .unwrap();

            assert_eq!(draft.power("pattern").unwrap().cost(), 150);
        }

        #[test]
        fn catalog_cost_changes_apply_to_later_acquisitions() {
            let mut use_cases = use_cases_with(Vec::new(), signed_in());
            let mut before = use_cases.new_draft().unwrap();
            before.add_power(use_cases.catalog(), "logrus", saved_at()).unwrap();

            assert!(use_cases.catalog_mut().set_cost("logrus", 90));
            let mut after = use_cases.new_draft().unwrap();
            after.add_power(use_cases.catalog(), "logrus", saved_at()).unwrap();

            assert_eq!(before.power("logrus").unwrap().cost(), 150);
            assert_eq!(after.power("logrus").unwrap().cost(), 90);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn begin_edit_returns_a_working_copy() {
            let character = named("Random");
            let id = character.id();
            let use_cases = use_cases_with(vec![character.clone()], signed_in());

            let mut copy = use_cases.begin_edit(id).unwrap();
            copy.set_name("Changed", saved_at());

            assert_eq!(copy.id(), id);
            assert_eq!(use_cases.get(id).unwrap().name(), "Random");
        }

        #[test]
        fn begin_edit_refuses_locked_character() {
            let character = locked("Benedict");
            let id = character.id();
            let use_cases = use_cases_with(vec![character], signed_in());

            assert!(matches!(
                use_cases.begin_edit(id),
                Err(CharacterSheetError::CharacterLocked(locked_id)) if locked_id == id
            ));
        }

        #[test]
        fn begin_edit_unknown_id_is_not_found() {
            let use_cases = use_cases_with(Vec::new(), signed_in());
            let err = use_cases.begin_edit(CharacterId::new()).unwrap_err();
            assert!(err.is_not_found());
        }
    }

    mod saving {
        use super::*;

        #[test]
        fn save_inserts_and_stamps_updated_at() {
            let mut use_cases = use_cases_with(Vec::new(), signed_in());
            let mut draft = use_cases.new_draft().unwrap();
            draft.set_name("Merlin", created_at());
            draft.add_trait(TraitList::Weaknesses, "Curiosité", created_at());

            let result = use_cases.save(draft.clone()).unwrap();

            assert_eq!(result.outcome, UpsertOutcome::Inserted);
            assert_eq!(result.character.updated_at(), saved_at());
            assert_eq!(result.character.points_total(), 815);
            assert_eq!(use_cases.get(draft.id()).unwrap(), &result.character);
        }

        #[test]
        fn save_replaces_in_place() {
            let first = named("Corwin");
            let second = named("Random");
            let mut use_cases = use_cases_with(vec![first.clone(), second.clone()], signed_in());

            let mut edit = use_cases.begin_edit(first.id()).unwrap();
            edit.set_generation(2, saved_at());
            let result = use_cases.save(edit).unwrap();

            assert_eq!(result.outcome, UpsertOutcome::Replaced { index: 0 });
            let list = use_cases.list().unwrap();
            assert_eq!(list.len(), 2);
            assert_eq!(list[0].points_base(), 600);
            assert_eq!(list[1].id(), second.id());
        }

        #[test]
        fn save_without_name_fails_validation() {
            let mut use_cases = use_cases_with(Vec::new(), signed_in());
            let draft = use_cases.new_draft().unwrap();

            let err = use_cases.save(draft).unwrap_err();

            assert!(matches!(
                err,
                CharacterSheetError::Domain(DomainError::Validation(_))
            ));
            assert!(use_cases.list().unwrap().is_empty());
        }

        #[test]
        fn save_refuses_to_overwrite_locked_character() {
            let stored = locked("Benedict");
            let mut use_cases = use_cases_with(vec![stored.clone()], signed_in());
            let mut stale = stored.clone();
            stale.unlock(saved_at());
            stale.set_name("Overwritten", saved_at());

            let err = use_cases.save(stale).unwrap_err();

            assert!(matches!(err, CharacterSheetError::CharacterLocked(_)));
            assert_eq!(use_cases.get(stored.id()).unwrap().name(), "Benedict");
        }

        #[test]
        fn persistence_failure_surfaces_as_store_error() {
            let mut repo = MockCharacterRepo::new();
            repo.expect_load_all().returning(|| Ok(Vec::new()));
            repo.expect_save_all()
                .returning(|_| Err(RepoError::storage("write", "read-only")));
            let mut use_cases = CharacterSheetUseCases::new(
                CharacterStore::open(Arc::new(repo)).0,
                PowerCatalog::standard(),
                Arc::new(FixedClock(saved_at())),
                signed_in(),
            );

            let err = use_cases.save(named("Fiona")).unwrap_err();

            assert!(matches!(
                err,
                CharacterSheetError::Store(StoreError::Persist(_))
            ));
        }
    }

    mod locking {
        use super::*;

        #[test]
        fn toggle_lock_flips_and_stores() {
            let character = named("Flora");
            let id = character.id();
            let mut use_cases = use_cases_with(vec![character], signed_in());

            assert_eq!(use_cases.toggle_lock(id).unwrap(), LockChange::Locked);
            let stored = use_cases.get(id).unwrap();
            assert!(stored.is_locked());
            assert_eq!(stored.updated_at(), saved_at());
            assert!(matches!(
                use_cases.begin_edit(id),
                Err(CharacterSheetError::CharacterLocked(_))
            ));

            assert_eq!(use_cases.toggle_lock(id).unwrap(), LockChange::Unlocked);
            assert!(use_cases.begin_edit(id).is_ok());
        }
    }

    mod removal {
        use super::*;

        #[test]
        fn remove_deletes_even_when_locked() {
            let character = locked("Eric");
            let id = character.id();
            let mut use_cases = use_cases_with(vec![character], signed_in());

            let removed = use_cases.remove(id).unwrap();

            assert_eq!(removed.name(), "Eric");
            assert!(use_cases.get(id).unwrap_err().is_not_found());
        }
    }
}
