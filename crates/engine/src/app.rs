//! Application state and composition.

use std::sync::Arc;

use ambrien_domain::PowerCatalog;

use crate::config::EngineConfig;
use crate::infrastructure::{
    clock::SystemClock,
    persistence::JsonCharacterRepo,
    ports::{AuthPort, CharacterRepo, ClockPort, StoragePort},
    storage::FileStorage,
};
use crate::stores::{CharacterStore, StoreError};
use crate::use_cases::CharacterSheetUseCases;

/// One character-sheet session.
///
/// Built once and passed by reference to whatever drives the sheet.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_sheet: CharacterSheetUseCases,
}

impl App {
    /// Open a session over the configured JSON storage file.
    ///
    /// A load error does not prevent the session from opening; it is returned
    /// so the host can tell the user their saved characters were unreadable.
    pub fn open(config: &EngineConfig, auth: Arc<dyn AuthPort>) -> (Self, Option<StoreError>) {
        let storage_path = config.storage_path();
        tracing::info!(
            path = ?storage_path,
            key = %config.storage_key,
            "Opening character storage"
        );

        let storage: Arc<dyn StoragePort> = Arc::new(FileStorage::open(storage_path));
        Self::with_storage(storage, &config.storage_key, Arc::new(SystemClock), auth)
    }

    /// Open a session over any storage backend.
    pub fn with_storage(
        storage: Arc<dyn StoragePort>,
        storage_key: &str,
        clock: Arc<dyn ClockPort>,
        auth: Arc<dyn AuthPort>,
    ) -> (Self, Option<StoreError>) {
        let repo: Arc<dyn CharacterRepo> = Arc::new(JsonCharacterRepo::new(storage, storage_key));
        let (store, load_error) = CharacterStore::open(repo);

        let character_sheet =
            CharacterSheetUseCases::new(store, PowerCatalog::standard(), clock, auth);

        (
            Self {
                use_cases: UseCases { character_sheet },
            },
            load_error,
        )
    }
}
