//! Character sheet operation errors.

use ambrien_domain::{CharacterId, DomainError};

use crate::stores::StoreError;

/// Errors that can occur during character sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("No user session established")]
    NotAuthenticated,

    #[error("Character is locked: {0}")]
    CharacterLocked(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CharacterSheetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::CharacterNotFound(_)))
    }
}
