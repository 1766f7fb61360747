//! Repository port traits.

use ambrien_domain::Character;

use super::error::RepoError;

// =============================================================================
// Character Collection
// =============================================================================

/// The whole character collection, loaded and saved as one unit.
#[cfg_attr(test, mockall::automock)]
pub trait CharacterRepo: Send + Sync {
    /// Load every stored character. Nothing stored yet is an empty list.
    fn load_all(&self) -> Result<Vec<Character>, RepoError>;

    /// Replace the stored collection.
    fn save_all(&self, characters: &[Character]) -> Result<(), RepoError>;
}
