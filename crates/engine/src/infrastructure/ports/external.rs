//! Ports to collaborators outside the engine: storage and the session.

use super::error::RepoError;

// =============================================================================
// Key-Value Storage
// =============================================================================

/// String key-value storage, shaped like browser local storage.
///
/// A missing key is not an error: `load` returns `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
pub trait StoragePort: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, RepoError>;
    fn save(&self, key: &str, value: &str) -> Result<(), RepoError>;
    fn remove(&self, key: &str) -> Result<(), RepoError>;
}

// =============================================================================
// Authentication
// =============================================================================

/// Whether a user session exists. Character sheet operations require one.
#[cfg_attr(test, mockall::automock)]
pub trait AuthPort: Send + Sync {
    fn is_session_established(&self) -> bool;
}
