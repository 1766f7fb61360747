//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage (could swap the JSON file for anything key-value)
//! - The character collection (could swap JSON for another encoding)
//! - Authentication (whatever owns the user session)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::RepoError;
pub use external::{AuthPort, StoragePort};
pub use repos::CharacterRepo;
pub use testing::ClockPort;

#[cfg(test)]
pub use external::{MockAuthPort, MockStoragePort};
#[cfg(test)]
pub use repos::MockCharacterRepo;
#[cfg(test)]
pub use testing::MockClockPort;
