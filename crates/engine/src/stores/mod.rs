//! In-memory state storage modules.
//!
//! Stores hold the working state of a session:
//! - `CharacterStore` - the character collection, persisted on every change

pub mod character;

// Re-export store types
pub use character::{CharacterStore, StoreError, UpsertOutcome};
