//! Repository implementations over the storage ports.

mod character_repo;

pub use character_repo::{JsonCharacterRepo, DEFAULT_STORAGE_KEY};
