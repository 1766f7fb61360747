//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod character_sheet;

// Re-export main types
pub use character_sheet::{CharacterSheetError, CharacterSheetUseCases, SaveResult};
