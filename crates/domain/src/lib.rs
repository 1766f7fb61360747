//! Ambrien character sheet domain
//!
//! Pure rules for Amber RPG character sheets: the point budget, derived
//! characteristic groups, the power catalog and power progression. No I/O;
//! time is passed in by the caller.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use error::DomainError;

// Re-export ID types
pub use ids::CharacterId;

// Re-export the aggregate root
pub use aggregates::{Character, DEFAULT_GENERATION};

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    CatalogPower, Power, PowerCatalog, PowerDifficulty, PowerRank, Skill, MAX_POWERS,
    MAX_POWER_LEVEL, MAX_POWER_PROGRESS, MIN_POWER_LEVEL,
};

// Re-export mutation outcomes
pub use events::{BudgetChange, LockChange, PowerChange};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    base_points, group_score, karma_modifier, Bloodlinks, BudgetInputs, CharacteristicGroup,
    Characteristics, DerivedScores, Kinship, PointBudget, PrimaryCharacteristic, TraitList,
    KARMA_MAX, KARMA_MIN,
};
