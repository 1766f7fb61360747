//! Entities - identifiable parts owned by the character aggregate

pub mod power;
pub mod power_catalog;
pub mod skill;

pub use power::{
    Power, PowerRank, MAX_POWERS, MAX_POWER_LEVEL, MAX_POWER_PROGRESS, MIN_POWER_LEVEL,
};
pub use power_catalog::{CatalogPower, PowerCatalog, PowerDifficulty};
pub use skill::Skill;
