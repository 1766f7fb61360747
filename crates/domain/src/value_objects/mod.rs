//! Value objects - immutable-by-default building blocks of the character sheet
//!
//! Explicit exports only; everything here is pure and I/O free.

mod bloodlinks;
mod characteristics;
mod point_budget;
mod trait_list;

pub use bloodlinks::{Bloodlinks, Kinship};
pub use characteristics::{
    group_score, CharacteristicGroup, Characteristics, DerivedScores, PrimaryCharacteristic,
};
pub use point_budget::{
    base_points, karma_modifier, BudgetInputs, PointBudget, FIRST_GENERATION_BASE, KARMA_MAX,
    KARMA_MIN, LATER_GENERATION_BASE, POINTS_PER_ALLY, POINTS_PER_CONTRIBUTION, POINTS_PER_ENEMY,
    POINTS_PER_KARMA, POINTS_PER_WEAKNESS, SECOND_GENERATION_BASE,
};
pub use trait_list::TraitList;
