//! Trait lists - the four free-text lists that move the point budget

use serde::{Deserialize, Serialize};

use super::point_budget::{
    POINTS_PER_ALLY, POINTS_PER_CONTRIBUTION, POINTS_PER_ENEMY, POINTS_PER_WEAKNESS,
};

/// One of the list-valued budget modifiers on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitList {
    Contributions,
    Weaknesses,
    Allies,
    Enemies,
}

impl TraitList {
    pub const ALL: [TraitList; 4] = [
        Self::Contributions,
        Self::Weaknesses,
        Self::Allies,
        Self::Enemies,
    ];

    /// Signed points each entry adds to the budget.
    pub fn points_per_entry(self) -> i32 {
        match self {
            Self::Contributions => -POINTS_PER_CONTRIBUTION,
            Self::Weaknesses => POINTS_PER_WEAKNESS,
            Self::Allies => -POINTS_PER_ALLY,
            Self::Enemies => POINTS_PER_ENEMY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Contributions => "Contributions",
            Self::Weaknesses => "Faiblesses",
            Self::Allies => "Alliés",
            Self::Enemies => "Ennemis",
        }
    }
}
