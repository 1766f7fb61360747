//! Point budget - the build resources a character may spend
//!
//! The budget is a pure function of the generation tier, karma, and the
//! lengths of the four trait lists. Nothing bounds the total: an over-spent
//! character is reported, never rejected.

use serde::{Deserialize, Serialize};

/// Base allotment for a first-generation character.
pub const FIRST_GENERATION_BASE: i32 = 800;
/// Base allotment for a second-generation character.
pub const SECOND_GENERATION_BASE: i32 = 600;
/// Base allotment for third generation and any unrecognised tier.
pub const LATER_GENERATION_BASE: i32 = 400;

/// Points per karma step (granted when negative, charged when positive).
pub const POINTS_PER_KARMA: i32 = 10;
/// Points granted per weakness.
pub const POINTS_PER_WEAKNESS: i32 = 15;
/// Points charged per ally.
pub const POINTS_PER_ALLY: i32 = 5;
/// Points charged per contribution.
pub const POINTS_PER_CONTRIBUTION: i32 = 10;
/// Points granted per enemy.
pub const POINTS_PER_ENEMY: i32 = 5;

/// Inclusive karma bounds accepted by the sheet.
pub const KARMA_MIN: i32 = -10;
pub const KARMA_MAX: i32 = 10;

/// Base points for a generation tier.
///
/// Generation 1 and 2 have dedicated allotments; everything else, including
/// out-of-range tiers, falls through to the third-generation allotment.
pub fn base_points(generation: i32) -> i32 {
    match generation {
        1 => FIRST_GENERATION_BASE,
        2 => SECOND_GENERATION_BASE,
        _ => LATER_GENERATION_BASE,
    }
}

/// Signed points contributed by karma: negative karma grants, positive costs.
pub fn karma_modifier(karma: i32) -> i32 {
    karma.saturating_mul(POINTS_PER_KARMA).saturating_neg()
}

/// The raw inputs of the budget calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetInputs {
    pub generation: i32,
    pub karma: i32,
    pub weaknesses: usize,
    pub allies: usize,
    pub contributions: usize,
    pub enemies: usize,
}

/// A computed point budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointBudget {
    /// Allotment fixed by the generation tier
    pub base: i32,
    /// Signed sum of karma and trait modifiers
    pub modifier: i32,
    /// `base + modifier`
    pub total: i32,
}

impl PointBudget {
    /// Compute the budget for the given inputs.
    ///
    /// # Example
    ///
    /// ```
    /// use ambrien_domain::value_objects::{BudgetInputs, PointBudget};
    ///
    /// let budget = PointBudget::calculate(&BudgetInputs {
    ///     generation: 1,
    ///     karma: -2,
    ///     weaknesses: 2,
    ///     allies: 1,
    ///     enemies: 1,
    ///     contributions: 0,
    /// });
    ///
    /// assert_eq!(budget.base, 800);
    /// assert_eq!(budget.modifier, 50);
    /// assert_eq!(budget.total, 850);
    /// ```
    pub fn calculate(inputs: &BudgetInputs) -> Self {
        let base = base_points(inputs.generation);
        let modifier = karma_modifier(inputs.karma)
            .saturating_add(count_points(inputs.weaknesses, POINTS_PER_WEAKNESS))
            .saturating_sub(count_points(inputs.allies, POINTS_PER_ALLY))
            .saturating_sub(count_points(inputs.contributions, POINTS_PER_CONTRIBUTION))
            .saturating_add(count_points(inputs.enemies, POINTS_PER_ENEMY));

        Self {
            base,
            modifier,
            total: base.saturating_add(modifier),
        }
    }
}

fn count_points(count: usize, per_item: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(per_item)
}
