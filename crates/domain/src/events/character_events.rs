//! Character-related domain events
//!
//! These values communicate what changed when a character was mutated,
//! letting callers word their feedback ("power added", "character locked").

use crate::value_objects::PointBudget;

/// Outcome of a power mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerChange {
    /// A catalog entry was acquired at the given cost
    Acquired { power_id: String, cost: i32 },
    /// A power was dropped from the sheet
    Removed { power_id: String },
    /// The level changed and any progress was forfeited
    LevelChanged {
        power_id: String,
        from: u8,
        to: u8,
        forfeited_progress: u8,
    },
    /// Progress moved (already clamped to 0..=100)
    ProgressAdjusted { power_id: String, from: u8, to: u8 },
}

/// Outcome of toggling the lock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockChange {
    Locked,
    Unlocked,
    /// The flag already had the requested value
    Unchanged { locked: bool },
}

/// Outcome of a mutation that feeds the point budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetChange {
    pub from: PointBudget,
    pub to: PointBudget,
}

impl BudgetChange {
    /// Signed change of the total.
    pub fn delta(&self) -> i32 {
        self.to.total - self.from.total
    }
}
