//! Power entity - an acquired magical ability on a character sheet
//!
//! A power is a snapshot of a catalog entry taken at acquisition time plus the
//! character's proficiency in it. The cost never follows later catalog edits.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::power_catalog::CatalogPower;
use crate::error::DomainError;

/// Most powers a single character may hold.
pub const MAX_POWERS: usize = 3;
/// Lowest proficiency level.
pub const MIN_POWER_LEVEL: u8 = 1;
/// Highest proficiency level.
pub const MAX_POWER_LEVEL: u8 = 5;
/// Progress toward the next level is a percentage.
pub const MAX_POWER_PROGRESS: u8 = 100;

/// Display rank for a proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerRank {
    Novice,
    Apprentice,
    Adept,
    Expert,
    Master,
}

impl PowerRank {
    /// Rank for a level in `1..=5`.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Novice),
            2 => Some(Self::Apprentice),
            3 => Some(Self::Adept),
            4 => Some(Self::Expert),
            5 => Some(Self::Master),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Adept => "Adept",
            Self::Expert => "Expert",
            Self::Master => "Master",
        }
    }
}

impl fmt::Display for PowerRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A power held by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Power {
    /// Catalog key this power was acquired from
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    /// Cost in points, frozen at acquisition
    cost: i32,
    level: u8,
    #[serde(default)]
    progress: u8,
}

impl Power {
    /// Acquire a catalog entry at level 1 with no progress.
    pub fn acquire(entry: &CatalogPower) -> Self {
        Self {
            id: entry.id().to_string(),
            name: entry.name().to_string(),
            description: entry.description().to_string(),
            cost: entry.cost(),
            level: MIN_POWER_LEVEL,
            progress: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Display rank; `None` only for out-of-range stored levels.
    pub fn rank(&self) -> Option<PowerRank> {
        PowerRank::from_level(self.level)
    }

    /// Change the level, forfeiting any progress toward the next one.
    ///
    /// Returns the `(previous_level, forfeited_progress)` pair.
    pub(crate) fn set_level(&mut self, level: u8) -> Result<(u8, u8), DomainError> {
        if !(MIN_POWER_LEVEL..=MAX_POWER_LEVEL).contains(&level) {
            return Err(DomainError::validation(format!(
                "Power level must be between {} and {}, got {}",
                MIN_POWER_LEVEL, MAX_POWER_LEVEL, level
            )));
        }
        let previous = std::mem::replace(&mut self.level, level);
        let forfeited = std::mem::replace(&mut self.progress, 0);
        Ok((previous, forfeited))
    }

    /// Move progress by `delta`, clamped to `0..=100`. Returns the previous value.
    pub(crate) fn adjust_progress(&mut self, delta: i32) -> u8 {
        let next = (i32::from(self.progress).saturating_add(delta))
            .clamp(0, i32::from(MAX_POWER_PROGRESS));
        // clamped into 0..=100 above
        std::mem::replace(&mut self.progress, next as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PowerDifficulty;

    fn trump() -> Power {
        Power::acquire(&CatalogPower::new(
            "trump",
            "Les Atouts",
            "Cartes magiques",
            PowerDifficulty::High,
            120,
        ))
    }

    #[test]
    fn acquire_starts_at_novice_without_progress() {
        let power = trump();
        assert_eq!(power.id(), "trump");
        assert_eq!(power.cost(), 120);
        assert_eq!(power.level(), 1);
        assert_eq!(power.progress(), 0);
        assert_eq!(power.rank(), Some(PowerRank::Novice));
    }

    #[test]
    fn set_level_resets_progress() {
        let mut power = trump();
        power.adjust_progress(70);

        let (previous, forfeited) = power.set_level(3).unwrap();

        assert_eq!((previous, forfeited), (1, 70));
        assert_eq!(power.level(), 3);
        assert_eq!(power.progress(), 0);
        assert_eq!(power.rank().map(PowerRank::title), Some("Adept"));
    }

    #[test]
    fn set_same_level_still_resets_progress() {
        let mut power = trump();
        power.adjust_progress(40);
        power.set_level(1).unwrap();
        assert_eq!(power.progress(), 0);
    }

    #[test]
    fn set_level_rejects_out_of_range() {
        let mut power = trump();
        power.adjust_progress(30);

        assert!(power.set_level(0).unwrap_err().is_validation());
        assert!(power.set_level(6).unwrap_err().is_validation());
        assert_eq!(power.progress(), 30);
        assert_eq!(power.level(), 1);
    }

    #[test]
    fn progress_clamps_at_both_ends() {
        let mut power = trump();
        power.adjust_progress(95);
        power.adjust_progress(20);
        assert_eq!(power.progress(), 100);

        power.adjust_progress(-95);
        power.adjust_progress(-20);
        assert_eq!(power.progress(), 0);
    }

    #[test]
    fn progress_survives_extreme_deltas() {
        let mut power = trump();
        power.adjust_progress(i32::MAX);
        assert_eq!(power.progress(), 100);
        power.adjust_progress(i32::MIN);
        assert_eq!(power.progress(), 0);
    }

    #[test]
    fn rank_titles() {
        let titles: Vec<_> = (1..=5)
            .filter_map(PowerRank::from_level)
            .map(PowerRank::title)
            .collect();
        assert_eq!(titles, ["Novice", "Apprentice", "Adept", "Expert", "Master"]);
        assert_eq!(PowerRank::from_level(6), None);
    }
}
