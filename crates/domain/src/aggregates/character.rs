//! Character aggregate - an Ambrien character sheet
//!
//! # Derived fields
//!
//! The five characteristic groups and the point budget (`pointsBase`,
//! `pointsTotal`) are never authored. Every mutation that touches one of their
//! inputs ends with [`Character::recompute_derived`], and deserialization
//! recomputes them as well, so a `Character` value is always complete and can
//! be handed to an export collaborator as is.
//!
//! # Locking
//!
//! `locked` is a soft flag. The aggregate records it but does not refuse
//! mutations while it is set: the calling layer is expected to check
//! [`Character::is_locked`] before editing.
//!
//! # Time
//!
//! Mutations take `now` explicitly. `updated_at` moves only when a mutation
//! succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Power, PowerCatalog, Skill, MAX_POWERS};
use crate::error::DomainError;
use crate::events::{BudgetChange, LockChange, PowerChange};
use crate::value_objects::{
    Bloodlinks, BudgetInputs, Characteristics, Kinship, PointBudget, PrimaryCharacteristic,
    TraitList, KARMA_MAX, KARMA_MIN,
};
use crate::CharacterId;

/// Generation of a freshly created character.
pub const DEFAULT_GENERATION: i32 = 1;

/// A player character sheet.
///
/// # Invariants
///
/// - `points_base` / `points_total` match [`PointBudget::calculate`] over the
///   current generation, karma and trait list lengths
/// - characteristic groups match the floor of the mean of their members
/// - at most [`MAX_POWERS`] powers, no two with the same id
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use ambrien_domain::aggregates::Character;
/// use ambrien_domain::value_objects::TraitList;
///
/// let now = Utc::now();
/// let mut character = Character::new(now);
/// assert_eq!(character.points_total(), 800);
///
/// character.add_trait(TraitList::Weaknesses, "Orgueil", now);
/// assert_eq!(character.points_total(), 815);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CharacterWireFormat")]
pub struct Character {
    // Identity
    id: CharacterId,

    // Profile (free text, no computed meaning)
    name: String,
    origin: String,
    age: i32,
    symbol: String,

    // Budget inputs
    generation: i32,
    karma: i32,
    contributions: Vec<String>,
    weaknesses: Vec<String>,
    allies: Vec<String>,
    enemies: Vec<String>,

    // Sheet sections
    characteristics: Characteristics,
    bloodlinks: Bloodlinks,
    powers: Vec<Power>,
    skills: Vec<Skill>,

    // Derived budget
    points_base: i32,
    points_total: i32,
    /// Reserved; no rule assigns it
    points_used: i32,

    locked: bool,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a blank first-generation character.
    ///
    /// All characteristics are zero, every list is empty, and the budget is
    /// already computed (800 base, 800 total).
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut character = Self {
            id: CharacterId::new(),
            name: String::new(),
            origin: String::new(),
            age: 0,
            symbol: String::new(),
            generation: DEFAULT_GENERATION,
            karma: 0,
            contributions: Vec::new(),
            weaknesses: Vec::new(),
            allies: Vec::new(),
            enemies: Vec::new(),
            characteristics: Characteristics::new(),
            bloodlinks: Bloodlinks::new(),
            powers: Vec::new(),
            skills: Vec::new(),
            points_base: 0,
            points_total: 0,
            points_used: 0,
            locked: false,
            created_at: now,
            updated_at: now,
        };
        character.recompute_derived();
        character
    }

    // =========================================================================
    // Profile Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[inline]
    pub fn age(&self) -> i32 {
        self.age
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    // =========================================================================
    // Budget Accessors
    // =========================================================================

    #[inline]
    pub fn generation(&self) -> i32 {
        self.generation
    }

    #[inline]
    pub fn karma(&self) -> i32 {
        self.karma
    }

    /// Entries of one trait list, in insertion order.
    pub fn traits(&self, list: TraitList) -> &[String] {
        match list {
            TraitList::Contributions => &self.contributions,
            TraitList::Weaknesses => &self.weaknesses,
            TraitList::Allies => &self.allies,
            TraitList::Enemies => &self.enemies,
        }
    }

    #[inline]
    pub fn contributions(&self) -> &[String] {
        &self.contributions
    }

    #[inline]
    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    #[inline]
    pub fn allies(&self) -> &[String] {
        &self.allies
    }

    #[inline]
    pub fn enemies(&self) -> &[String] {
        &self.enemies
    }

    #[inline]
    pub fn points_base(&self) -> i32 {
        self.points_base
    }

    #[inline]
    pub fn points_total(&self) -> i32 {
        self.points_total
    }

    #[inline]
    pub fn points_used(&self) -> i32 {
        self.points_used
    }

    /// The stored budget, with its signed modifier.
    pub fn budget(&self) -> PointBudget {
        PointBudget {
            base: self.points_base,
            modifier: self.points_total - self.points_base,
            total: self.points_total,
        }
    }

    /// The inputs the budget is computed from.
    pub fn budget_inputs(&self) -> BudgetInputs {
        BudgetInputs {
            generation: self.generation,
            karma: self.karma,
            weaknesses: self.weaknesses.len(),
            allies: self.allies.len(),
            contributions: self.contributions.len(),
            enemies: self.enemies.len(),
        }
    }

    // =========================================================================
    // Section Accessors
    // =========================================================================

    #[inline]
    pub fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    #[inline]
    pub fn bloodlinks(&self) -> &Bloodlinks {
        &self.bloodlinks
    }

    #[inline]
    pub fn powers(&self) -> &[Power] {
        &self.powers
    }

    /// The held power with this catalog id, if any.
    pub fn power(&self, power_id: &str) -> Option<&Power> {
        self.powers.iter().find(|p| p.id() == power_id)
    }

    #[inline]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Derived Fields
    // =========================================================================

    /// Recompute characteristic groups and the point budget from their inputs.
    ///
    /// Pure with respect to the inputs: calling it twice changes nothing.
    pub fn recompute_derived(&mut self) -> PointBudget {
        self.characteristics.recompute();
        let budget = PointBudget::calculate(&self.budget_inputs());
        self.points_base = budget.base;
        self.points_total = budget.total;
        budget
    }

    /// Refresh `updated_at` without changing anything else.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn recompute_budget(&mut self, now: DateTime<Utc>) -> BudgetChange {
        let from = self.budget();
        let to = self.recompute_derived();
        self.touch(now);
        BudgetChange { from, to }
    }

    // =========================================================================
    // Profile Mutations
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.name = name.into();
        self.touch(now);
    }

    pub fn set_origin(&mut self, origin: impl Into<String>, now: DateTime<Utc>) {
        self.origin = origin.into();
        self.touch(now);
    }

    pub fn set_age(&mut self, age: i32, now: DateTime<Utc>) {
        self.age = age;
        self.touch(now);
    }

    pub fn set_symbol(&mut self, symbol: impl Into<String>, now: DateTime<Utc>) {
        self.symbol = symbol.into();
        self.touch(now);
    }

    // =========================================================================
    // Budget Mutations
    // =========================================================================

    /// Set the generation tier. Any value is accepted; unknown tiers get the
    /// third-generation allotment.
    pub fn set_generation(&mut self, generation: i32, now: DateTime<Utc>) -> BudgetChange {
        self.generation = generation;
        self.recompute_budget(now)
    }

    /// Set karma.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `karma` is outside `-10..=10`.
    pub fn set_karma(
        &mut self,
        karma: i32,
        now: DateTime<Utc>,
    ) -> Result<BudgetChange, DomainError> {
        if !(KARMA_MIN..=KARMA_MAX).contains(&karma) {
            return Err(DomainError::validation(format!(
                "Karma must be between {} and {}, got {}",
                KARMA_MIN, KARMA_MAX, karma
            )));
        }
        self.karma = karma;
        Ok(self.recompute_budget(now))
    }

    fn traits_mut(&mut self, list: TraitList) -> &mut Vec<String> {
        match list {
            TraitList::Contributions => &mut self.contributions,
            TraitList::Weaknesses => &mut self.weaknesses,
            TraitList::Allies => &mut self.allies,
            TraitList::Enemies => &mut self.enemies,
        }
    }

    /// Append an entry to a trait list. Duplicates are kept.
    pub fn add_trait(
        &mut self,
        list: TraitList,
        entry: impl Into<String>,
        now: DateTime<Utc>,
    ) -> BudgetChange {
        self.traits_mut(list).push(entry.into());
        self.recompute_budget(now)
    }

    /// Remove the entry at `index` from a trait list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `index` is out of range.
    pub fn remove_trait(
        &mut self,
        list: TraitList,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<BudgetChange, DomainError> {
        let entries = self.traits_mut(list);
        if index >= entries.len() {
            return Err(DomainError::validation(format!(
                "No {} entry at position {} (have {})",
                list.label().to_lowercase(),
                index,
                entries.len()
            )));
        }
        entries.remove(index);
        Ok(self.recompute_budget(now))
    }

    /// Replace a whole trait list.
    pub fn set_traits(
        &mut self,
        list: TraitList,
        entries: Vec<String>,
        now: DateTime<Utc>,
    ) -> BudgetChange {
        *self.traits_mut(list) = entries;
        self.recompute_budget(now)
    }

    // =========================================================================
    // Characteristics & Bloodlinks
    // =========================================================================

    /// Set a primary characteristic and return the new score of its group.
    pub fn set_characteristic(
        &mut self,
        characteristic: PrimaryCharacteristic,
        value: i32,
        now: DateTime<Utc>,
    ) -> i32 {
        self.characteristics.set(characteristic, value);
        self.recompute_derived();
        self.touch(now);
        self.characteristics.group(characteristic.group())
    }

    pub fn add_relative(&mut self, kinship: Kinship, name: impl Into<String>, now: DateTime<Utc>) {
        self.bloodlinks.add(kinship, name);
        self.touch(now);
    }

    /// Remove the relative at `index`, returning the name.
    pub fn remove_relative(
        &mut self,
        kinship: Kinship,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let removed = self.bloodlinks.remove(kinship, index)?;
        self.touch(now);
        Ok(removed)
    }

    // =========================================================================
    // Powers
    // =========================================================================

    /// Acquire a power from the catalog.
    ///
    /// The new power starts at level 1 with no progress and keeps the catalog
    /// cost of this instant.
    ///
    /// # Errors
    ///
    /// - `SlotLimitExceeded` when the character already holds three powers
    /// - `DuplicatePower` when a power with this id is already held
    /// - `NotFound` when the catalog has no such id
    pub fn add_power(
        &mut self,
        catalog: &PowerCatalog,
        power_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PowerChange, DomainError> {
        if self.powers.len() >= MAX_POWERS {
            return Err(DomainError::slot_limit_exceeded(MAX_POWERS));
        }
        if self.power(power_id).is_some() {
            return Err(DomainError::duplicate_power(power_id));
        }
        let entry = catalog
            .get(power_id)
            .ok_or_else(|| DomainError::not_found("Power catalog entry", power_id))?;

        let power = Power::acquire(entry);
        let change = PowerChange::Acquired {
            power_id: power.id().to_string(),
            cost: power.cost(),
        };
        self.powers.push(power);
        self.touch(now);
        Ok(change)
    }

    /// Drop a held power.
    pub fn remove_power(
        &mut self,
        power_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PowerChange, DomainError> {
        let index = self
            .powers
            .iter()
            .position(|p| p.id() == power_id)
            .ok_or_else(|| DomainError::power_not_found(power_id))?;
        self.powers.remove(index);
        self.touch(now);
        Ok(PowerChange::Removed {
            power_id: power_id.to_string(),
        })
    }

    fn power_mut(&mut self, power_id: &str) -> Result<&mut Power, DomainError> {
        self.powers
            .iter_mut()
            .find(|p| p.id() == power_id)
            .ok_or_else(|| DomainError::power_not_found(power_id))
    }

    /// Set a power's level (1-5). Progress toward the next level is forfeited,
    /// even when the level does not change.
    pub fn set_power_level(
        &mut self,
        power_id: &str,
        level: u8,
        now: DateTime<Utc>,
    ) -> Result<PowerChange, DomainError> {
        let (from, forfeited_progress) = self.power_mut(power_id)?.set_level(level)?;
        self.touch(now);
        Ok(PowerChange::LevelChanged {
            power_id: power_id.to_string(),
            from,
            to: level,
            forfeited_progress,
        })
    }

    /// Move a power's progress by `delta`, clamped to 0-100. The level is kept.
    pub fn adjust_power_progress(
        &mut self,
        power_id: &str,
        delta: i32,
        now: DateTime<Utc>,
    ) -> Result<PowerChange, DomainError> {
        let power = self.power_mut(power_id)?;
        let from = power.adjust_progress(delta);
        let to = power.progress();
        self.touch(now);
        Ok(PowerChange::ProgressAdjusted {
            power_id: power_id.to_string(),
            from,
            to,
        })
    }

    // =========================================================================
    // Skills
    // =========================================================================

    pub fn add_skill(&mut self, skill: Skill, now: DateTime<Utc>) {
        self.skills.push(skill);
        self.touch(now);
    }

    pub fn remove_skill(
        &mut self,
        skill_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Skill, DomainError> {
        let index = self
            .skills
            .iter()
            .position(|s| s.id() == skill_id)
            .ok_or_else(|| DomainError::not_found("Skill", skill_id))?;
        let removed = self.skills.remove(index);
        self.touch(now);
        Ok(removed)
    }

    // =========================================================================
    // Locking
    // =========================================================================

    pub fn lock(&mut self, now: DateTime<Utc>) -> LockChange {
        self.set_locked(true, now)
    }

    pub fn unlock(&mut self, now: DateTime<Utc>) -> LockChange {
        self.set_locked(false, now)
    }

    pub fn toggle_lock(&mut self, now: DateTime<Utc>) -> LockChange {
        self.set_locked(!self.locked, now)
    }

    fn set_locked(&mut self, locked: bool, now: DateTime<Utc>) -> LockChange {
        if self.locked == locked {
            return LockChange::Unchanged { locked };
        }
        self.locked = locked;
        self.touch(now);
        if locked {
            LockChange::Locked
        } else {
            LockChange::Unlocked
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// The only hard gate before persistence: the name must not be blank.
    pub fn validate_for_save(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Character name is required"));
        }
        Ok(())
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Stored shape. Missing sections default to empty and the derived fields in
/// the input are ignored, then recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterWireFormat {
    id: CharacterId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    origin: String,
    #[serde(default)]
    age: i32,
    #[serde(default)]
    symbol: String,
    #[serde(default = "default_generation")]
    generation: i32,
    #[serde(default)]
    karma: i32,
    #[serde(default)]
    contributions: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    allies: Vec<String>,
    #[serde(default)]
    enemies: Vec<String>,
    #[serde(default)]
    characteristics: Characteristics,
    #[serde(default)]
    bloodlinks: Bloodlinks,
    #[serde(default)]
    powers: Vec<Power>,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    points_used: i32,
    #[serde(default)]
    locked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn default_generation() -> i32 {
    DEFAULT_GENERATION
}

impl From<CharacterWireFormat> for Character {
    fn from(wire: CharacterWireFormat) -> Self {
        let mut character = Character {
            id: wire.id,
            name: wire.name,
            origin: wire.origin,
            age: wire.age,
            symbol: wire.symbol,
            generation: wire.generation,
            karma: wire.karma,
            contributions: wire.contributions,
            weaknesses: wire.weaknesses,
            allies: wire.allies,
            enemies: wire.enemies,
            characteristics: wire.characteristics,
            bloodlinks: wire.bloodlinks,
            powers: wire.powers,
            skills: wire.skills,
            points_base: 0,
            points_total: 0,
            points_used: wire.points_used,
            locked: wire.locked,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        };
        character.recompute_derived();
        character
    }
}

// ============================================================================
// Tests
// ============================================================================
