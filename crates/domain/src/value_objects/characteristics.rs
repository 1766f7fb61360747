//! Characteristics - the fifteen primary scores and their five derived groups
//!
//! Primary scores are authored by the player (0-100 in steps of 5 by UI
//! convention, not enforced here). Each group score is the floor of the mean
//! of its three members and is never authored directly: every write through
//! [`Characteristics::set`] recomputes the affected group.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five characteristic groups, each aggregating three primary scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacteristicGroup {
    Physical,
    Endurance,
    Psyche,
    Perception,
    Charisma,
}

impl CharacteristicGroup {
    pub const ALL: [CharacteristicGroup; 5] = [
        Self::Physical,
        Self::Endurance,
        Self::Psyche,
        Self::Perception,
        Self::Charisma,
    ];

    /// The three primary characteristics averaged into this group.
    pub fn members(self) -> [PrimaryCharacteristic; 3] {
        use PrimaryCharacteristic::*;
        match self {
            Self::Physical => [Dexterity, Strength, Reflex],
            Self::Endurance => [Adaptation, Regeneration, Endurance],
            Self::Psyche => [Intelligence, Concentration, Will],
            Self::Perception => [Senses, SixthSense, Empathy],
            Self::Charisma => [Eloquence, Intimidation, Appearance],
        }
    }

    /// Display label used on the character sheet.
    pub fn label(self) -> &'static str {
        match self {
            Self::Physical => "Physique",
            Self::Endurance => "Endurance",
            Self::Psyche => "Psyché",
            Self::Perception => "Perception",
            Self::Charisma => "Charisme",
        }
    }
}

impl fmt::Display for CharacteristicGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the fifteen player-authored characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryCharacteristic {
    // Physical
    Dexterity,
    Strength,
    Reflex,
    // Endurance
    Adaptation,
    Regeneration,
    Endurance,
    // Psyche
    Intelligence,
    Concentration,
    Will,
    // Perception
    Senses,
    SixthSense,
    Empathy,
    // Charisma
    Eloquence,
    Intimidation,
    Appearance,
}

impl PrimaryCharacteristic {
    pub const ALL: [PrimaryCharacteristic; 15] = [
        Self::Dexterity,
        Self::Strength,
        Self::Reflex,
        Self::Adaptation,
        Self::Regeneration,
        Self::Endurance,
        Self::Intelligence,
        Self::Concentration,
        Self::Will,
        Self::Senses,
        Self::SixthSense,
        Self::Empathy,
        Self::Eloquence,
        Self::Intimidation,
        Self::Appearance,
    ];

    /// The group this characteristic contributes to.
    pub fn group(self) -> CharacteristicGroup {
        use PrimaryCharacteristic::*;
        match self {
            Dexterity | Strength | Reflex => CharacteristicGroup::Physical,
            Adaptation | Regeneration | Endurance => CharacteristicGroup::Endurance,
            Intelligence | Concentration | Will => CharacteristicGroup::Psyche,
            Senses | SixthSense | Empathy => CharacteristicGroup::Perception,
            Eloquence | Intimidation | Appearance => CharacteristicGroup::Charisma,
        }
    }

    pub fn label(self) -> &'static str {
        use PrimaryCharacteristic::*;
        match self {
            Dexterity => "Dextérité",
            Strength => "Force",
            Reflex => "Réflexes",
            Adaptation => "Adaptation",
            Regeneration => "Régénération",
            Endurance => "Endurance",
            Intelligence => "Intelligence",
            Concentration => "Concentration",
            Will => "Volonté",
            Senses => "Sens",
            SixthSense => "Sixième sens",
            Empathy => "Empathie",
            Eloquence => "Éloquence",
            Intimidation => "Intimidation",
            Appearance => "Apparence",
        }
    }
}

/// Floor of the mean of three scores.
///
/// Total over any `i32` input: the sum is taken in `i64` and the floor division
/// rounds toward negative infinity, so negative scores propagate unclamped.
pub fn group_score(values: [i32; 3]) -> i32 {
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    // The mean of three i32 values always fits back into an i32.
    sum.div_euclid(3) as i32
}

/// The five derived group scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedScores {
    pub physical: i32,
    pub endurance_total: i32,
    pub psyche: i32,
    pub perception: i32,
    pub charisma: i32,
}

impl DerivedScores {
    pub fn get(&self, group: CharacteristicGroup) -> i32 {
        match group {
            CharacteristicGroup::Physical => self.physical,
            CharacteristicGroup::Endurance => self.endurance_total,
            CharacteristicGroup::Psyche => self.psyche,
            CharacteristicGroup::Perception => self.perception,
            CharacteristicGroup::Charisma => self.charisma,
        }
    }
}

/// Character characteristics: fifteen primaries plus five derived groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CharacteristicsWireFormat")]
pub struct Characteristics {
    dexterity: i32,
    strength: i32,
    reflex: i32,
    physical: i32,

    adaptation: i32,
    regeneration: i32,
    endurance: i32,
    endurance_total: i32,

    intelligence: i32,
    concentration: i32,
    will: i32,
    psyche: i32,

    senses: i32,
    sixth_sense: i32,
    empathy: i32,
    perception: i32,

    eloquence: i32,
    intimidation: i32,
    appearance: i32,
    charisma: i32,
}

impl Characteristics {
    /// All primaries at zero, all groups at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, characteristic: PrimaryCharacteristic, value: i32) -> Self {
        self.set(characteristic, value);
        self
    }

    /// Read a primary score.
    pub fn get(&self, characteristic: PrimaryCharacteristic) -> i32 {
        use PrimaryCharacteristic::*;
        match characteristic {
            Dexterity => self.dexterity,
            Strength => self.strength,
            Reflex => self.reflex,
            Adaptation => self.adaptation,
            Regeneration => self.regeneration,
            Endurance => self.endurance,
            Intelligence => self.intelligence,
            Concentration => self.concentration,
            Will => self.will,
            Senses => self.senses,
            SixthSense => self.sixth_sense,
            Empathy => self.empathy,
            Eloquence => self.eloquence,
            Intimidation => self.intimidation,
            Appearance => self.appearance,
        }
    }

    /// Write a primary score and recompute the derived groups.
    pub fn set(&mut self, characteristic: PrimaryCharacteristic, value: i32) {
        use PrimaryCharacteristic::*;
        let slot = match characteristic {
            Dexterity => &mut self.dexterity,
            Strength => &mut self.strength,
            Reflex => &mut self.reflex,
            Adaptation => &mut self.adaptation,
            Regeneration => &mut self.regeneration,
            Endurance => &mut self.endurance,
            Intelligence => &mut self.intelligence,
            Concentration => &mut self.concentration,
            Will => &mut self.will,
            Senses => &mut self.senses,
            SixthSense => &mut self.sixth_sense,
            Empathy => &mut self.empathy,
            Eloquence => &mut self.eloquence,
            Intimidation => &mut self.intimidation,
            Appearance => &mut self.appearance,
        };
        *slot = value;
        self.recompute();
    }

    /// Read a derived group score.
    pub fn group(&self, group: CharacteristicGroup) -> i32 {
        self.derived().get(group)
    }

    /// The stored derived scores.
    pub fn derived(&self) -> DerivedScores {
        DerivedScores {
            physical: self.physical,
            endurance_total: self.endurance_total,
            psyche: self.psyche,
            perception: self.perception,
            charisma: self.charisma,
        }
    }

    /// Compute the derived scores from the primaries without storing them.
    pub fn aggregate(&self) -> DerivedScores {
        let score = |group: CharacteristicGroup| group_score(group.members().map(|c| self.get(c)));
        DerivedScores {
            physical: score(CharacteristicGroup::Physical),
            endurance_total: score(CharacteristicGroup::Endurance),
            psyche: score(CharacteristicGroup::Psyche),
            perception: score(CharacteristicGroup::Perception),
            charisma: score(CharacteristicGroup::Charisma),
        }
    }

    /// Overwrite the derived groups with freshly aggregated values.
    pub fn recompute(&mut self) {
        let derived = self.aggregate();
        self.physical = derived.physical;
        self.endurance_total = derived.endurance_total;
        self.psyche = derived.psyche;
        self.perception = derived.perception;
        self.charisma = derived.charisma;
    }
}

/// Stored shape; derived groups in the input are ignored and recomputed.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CharacteristicsWireFormat {
    dexterity: i32,
    strength: i32,
    reflex: i32,
    adaptation: i32,
    regeneration: i32,
    endurance: i32,
    intelligence: i32,
    concentration: i32,
    will: i32,
    senses: i32,
    sixth_sense: i32,
    empathy: i32,
    eloquence: i32,
    intimidation: i32,
    appearance: i32,
}

impl From<CharacteristicsWireFormat> for Characteristics {
    fn from(wire: CharacteristicsWireFormat) -> Self {
        let mut characteristics = Characteristics {
            dexterity: wire.dexterity,
            strength: wire.strength,
            reflex: wire.reflex,
            adaptation: wire.adaptation,
            regeneration: wire.regeneration,
            endurance: wire.endurance,
            intelligence: wire.intelligence,
            concentration: wire.concentration,
            will: wire.will,
            senses: wire.senses,
            sixth_sense: wire.sixth_sense,
            empathy: wire.empathy,
            eloquence: wire.eloquence,
            intimidation: wire.intimidation,
            appearance: wire.appearance,
            ..Default::default()
        };
        characteristics.recompute();
        characteristics
    }
}
