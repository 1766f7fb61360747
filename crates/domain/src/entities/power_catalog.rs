//! Power catalog - the powers a character may choose from
//!
//! Difficulty is informational only; the budget arithmetic uses `cost`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How hard a power is to master. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerDifficulty {
    VeryHigh,
    High,
    Medium,
    Easy,
}

impl PowerDifficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Très élevée",
            Self::High => "Élevée",
            Self::Medium => "Moyenne",
            Self::Easy => "Facile",
        }
    }
}

impl fmt::Display for PowerDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selectable power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPower {
    id: String,
    name: String,
    description: String,
    difficulty: PowerDifficulty,
    cost: i32,
}

impl CatalogPower {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        difficulty: PowerDifficulty,
        cost: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            difficulty,
            cost,
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

    pub fn difficulty(&self) -> PowerDifficulty {
        self.difficulty
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Create a copy with a different cost.
    pub fn with_cost(self, cost: i32) -> Self {
        Self { cost, ..self }
    }
}

/// An ordered set of selectable powers, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerCatalog {
    entries: Vec<CatalogPower>,
}

impl PowerCatalog {
    /// Build a catalog from custom entries. Later duplicates of an id are dropped.
    pub fn new(entries: impl IntoIterator<Item = CatalogPower>) -> Self {
        let mut unique: Vec<CatalogPower> = Vec::new();
        for entry in entries {
            if !unique.iter().any(|e| e.id == entry.id) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    /// The thirteen powers of the Amber setting.
    pub fn standard() -> Self {
        use PowerDifficulty::*;
        Self::new([
            CatalogPower::new(
                "pattern",
                "La Marelle",
                "Permet de se déplacer entre les Ombres et d'influencer la réalité.",
                VeryHigh,
                150,
            ),
            CatalogPower::new(
                "logrus",
                "Le Logrus",
                "Permet de manipuler les forces du Chaos et d'atteindre des objets à distance.",
                VeryHigh,
                150,
            ),
            CatalogPower::new(
                "trump",
                "Les Atouts",
                "Permet de créer des cartes magiques pour communiquer et se téléporter.",
                High,
                120,
            ),
            CatalogPower::new(
                "shapeshifting",
                "Métamorphose",
                "Permet de changer de forme et d'apparence.",
                Medium,
                100,
            ),
            CatalogPower::new(
                "sorcery",
                "Sorcellerie",
                "Permet de lancer des sorts et de créer des effets magiques.",
                Medium,
                100,
            ),
            CatalogPower::new(
                "conjuration",
                "Conjuration",
                "Permet de créer des objets à partir de rien.",
                Medium,
                90,
            ),
            CatalogPower::new(
                "powerwords",
                "Mots de Pouvoir",
                "Permet d'invoquer des effets magiques instantanés par des mots.",
                Easy,
                80,
            ),
            CatalogPower::new(
                "artifacts",
                "Artefacts",
                "Permet d'utiliser et de créer des objets magiques.",
                Easy,
                70,
            ),
            CatalogPower::new(
                "shadow_walking",
                "Marche dans les Ombres",
                "Permet de voyager entre les Ombres sans la Marelle ou le Logrus.",
                Easy,
                60,
            ),
            CatalogPower::new(
                "broken_pattern",
                "Marelle Brisée",
                "Version imparfaite de la Marelle, moins puissante mais plus accessible.",
                High,
                110,
            ),
            CatalogPower::new(
                "constructs",
                "Constructions",
                "Permet de créer des structures magiques permanentes.",
                Medium,
                90,
            ),
            CatalogPower::new(
                "blood_curse",
                "Malédiction de Sang",
                "Permet de lancer des malédictions puissantes liées au sang.",
                High,
                120,
            ),
            CatalogPower::new(
                "jewel_manipulation",
                "Manipulation de la Joyau",
                "Permet de manipuler la Joyau du Jugement et ses pouvoirs.",
                VeryHigh,
                150,
            ),
        ])
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CatalogPower> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogPower] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the cost of an entry. Returns false when the id is unknown.
    ///
    /// Powers already acquired keep the cost they were bought at.
    pub fn set_cost(&mut self, id: &str, cost: i32) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.cost = cost;
                true
            }
            None => false,
        }
    }
}

impl Default for PowerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
