//! Skill entity - modeled on the sheet, no rule reads it yet

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named skill with a free-form level.
///
/// The id is an opaque string; new skills get a uuid, stored ones keep
/// whatever id they were saved with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    id: String,
    name: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    description: String,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            level: 0,
            description: String::new(),
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
