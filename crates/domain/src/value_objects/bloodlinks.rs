//! Bloodlinks - declared family relations
//!
//! Relatives are labels, not references: a parent named here need not exist as
//! a character record, and removing a character never touches other sheets.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of family relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kinship {
    Parent,
    Child,
    Sibling,
}

impl Kinship {
    pub fn label(self) -> &'static str {
        match self {
            Self::Parent => "Parents",
            Self::Child => "Enfants",
            Self::Sibling => "Fratrie",
        }
    }
}

/// A character's parents, children and siblings, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bloodlinks {
    parents: Vec<String>,
    children: Vec<String>,
    siblings: Vec<String>,
}

impl Bloodlinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn siblings(&self) -> &[String] {
        &self.siblings
    }

    /// Relatives of the given kind.
    pub fn relatives(&self, kinship: Kinship) -> &[String] {
        match kinship {
            Kinship::Parent => &self.parents,
            Kinship::Child => &self.children,
            Kinship::Sibling => &self.siblings,
        }
    }

    fn relatives_mut(&mut self, kinship: Kinship) -> &mut Vec<String> {
        match kinship {
            Kinship::Parent => &mut self.parents,
            Kinship::Child => &mut self.children,
            Kinship::Sibling => &mut self.siblings,
        }
    }

    /// Append a relative. Duplicates are kept.
    pub fn add(&mut self, kinship: Kinship, name: impl Into<String>) {
        self.relatives_mut(kinship).push(name.into());
    }

    /// Remove the relative at `index`, returning its name.
    pub fn remove(&mut self, kinship: Kinship, index: usize) -> Result<String, DomainError> {
        let relatives = self.relatives_mut(kinship);
        if index >= relatives.len() {
            return Err(DomainError::validation(format!(
                "No {} at position {} (have {})",
                kinship.label().to_lowercase(),
                index,
                relatives.len()
            )));
        }
        Ok(relatives.remove(index))
    }

    /// Total number of declared relatives.
    pub fn len(&self) -> usize {
        self.parents.len() + self.children.len() + self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_insertion_order_and_duplicates() {
        let mut bloodlinks = Bloodlinks::new();
        bloodlinks.add(Kinship::Sibling, "Corwin");
        bloodlinks.add(Kinship::Sibling, "Eric");
        bloodlinks.add(Kinship::Sibling, "Corwin");

        assert_eq!(bloodlinks.siblings(), ["Corwin", "Eric", "Corwin"]);
        assert!(bloodlinks.parents().is_empty());
        assert_eq!(bloodlinks.len(), 3);
    }

    #[test]
    fn remove_returns_the_name() {
        let mut bloodlinks = Bloodlinks::new();
        bloodlinks.add(Kinship::Parent, "Oberon");
        bloodlinks.add(Kinship::Parent, "Faiella");

        assert_eq!(bloodlinks.remove(Kinship::Parent, 0).unwrap(), "Oberon");
        assert_eq!(bloodlinks.relatives(Kinship::Parent), ["Faiella"]);
    }

    #[test]
    fn remove_out_of_range_is_validation_error() {
        let mut bloodlinks = Bloodlinks::new();
        let err = bloodlinks.remove(Kinship::Child, 0).unwrap_err();
        assert!(err.is_validation());
        assert!(bloodlinks.is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let bloodlinks: Bloodlinks = serde_json::from_str(r#"{"children":["Merlin"]}"#).unwrap();
        assert_eq!(bloodlinks.children(), ["Merlin"]);
        assert!(bloodlinks.parents().is_empty());
        assert!(bloodlinks.siblings().is_empty());
    }
}
