//! Unified error types for the domain layer
//!
//! Every failure the domain can report is a local, recoverable condition that
//! the caller turns into a corrective message ("fill in the name", "remove a
//! power first"). Nothing here is fatal.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., missing required field, value out of range)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The character already holds the maximum number of powers
    #[error("Power slots exhausted: a character cannot hold more than {max} powers")]
    SlotLimitExceeded { max: usize },

    /// The character already holds a power with this catalog id
    #[error("Power already acquired: {0}")]
    DuplicatePower(String),

    /// The character holds no power with this id
    #[error("Power not found on character: {0}")]
    PowerNotFound(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or blank
    /// - Values are outside allowed ranges
    /// - List indices do not exist
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("Character name is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a slot limit error
    pub fn slot_limit_exceeded(max: usize) -> Self {
        Self::SlotLimitExceeded { max }
    }

    /// Create a duplicate power error
    pub fn duplicate_power(power_id: impl Into<String>) -> Self {
        Self::DuplicatePower(power_id.into())
    }

    /// Create a power not found error
    pub fn power_not_found(power_id: impl Into<String>) -> Self {
        Self::PowerNotFound(power_id.into())
    }

    /// Returns true for validation failures (missing or out-of-range input).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("Character name is required");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation failed: Character name is required"
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Power catalog entry", "telepathy");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Power catalog entry"));
        assert!(err.to_string().contains("telepathy"));
    }

    #[test]
    fn test_slot_limit_error() {
        let err = DomainError::slot_limit_exceeded(3);
        assert_eq!(
            err.to_string(),
            "Power slots exhausted: a character cannot hold more than 3 powers"
        );
    }

    #[test]
    fn test_power_errors_carry_id() {
        assert_eq!(
            DomainError::duplicate_power("trump").to_string(),
            "Power already acquired: trump"
        );
        assert_eq!(
            DomainError::power_not_found("logrus").to_string(),
            "Power not found on character: logrus"
        );
        assert!(!DomainError::power_not_found("logrus").is_validation());
    }
}
