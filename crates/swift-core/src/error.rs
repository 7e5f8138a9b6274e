//! # Error Types
//!
//! Domain-specific error types for swift-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swift-core errors (this file)                                         │
//! │  ├── Violation / Violations - Field-level validation failures          │
//! │  └── RegistryError          - Use-case outcome kinds                   │
//! │                                                                         │
//! │  swift-core store port (store.rs)                                      │
//! │  └── StoreError             - NotFound / UniqueViolation / Unknown     │
//! │                                                                         │
//! │  swift-db errors (separate crate)                                      │
//! │  └── DbError                - sqlx failures, mapped into StoreError    │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError               - Status code + JSON body                  │
//! │                                                                         │
//! │  Flow: DbError → StoreError → RegistryError → ApiError → Client        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

// =============================================================================
// Validation Violations
// =============================================================================

/// A `BankCode` field that a validation rule can report against.
///
/// Serialized with the same camelCase names the HTTP body uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Code,
    CountryIso2,
    BankName,
    Address,
    CountryName,
    IsHeadquarter,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::CountryIso2 => "countryIso2",
            Field::BankName => "bankName",
            Field::Address => "address",
            Field::CountryName => "countryName",
            Field::IsHeadquarter => "isHeadquarter",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Missing or blank after trimming.
    Required,
    /// Wrong number of characters.
    InvalidLength { expected: usize, actual: usize },
    /// Contains characters outside `[A-Za-z0-9]`.
    NotAlphanumeric,
    /// Not an assigned ISO-3166-1 alpha-2 code.
    InvalidCountryCode,
    /// `isHeadquarter` disagrees with the code's `XXX` suffix.
    HeadquarterCodeMismatch,
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {}", describe(.kind))]
pub struct Violation {
    pub field: Field,
    pub kind: ViolationKind,
}

fn describe(kind: &ViolationKind) -> String {
    match kind {
        ViolationKind::Required => "is required".to_string(),
        ViolationKind::InvalidLength { expected, actual } => {
            format!("must be {expected} characters long, got {actual}")
        }
        ViolationKind::NotAlphanumeric => "must contain only letters and digits".to_string(),
        ViolationKind::InvalidCountryCode => {
            "must be an ISO-3166-1 alpha-2 country code".to_string()
        }
        ViolationKind::HeadquarterCodeMismatch => {
            "must be true exactly when the code ends with XXX".to_string()
        }
    }
}

impl Violation {
    pub fn new(field: Field, kind: ViolationKind) -> Self {
        Violation { field, kind }
    }
}

/// Ordered list of every rule a candidate failed.
///
/// Never empty when returned from [`crate::validation::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Violations(Vec::new())
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Returns true when some violation names `field`.
    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Returns true when some violation has exactly this field and kind.
    pub fn contains(&self, field: Field, kind: ViolationKind) -> bool {
        self.0.iter().any(|v| v.field == field && v.kind == kind)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Registry Error
// =============================================================================

/// Outcome kinds of the registry use cases.
///
/// ## Client-correctable vs. opaque
/// ```text
/// ValidationFailed   ─┐
/// CodeNotFound        │  surfaced verbatim to the caller
/// CountryNotFound     │
/// CodeAlreadyExists  ─┘
/// Timeout            ─── deadline expired, in-flight store call dropped
/// Store(Unknown)     ─── logged, surfaced without internal detail
/// ```
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The candidate broke one or more validation rules.
    #[error("Validation failed: {0}")]
    ValidationFailed(Violations),

    /// No record with this code.
    #[error("SWIFT code not found: {0}")]
    CodeNotFound(String),

    /// No record for this country.
    #[error("No SWIFT codes found for country: {0}")]
    CountryNotFound(String),

    /// A record with this code is already stored.
    #[error("SWIFT code already exists: {0}")]
    CodeAlreadyExists(String),

    /// The operation did not finish before the configured deadline.
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Unclassified storage failure, passed through unchanged.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with RegistryError.
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let v = Violation::new(Field::Code, ViolationKind::Required);
        assert_eq!(v.to_string(), "code: is required");

        let v = Violation::new(
            Field::Code,
            ViolationKind::InvalidLength {
                expected: 11,
                actual: 8,
            },
        );
        assert_eq!(v.to_string(), "code: must be 11 characters long, got 8");
    }

    #[test]
    fn test_violation_serialization() {
        let v = Violation::new(Field::IsHeadquarter, ViolationKind::HeadquarterCodeMismatch);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["field"], "isHeadquarter");
        assert_eq!(json["kind"], "headquarter_code_mismatch");

        let v = Violation::new(
            Field::CountryIso2,
            ViolationKind::InvalidLength {
                expected: 2,
                actual: 3,
            },
        );
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["field"], "countryIso2");
        assert_eq!(json["kind"]["invalid_length"]["expected"], 2);
    }

    #[test]
    fn test_violations_display_joins_in_order() {
        let mut violations = Violations::new();
        violations.push(Violation::new(Field::Code, ViolationKind::Required));
        violations.push(Violation::new(Field::BankName, ViolationKind::Required));
        assert_eq!(
            violations.to_string(),
            "code: is required; bankName: is required"
        );
        assert!(violations.has_field(Field::BankName));
        assert!(!violations.has_field(Field::Address));
    }

    #[test]
    fn test_registry_error_messages() {
        let err = RegistryError::CodeNotFound("ABCDEF12XXX".to_string());
        assert_eq!(err.to_string(), "SWIFT code not found: ABCDEF12XXX");

        let err: RegistryError = StoreError::NotFound.into();
        assert!(matches!(err, RegistryError::Store(StoreError::NotFound)));
    }
}
