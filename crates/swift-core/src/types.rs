//! # Domain Types
//!
//! Core domain types used throughout the registry.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    BankCode     │   │ BankCodeSummary │   │  CodeDetails    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (PK)      │──►│  code           │◄──│  record         │       │
//! │  │  bank_name      │   │  bank_name      │   │  branches?      │       │
//! │  │  address        │   │  address        │   └─────────────────┘       │
//! │  │  country_iso2   │   │  country_iso2   │                              │
//! │  │  country_name   │   │  is_headquarter │   ┌─────────────────┐       │
//! │  │  is_headquarter │   └─────────────────┘   │  CountryCodes   │       │
//! │  │  town_name?     │                          │  iso2 + name    │       │
//! │  └─────────────────┘                          │  codes[]        │       │
//! │                                               └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `code` is the only key. There is no surrogate id: two rows are the same
//! record iff their upper-cased codes are equal.

use serde::{Deserialize, Serialize};

use crate::classifier::normalize_code;

// =============================================================================
// BankCode
// =============================================================================

/// A stored SWIFT code record.
///
/// Text fields default to empty on input so that a missing field is
/// reported by the validator as `required` rather than rejected as a
/// malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCode {
    /// 11-character SWIFT/BIC code.
    #[serde(default, alias = "swiftCode")]
    pub code: String,

    #[serde(default)]
    pub bank_name: String,

    #[serde(default)]
    pub address: String,

    /// ISO-3166-1 alpha-2 country code.
    #[serde(default, alias = "countryISO2")]
    pub country_iso2: String,

    #[serde(default)]
    pub country_name: String,

    /// Must agree with the code's `XXX` suffix.
    #[serde(default)]
    pub is_headquarter: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_name: Option<String>,
}

impl BankCode {
    /// Returns the canonical stored form of this record.
    ///
    /// - `code`, `country_iso2`, `country_name` are trimmed and upper-cased
    /// - `bank_name` and `address` are trimmed
    /// - a blank `town_name` becomes `None`
    pub fn normalized(self) -> Self {
        BankCode {
            code: normalize_code(&self.code),
            bank_name: self.bank_name.trim().to_string(),
            address: self.address.trim().to_string(),
            country_iso2: normalize_code(&self.country_iso2),
            country_name: self.country_name.trim().to_uppercase(),
            is_headquarter: self.is_headquarter,
            town_name: self
                .town_name
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    /// Projects the record to its summary form.
    pub fn summary(&self) -> BankCodeSummary {
        BankCodeSummary::from(self)
    }
}

// =============================================================================
// BankCodeSummary
// =============================================================================

/// Projection used in branch and country listings.
///
/// Carries neither the country name nor the town.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCodeSummary {
    pub code: String,
    pub bank_name: String,
    pub address: String,
    pub country_iso2: String,
    pub is_headquarter: bool,
}

impl From<&BankCode> for BankCodeSummary {
    fn from(record: &BankCode) -> Self {
        BankCodeSummary {
            code: record.code.clone(),
            bank_name: record.bank_name.clone(),
            address: record.address.clone(),
            country_iso2: record.country_iso2.clone(),
            is_headquarter: record.is_headquarter,
        }
    }
}

// =============================================================================
// Use-case Results
// =============================================================================

/// Result of a lookup by code.
///
/// `branches` is `Some` exactly when the requested code is a headquarter
/// code, even if the institution has no branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDetails {
    #[serde(flatten)]
    pub record: BankCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BankCodeSummary>>,
}

/// Result of a lookup by country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCodes {
    pub country_iso2: String,
    pub country_name: String,
    pub codes: Vec<BankCodeSummary>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BankCode {
        BankCode {
            code: " abcdef12xxx".to_string(),
            bank_name: " Bank of Test ".to_string(),
            address: "123 Main St ".to_string(),
            country_iso2: "us".to_string(),
            country_name: "United States".to_string(),
            is_headquarter: true,
            town_name: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_normalized_upper_cases_keys() {
        let record = sample().normalized();
        assert_eq!(record.code, "ABCDEF12XXX");
        assert_eq!(record.country_iso2, "US");
        assert_eq!(record.country_name, "UNITED STATES");
        assert_eq!(record.bank_name, "Bank of Test");
        assert_eq!(record.address, "123 Main St");
        assert_eq!(record.town_name, None);
    }

    #[test]
    fn test_normalized_is_idempotent() {
        let once = sample().normalized();
        let twice = once.clone().normalized();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deserialize_accepts_legacy_field_names() {
        let json = r#"{
            "swiftCode": "BPKOPLPWXXX",
            "bankName": "PKO BANK POLSKI S.A.",
            "address": "PULAWSKA 15",
            "countryISO2": "PL",
            "countryName": "POLAND",
            "isHeadquarter": true
        }"#;
        let record: BankCode = serde_json::from_str(json).unwrap();
        assert_eq!(record.code, "BPKOPLPWXXX");
        assert_eq!(record.country_iso2, "PL");
        assert_eq!(record.town_name, None);
    }

    #[test]
    fn test_deserialize_missing_fields_default_to_empty() {
        let record: BankCode = serde_json::from_str("{}").unwrap();
        assert!(record.code.is_empty());
        assert!(!record.is_headquarter);
    }

    #[test]
    fn test_code_details_serialization() {
        let hq = sample().normalized();
        let details = CodeDetails {
            record: hq.clone(),
            branches: Some(vec![]),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["code"], "ABCDEF12XXX");
        assert_eq!(json["countryIso2"], "US");
        assert!(json["branches"].as_array().unwrap().is_empty());
        assert!(json.get("townName").is_none());

        let branch = CodeDetails {
            record: hq,
            branches: None,
        };
        let json = serde_json::to_value(&branch).unwrap();
        assert!(json.get("branches").is_none());
    }
}
