//! # Validation Module
//!
//! Structural and cross-field rules for candidate `BankCode` records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP body (axum Json extractor)                              │
//! │  └── Shape errors: wrong JSON types → 400 BAD_REQUEST                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Per-field rules (code, countryIso2, required text)                │
//! │  └── Cross-field rule (isHeadquarter vs. XXX suffix)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── PRIMARY KEY on code (authoritative uniqueness guard)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule runs, and every failure is reported in rule order. The rules
//! are plain functions in [`RULES`]; nothing is attached to the type.
//!
//! ## Usage
//! ```rust
//! use swift_core::validation::validate;
//! use swift_core::{BankCode, Field};
//!
//! let candidate = BankCode {
//!     code: "ABCDEF12XXX".to_string(),
//!     bank_name: "Bank of Test".to_string(),
//!     address: "123 Main St".to_string(),
//!     country_iso2: "US".to_string(),
//!     country_name: "United States".to_string(),
//!     is_headquarter: false,
//!     town_name: None,
//! };
//!
//! let violations = validate(&candidate).unwrap_err();
//! assert!(violations.has_field(Field::IsHeadquarter));
//! ```

use crate::classifier::is_headquarter;
use crate::country::is_iso3166_alpha2;
use crate::error::{Field, Violation, ViolationKind, Violations};
use crate::types::BankCode;
use crate::{CODE_LENGTH, COUNTRY_CODE_LENGTH};

/// A single validation rule. Appends zero or more violations.
pub type Rule = fn(&BankCode, &mut Violations);

/// The rule list, evaluated in order.
pub const RULES: &[Rule] = &[
    check_code,
    check_country_iso2,
    check_bank_name,
    check_address,
    check_country_name,
    check_headquarter_flag,
];

/// Validates a candidate record against every rule.
///
/// ## Returns
/// * `Ok(())` - All rules pass
/// * `Err(Violations)` - Non-empty, in rule order
pub fn validate(candidate: &BankCode) -> Result<(), Violations> {
    let mut violations = Violations::new();

    for rule in RULES {
        rule(candidate, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// =============================================================================
// Field Rules
// =============================================================================

/// `code`: required, 11 characters, ASCII alphanumeric.
///
/// Case is not checked here; the code is upper-cased before storage.
fn check_code(candidate: &BankCode, out: &mut Violations) {
    let code = candidate.code.trim();

    if code.is_empty() {
        out.push(Violation::new(Field::Code, ViolationKind::Required));
        return;
    }

    let actual = code.chars().count();
    if actual != CODE_LENGTH {
        out.push(Violation::new(
            Field::Code,
            ViolationKind::InvalidLength {
                expected: CODE_LENGTH,
                actual,
            },
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        out.push(Violation::new(Field::Code, ViolationKind::NotAlphanumeric));
    }
}

/// `countryIso2`: required, 2 characters, assigned ISO-3166-1 alpha-2.
fn check_country_iso2(candidate: &BankCode, out: &mut Violations) {
    let iso2 = candidate.country_iso2.trim();

    if iso2.is_empty() {
        out.push(Violation::new(Field::CountryIso2, ViolationKind::Required));
        return;
    }

    let actual = iso2.chars().count();
    if actual != COUNTRY_CODE_LENGTH {
        out.push(Violation::new(
            Field::CountryIso2,
            ViolationKind::InvalidLength {
                expected: COUNTRY_CODE_LENGTH,
                actual,
            },
        ));
        return;
    }

    if !is_iso3166_alpha2(iso2) {
        out.push(Violation::new(
            Field::CountryIso2,
            ViolationKind::InvalidCountryCode,
        ));
    }
}

fn check_bank_name(candidate: &BankCode, out: &mut Violations) {
    require_text(Field::BankName, &candidate.bank_name, out);
}

fn check_address(candidate: &BankCode, out: &mut Violations) {
    require_text(Field::Address, &candidate.address, out);
}

fn check_country_name(candidate: &BankCode, out: &mut Violations) {
    require_text(Field::CountryName, &candidate.country_name, out);
}

fn require_text(field: Field, value: &str, out: &mut Violations) {
    if value.trim().is_empty() {
        out.push(Violation::new(field, ViolationKind::Required));
    }
}

// =============================================================================
// Cross-field Rule
// =============================================================================

/// `isHeadquarter` must equal "code ends with XXX".
///
/// Skipped when the code is blank; that case is already reported as
/// `required` and there is no suffix to compare against.
fn check_headquarter_flag(candidate: &BankCode, out: &mut Violations) {
    let code = candidate.code.trim();
    if code.is_empty() {
        return;
    }

    if is_headquarter(code) != candidate.is_headquarter {
        out.push(Violation::new(
            Field::IsHeadquarter,
            ViolationKind::HeadquarterCodeMismatch,
        ));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
