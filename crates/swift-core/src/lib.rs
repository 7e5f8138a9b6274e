//! # swift-core: Domain Rules for the SWIFT Code Registry
//!
//! This crate is the heart of the registry. It owns the entity model, the
//! code-derived headquarter/branch relationship, the validation rules, and
//! the use cases that sit on top of a storage port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SWIFT Registry Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    GET /codes/{code}  GET /codes/country/{iso2}  POST  DELETE   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ swift-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐ │   │
//! │  │   │ classifier │  │ validation │  │  registry  │  │  store   │ │   │
//! │  │   │ HQ / prefix│  │ rule list  │  │ use cases  │  │  (trait) │ │   │
//! │  │   └────────────┘  └────────────┘  └────────────┘  └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO SQL • NO HTTP • STORAGE ONLY THROUGH RecordStore           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  swift-db (Database Layer)                      │   │
//! │  │         SQLite queries, migrations, CSV bulk import             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `BankCode`, `BankCodeSummary` and use-case results
//! - [`classifier`] - Headquarter detection and institution prefix
//! - [`country`] - ISO-3166-1 alpha-2 code table
//! - [`validation`] - Field and cross-field rules
//! - [`store`] - The `RecordStore` storage port
//! - [`registry`] - `RegistryService`, the four use cases
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use swift_core::classifier::{institution_prefix, is_headquarter};
//!
//! assert!(is_headquarter("BPKOPLPWXXX"));
//! assert!(!is_headquarter("BPKOPLPWWAW"));
//! assert_eq!(institution_prefix("BPKOPLPWWAW"), Some("BPKOPLPW"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classifier;
pub mod country;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{Field, RegistryError, RegistryResult, Violation, ViolationKind, Violations};
pub use registry::RegistryService;
pub use store::{RecordStore, StoreError, StoreResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of every SWIFT/BIC code handled by the registry.
///
/// BIC8 codes are not accepted; the primary office of an institution is
/// always stored in its 11-character `XXX` form.
pub const CODE_LENGTH: usize = 11;

/// Length of the institution prefix (4 bank + 2 country + 2 location).
pub const PREFIX_LENGTH: usize = 8;

/// Branch suffix that marks a headquarter.
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// Length of an ISO-3166-1 alpha-2 country code.
pub const COUNTRY_CODE_LENGTH: usize = 2;
