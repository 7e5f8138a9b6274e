//! # Record Store Port
//!
//! The storage contract the registry use cases are written against.
//!
//! ## Port Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RegistryService<S: RecordStore>                                       │
//! │       │                                                                 │
//! │       │  store.get_by_code("BPKOPLPWXXX")                              │
//! │       ▼                                                                 │
//! │  RecordStore (this trait)                                              │
//! │  ├── get_by_code            → BankCode | NotFound                      │
//! │  ├── get_branches_by_prefix → Vec<BankCodeSummary> (may be empty)      │
//! │  ├── get_by_country         → Vec<BankCodeSummary> (may be empty)      │
//! │  ├── get_country_name       → String | NotFound                        │
//! │  ├── insert                 → () | UniqueViolation                     │
//! │  └── delete_by_code         → () (absent code is not an error)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  swift-db::BankCodeRepository (SQLite)   or   an in-memory test store  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is a single statement against the backend. Callers cancel
//! by dropping the returned future.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{BankCode, BankCodeSummary};

/// Error signal returned by a [`RecordStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The lookup matched no rows.
    #[error("record not found")]
    NotFound,

    /// The insert collided with an existing primary key.
    #[error("unique constraint violated on {0}")]
    UniqueViolation(String),

    /// Any other backend failure.
    #[error("{0}")]
    Unknown(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract consumed by [`crate::RegistryService`].
///
/// Implementations own durable state and must enforce global uniqueness of
/// `code`. They must not apply any validation or normalization of their own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Exact lookup by code.
    async fn get_by_code(&self, code: &str) -> StoreResult<BankCode>;

    /// Records sharing `code`'s 8-character prefix, excluding `code` itself.
    async fn get_branches_by_prefix(&self, code: &str) -> StoreResult<Vec<BankCodeSummary>>;

    /// All records for a country.
    async fn get_by_country(&self, iso2: &str) -> StoreResult<Vec<BankCodeSummary>>;

    /// Country name stored alongside `iso2`.
    async fn get_country_name(&self, iso2: &str) -> StoreResult<String>;

    /// Inserts a new record.
    async fn insert(&self, record: &BankCode) -> StoreResult<()>;

    /// Deletes by exact code.
    async fn delete_by_code(&self, code: &str) -> StoreResult<()>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    async fn get_by_code(&self, code: &str) -> StoreResult<BankCode> {
        (**self).get_by_code(code).await
    }

    async fn get_branches_by_prefix(&self, code: &str) -> StoreResult<Vec<BankCodeSummary>> {
        (**self).get_branches_by_prefix(code).await
    }

    async fn get_by_country(&self, iso2: &str) -> StoreResult<Vec<BankCodeSummary>> {
        (**self).get_by_country(iso2).await
    }

    async fn get_country_name(&self, iso2: &str) -> StoreResult<String> {
        (**self).get_country_name(iso2).await
    }

    async fn insert(&self, record: &BankCode) -> StoreResult<()> {
        (**self).insert(record).await
    }

    async fn delete_by_code(&self, code: &str) -> StoreResult<()> {
        (**self).delete_by_code(code).await
    }
}
