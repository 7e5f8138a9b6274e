//! # swift-db: SQLite Storage for the SWIFT Code Registry
//!
//! This crate persists SWIFT code records in SQLite with sqlx and loads
//! them in bulk from CSV exports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Registry Data Flow                               │
//! │                                                                         │
//! │  swift-api handler (GET /codes/{code})                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RegistryService<BankCodeRepository>   (swift-core)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     swift-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │ BankCodeRepo   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (RecordStore)  │   │  (embedded)  │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │           ▲                                                     │   │
//! │  │           │            ┌────────────────┐                      │   │
//! │  │           └────────────│ import (CSV)   │                      │   │
//! │  │                        └────────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (swift_codes)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `RecordStore` implementation
//! - [`import`] - CSV bulk import
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swift_core::RegistryService;
//! use swift_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("swift.db")).await?;
//! let registry = RegistryService::new(db.bank_codes());
//!
//! let details = registry.fetch_by_code("BPKOPLPWXXX").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod import;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use import::{import_csv, ImportReport};
pub use pool::{Database, DbConfig};
pub use repository::bank_code::BankCodeRepository;
