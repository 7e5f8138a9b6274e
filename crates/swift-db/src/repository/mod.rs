//! # Repository Module
//!
//! SQLite implementations of the swift-core storage port.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RegistryService                                                       │
//! │       │                                                                 │
//! │       │  store.get_by_code("BPKOPLPWXXX")                              │
//! │       ▼                                                                 │
//! │  BankCodeRepository                                                    │
//! │  ├── RecordStore impl (port methods, StoreError)                       │
//! │  └── inherent methods (find_by_code, insert_batch, count, DbError)     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (swift_codes)                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`bank_code::BankCodeRepository`] - SWIFT code records

pub mod bank_code;
