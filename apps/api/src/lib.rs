//! # SWIFT Code Registry API
//!
//! HTTP transport over the registry use cases.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /codes/{code}           → fetch_by_code     200 | 404          │
//! │  GET    /codes/country/{iso2}   → fetch_by_country  200 | 404          │
//! │  POST   /codes                  → add               201 | 400 | 409    │
//! │  DELETE /codes/{code}           → delete            204 | 404          │
//! │  GET    /health                 → database ping     200 | 503          │
//! │                                                                         │
//! │  Any route may also answer 504 (deadline) or 500 (store failure).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`]; every key can be set with a `SWIFT_` variable.

pub mod config;
pub mod error;
pub mod handlers;

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use swift_core::RegistryService;
use swift_db::{BankCodeRepository, Database};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use crate::config::{ApiConfig, ConfigError};
pub use crate::error::{ApiError, ErrorCode};

/// Shared application state.
///
/// Cloned into every handler; both fields share one connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: RegistryService<BankCodeRepository>,
    pub db: Database,
}

impl AppState {
    /// Wires the registry to `db`, bounding each operation by `deadline`.
    pub fn new(db: Database, deadline: Duration) -> Self {
        AppState {
            registry: RegistryService::new(db.bank_codes()).with_deadline(deadline),
            db,
        }
    }
}

/// Builds the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/codes", axum::routing::post(handlers::create_code))
        .route(
            "/codes/{code}",
            get(handlers::get_code).delete(handlers::delete_code),
        )
        .route("/codes/country/{iso2}", get(handlers::get_country))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
