//! HTTP handlers.
//!
//! Each handler delegates to [`swift_core::RegistryService`] and converts
//! the outcome; no registry rule lives here.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use swift_core::{BankCode, CodeDetails, CountryCodes};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Body of a successful `POST /codes`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /codes/{code}`
pub async fn get_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CodeDetails>, ApiError> {
    let details = state.registry.fetch_by_code(&code).await?;
    Ok(Json(details))
}

/// `GET /codes/country/{iso2}`
pub async fn get_country(
    State(state): State<AppState>,
    Path(iso2): Path<String>,
) -> Result<Json<CountryCodes>, ApiError> {
    let codes = state.registry.fetch_by_country(&iso2).await?;
    Ok(Json(codes))
}

/// `POST /codes`
pub async fn create_code(
    State(state): State<AppState>,
    payload: Result<Json<BankCode>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(candidate) = payload?;
    debug!(code = %candidate.code, "Add requested");

    let stored = state.registry.add(candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "SWIFT code added successfully",
            code: stored.code,
        }),
    ))
}

/// `DELETE /codes/{code}`
pub async fn delete_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");

    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                version,
            }),
        )
    }
}
