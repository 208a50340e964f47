//! HTTP handlers for the REST API.
//!
//! One module per resource, following the same CRUD shape: create rejects a
//! body that already carries an id, update rejects one without, get returns
//! 404 for unknown ids, and delete is idempotent. Mutations emit alert
//! headers; list endpoints emit pagination headers.

pub mod schedule_instances;
pub mod schedule_templates;
pub mod vehicle_facilities;
pub mod weekdays;

use axum::{extract::State, Json};

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}
