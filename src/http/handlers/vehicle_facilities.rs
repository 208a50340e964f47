//! REST handlers for managing vehicle facilities.
//!
//! Facilities have no search-index mirror; they live only in the store.

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use tracing::debug;

use crate::http::alerts::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use crate::http::dto::PageQuery;
use crate::http::error::AppError;
use crate::http::pagination::pagination_headers;
use crate::http::state::AppState;
use crate::models::{FacilityId, VehicleFacility};

const ENTITY_NAME: &str = "vehicleFacility";

/// POST /api/vehicle-facilities : Create a new vehicle facility.
pub async fn create_facility(
    State(state): State<AppState>,
    Json(facility): Json<VehicleFacility>,
) -> Result<(StatusCode, HeaderMap, Json<VehicleFacility>), AppError> {
    debug!("REST request to save VehicleFacility : {:?}", facility);
    if facility.id.is_some() {
        return Err(AppError::bad_request(
            "A new vehicleFacility cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }
    facility
        .validate()
        .map_err(|msg| AppError::bad_request(msg, ENTITY_NAME, "required"))?;

    let result = state.repository.save_facility(&facility).await?;

    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    let mut headers = entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/vehicle-facilities/{}", id)) {
        headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(result)))
}

/// PUT /api/vehicle-facilities : Update an existing vehicle facility.
pub async fn update_facility(
    State(state): State<AppState>,
    Json(facility): Json<VehicleFacility>,
) -> Result<(HeaderMap, Json<VehicleFacility>), AppError> {
    debug!("REST request to update VehicleFacility : {:?}", facility);
    if facility.id.is_none() {
        return Err(AppError::bad_request("Invalid id", ENTITY_NAME, "idnull"));
    }
    facility
        .validate()
        .map_err(|msg| AppError::bad_request(msg, ENTITY_NAME, "required"))?;

    let result = state.repository.save_facility(&facility).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    Ok((entity_update_alert(ENTITY_NAME, &id), Json(result)))
}

/// GET /api/vehicle-facilities : Get a page of vehicle facilities.
pub async fn get_all_facilities(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<(HeaderMap, Json<Vec<VehicleFacility>>), AppError> {
    debug!("REST request to get a page of VehicleFacilities");
    let request = query.into();
    let page = state.repository.find_facilities(request).await?;
    let headers = pagination_headers("/api/vehicle-facilities", &request, &page);
    Ok((headers, Json(page.items)))
}

/// GET /api/vehicle-facilities/{id} : Get one facility by id, 404 if absent.
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleFacility>, AppError> {
    debug!("REST request to get VehicleFacility : {}", id);
    state
        .repository
        .find_facility_by_id(FacilityId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("VehicleFacility {} not found", id)))
}

/// DELETE /api/vehicle-facilities/{id} : Delete a facility, idempotent.
pub async fn delete_facility(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<HeaderMap, AppError> {
    debug!("REST request to delete VehicleFacility : {}", id);
    state
        .repository
        .delete_facility_by_id(FacilityId::new(id))
        .await?;
    Ok(entity_deletion_alert(ENTITY_NAME, &id.to_string()))
}
