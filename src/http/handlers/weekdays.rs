//! REST handlers for managing weekdays.

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use tracing::{debug, warn};

use crate::http::alerts::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use crate::http::dto::{PageQuery, SearchQuery};
use crate::http::error::AppError;
use crate::http::pagination::pagination_headers;
use crate::http::state::AppState;
use crate::models::{Weekday, WeekdayId};

const ENTITY_NAME: &str = "weekday";

/// POST /api/weekdays : Create a new weekday.
///
/// Returns 201 with the stored entity, or 400 if the body already carries an
/// id or fails validation. The stored entity is mirrored into the search
/// index best-effort.
pub async fn create_weekday(
    State(state): State<AppState>,
    Json(weekday): Json<Weekday>,
) -> Result<(StatusCode, HeaderMap, Json<Weekday>), AppError> {
    debug!("REST request to save Weekday : {:?}", weekday);
    if weekday.id.is_some() {
        return Err(AppError::bad_request(
            "A new weekday cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }
    weekday
        .validate()
        .map_err(|msg| AppError::bad_request(msg, ENTITY_NAME, "required"))?;

    let result = state.repository.save_weekday(&weekday).await?;
    if let Err(e) = state.weekday_index.save(&result).await {
        warn!("Failed to mirror weekday into search index: {}", e);
    }

    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    let mut headers = entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/weekdays/{}", id)) {
        headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(result)))
}

/// PUT /api/weekdays : Update an existing weekday.
///
/// Returns 200 with the stored entity, or 400 if the body has no id.
pub async fn update_weekday(
    State(state): State<AppState>,
    Json(weekday): Json<Weekday>,
) -> Result<(HeaderMap, Json<Weekday>), AppError> {
    debug!("REST request to update Weekday : {:?}", weekday);
    if weekday.id.is_none() {
        return Err(AppError::bad_request("Invalid id", ENTITY_NAME, "idnull"));
    }
    weekday
        .validate()
        .map_err(|msg| AppError::bad_request(msg, ENTITY_NAME, "required"))?;

    let result = state.repository.save_weekday(&weekday).await?;
    if let Err(e) = state.weekday_index.save(&result).await {
        warn!("Failed to mirror weekday into search index: {}", e);
    }

    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    Ok((entity_update_alert(ENTITY_NAME, &id), Json(result)))
}

/// GET /api/weekdays : Get a page of weekdays.
pub async fn get_all_weekdays(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<(HeaderMap, Json<Vec<Weekday>>), AppError> {
    debug!("REST request to get a page of Weekdays");
    let request = query.into();
    let page = state.repository.find_weekdays(request).await?;
    let headers = pagination_headers("/api/weekdays", &request, &page);
    Ok((headers, Json(page.items)))
}

/// GET /api/weekdays/{id} : Get one weekday by id, 404 if absent.
pub async fn get_weekday(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Weekday>, AppError> {
    debug!("REST request to get Weekday : {}", id);
    state
        .repository
        .find_weekday_by_id(WeekdayId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Weekday {} not found", id)))
}

/// DELETE /api/weekdays/{id} : Delete a weekday. Idempotent; deleting an
/// unknown id still returns 200. The index delete is best-effort.
pub async fn delete_weekday(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<HeaderMap, AppError> {
    debug!("REST request to delete Weekday : {}", id);
    state
        .repository
        .delete_weekday_by_id(WeekdayId::new(id))
        .await?;
    if let Err(e) = state.weekday_index.delete_by_id(id).await {
        warn!("Failed to delete weekday from search index: {}", e);
    }
    Ok(entity_deletion_alert(ENTITY_NAME, &id.to_string()))
}

/// GET /api/_search/weekdays?query= : Full-text weekday search.
pub async fn search_weekdays(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<(HeaderMap, Json<Vec<Weekday>>), AppError> {
    debug!(
        "REST request to search for a page of Weekdays for query {}",
        query.query
    );
    let request = query.page_request();
    let page = state.weekday_index.search(&query.query, request).await?;
    let headers = pagination_headers("/api/_search/weekdays", &request, &page);
    Ok((headers, Json(page.items)))
}
