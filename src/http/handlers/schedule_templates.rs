//! REST handlers for managing schedule templates.

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
use crate::models::{ScheduleTemplate, TemplateId};

const ENTITY_NAME: &str = "scheduleTemplate";

/// POST /api/schedule-templates : Create a new schedule template.
pub async fn create_template(
    State(state): State<AppState>,
    Json(template): Json<ScheduleTemplate>,
) -> Result<(StatusCode, HeaderMap, Json<ScheduleTemplate>), AppError> {
    debug!("REST request to save ScheduleTemplate : {:?}", template);
    if template.id.is_some() {
        return Err(AppError::bad_request(
            "A new scheduleTemplate cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let result = state.repository.save_template(&template).await?;
    if let Err(e) = state.template_index.save(&result).await {
        warn!("Failed to mirror schedule template into search index: {}", e);
    }

    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    let mut headers = entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/schedule-templates/{}", id)) {
        headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(result)))
}

/// PUT /api/schedule-templates : Update an existing schedule template.
pub async fn update_template(
    State(state): State<AppState>,
    Json(template): Json<ScheduleTemplate>,
) -> Result<(HeaderMap, Json<ScheduleTemplate>), AppError> {
    debug!("REST request to update ScheduleTemplate : {:?}", template);
    if template.id.is_none() {
        return Err(AppError::bad_request("Invalid id", ENTITY_NAME, "idnull"));
    }

    let result = state.repository.save_template(&template).await?;
    if let Err(e) = state.template_index.save(&result).await {
        warn!("Failed to mirror schedule template into search index: {}", e);
    }

    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    Ok((entity_update_alert(ENTITY_NAME, &id), Json(result)))
}

/// GET /api/schedule-templates : Get a page of schedule templates.
pub async fn get_all_templates(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<(HeaderMap, Json<Vec<ScheduleTemplate>>), AppError> {
    debug!("REST request to get a page of ScheduleTemplates");
    let request = query.into();
    let page = state.repository.find_templates(request).await?;
    let headers = pagination_headers("/api/schedule-templates", &request, &page);
    Ok((headers, Json(page.items)))
}

/// GET /api/schedule-templates/{id} : Get one template by id, 404 if absent.
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ScheduleTemplate>, AppError> {
    debug!("REST request to get ScheduleTemplate : {}", id);
    state
        .repository
        .find_template_by_id(TemplateId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("ScheduleTemplate {} not found", id)))
}

/// DELETE /api/schedule-templates/{id} : Delete a template, idempotent.
///
/// Instances created from the template keep their weak reference; deletion
/// does not cascade.
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<HeaderMap, AppError> {
    debug!("REST request to delete ScheduleTemplate : {}", id);
    state
        .repository
        .delete_template_by_id(TemplateId::new(id))
        .await?;
    if let Err(e) = state.template_index.delete_by_id(id).await {
        warn!("Failed to delete schedule template from search index: {}", e);
    }
    Ok(entity_deletion_alert(ENTITY_NAME, &id.to_string()))
}

/// GET /api/_search/schedule-templates?query= : Full-text template search.
pub async fn search_templates(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<(HeaderMap, Json<Vec<ScheduleTemplate>>), AppError> {
    debug!(
        "REST request to search for a page of ScheduleTemplates for query {}",
        query.query
    );
    let request = query.page_request();
    let page = state.template_index.search(&query.query, request).await?;
    let headers = pagination_headers("/api/_search/schedule-templates", &request, &page);
    Ok((headers, Json(page.items)))
}
