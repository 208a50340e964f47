//! REST handlers for managing schedule instances.
//!
//! Creation supports template expansion: a request carrying a
//! `schedule_template_id` has its unset time window populated from the
//! template (see `services::instance_manager`). A request referencing a
//! template that does not exist is rejected with 400 rather than silently
//! stored without linkage.

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::Utc;
use tracing::debug;

use crate::http::alerts::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use crate::http::dto::{OperationsQuery, PageQuery};
use crate::http::error::AppError;
use crate::http::pagination::pagination_headers;
use crate::http::state::AppState;
use crate::i18n::Language;
use crate::models::{InstanceId, ScheduleInstance};
use crate::services::create_from_template;

const ENTITY_NAME: &str = "scheduleInstance";

/// POST /api/schedule-instances : Create a new schedule instance.
///
/// When the body references a template, the instance is expanded from it
/// before being stored; an unknown template id is a 400.
pub async fn create_instance(
    State(state): State<AppState>,
    Json(instance): Json<ScheduleInstance>,
) -> Result<(StatusCode, HeaderMap, Json<ScheduleInstance>), AppError> {
    debug!("REST request to save ScheduleInstance : {:?}", instance);
    if instance.id.is_some() {
        return Err(AppError::bad_request(
            "A new scheduleInstance cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let to_store = match instance.schedule_template_id {
        Some(template_id) => {
            let template = state
                .repository
                .find_template_by_id(template_id)
                .await?
                .ok_or_else(|| {
                    AppError::bad_request(
                        format!("Referenced schedule template {} does not exist", template_id),
                        ENTITY_NAME,
                        "templatemissing",
                    )
                })?;
            create_from_template(&instance, &template)
        }
        None => instance,
    };

    let result = state.repository.save_instance(&to_store).await?;

    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    let mut headers = entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/schedule-instances/{}", id)) {
        headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(result)))
}

/// PUT /api/schedule-instances : Update an existing schedule instance.
pub async fn update_instance(
    State(state): State<AppState>,
    Json(instance): Json<ScheduleInstance>,
) -> Result<(HeaderMap, Json<ScheduleInstance>), AppError> {
    debug!("REST request to update ScheduleInstance : {:?}", instance);
    if instance.id.is_none() {
        return Err(AppError::bad_request("Invalid id", ENTITY_NAME, "idnull"));
    }

    let result = state.repository.save_instance(&instance).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();
    Ok((entity_update_alert(ENTITY_NAME, &id), Json(result)))
}

/// GET /api/schedule-instances : Get a page of schedule instances.
pub async fn get_all_instances(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<(HeaderMap, Json<Vec<ScheduleInstance>>), AppError> {
    debug!("REST request to get a page of ScheduleInstances");
    let request = query.into();
    let page = state.repository.find_instances(request).await?;
    let headers = pagination_headers("/api/schedule-instances", &request, &page);
    Ok((headers, Json(page.items)))
}

/// GET /api/all-schedule-instances : Get every schedule instance, unpaged.
pub async fn get_all_instances_unpaged(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleInstance>>, AppError> {
    debug!("REST request to get a list of ScheduleInstances");
    let list = state.repository.find_all_instances().await?;
    Ok(Json(list))
}

/// GET /api/schedule-operations?search=&lang= : Current-date schedule
/// instances matching the search term, paginated.
///
/// Display text (notes) is rendered through the translator for the requested
/// language; English is the identity.
pub async fn get_schedule_operations(
    State(state): State<AppState>,
    Query(query): Query<OperationsQuery>,
) -> Result<(HeaderMap, Json<Vec<ScheduleInstance>>), AppError> {
    debug!(
        "REST request to get a page of Schedule Operations {}",
        query.search
    );
    let language = match query.lang {
        Some(ref lang) => lang
            .parse::<Language>()
            .map_err(|msg| AppError::bad_request(msg, ENTITY_NAME, "badlanguage"))?,
        None => Language::English,
    };

    let request = query.page_request();
    let current_date = Utc::now().date_naive();
    let mut page = state
        .repository
        .find_instances_by_date(current_date, &query.search, request)
        .await?;

    if language != Language::English {
        for instance in &mut page.items {
            if let Some(notes) = instance.notes.take() {
                instance.notes = Some(state.translator.translate(&notes, language));
            }
        }
    }

    let headers = pagination_headers("/api/schedule-operations", &request, &page);
    Ok((headers, Json(page.items)))
}

/// GET /api/schedule-instances/{id} : Get one instance by id, 404 if absent.
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ScheduleInstance>, AppError> {
    debug!("REST request to get ScheduleInstance : {}", id);
    state
        .repository
        .find_instance_by_id(InstanceId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("ScheduleInstance {} not found", id)))
}

/// DELETE /api/schedule-instances/{id} : Delete an instance, idempotent.
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<HeaderMap, AppError> {
    debug!("REST request to delete ScheduleInstance : {}", id);
    state
        .repository
        .delete_instance_by_id(InstanceId::new(id))
        .await?;
    Ok(entity_deletion_alert(ENTITY_NAME, &id.to_string()))
}
