//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Schedule instances
        .route(
            "/schedule-instances",
            post(handlers::schedule_instances::create_instance),
        )
        .route(
            "/schedule-instances",
            put(handlers::schedule_instances::update_instance),
        )
        .route(
            "/schedule-instances",
            get(handlers::schedule_instances::get_all_instances),
        )
        .route(
            "/all-schedule-instances",
            get(handlers::schedule_instances::get_all_instances_unpaged),
        )
        .route(
            "/schedule-operations",
            get(handlers::schedule_instances::get_schedule_operations),
        )
        .route(
            "/schedule-instances/{id}",
            get(handlers::schedule_instances::get_instance),
        )
        .route(
            "/schedule-instances/{id}",
            delete(handlers::schedule_instances::delete_instance),
        )
        // Schedule templates
        .route(
            "/schedule-templates",
            post(handlers::schedule_templates::create_template),
        )
        .route(
            "/schedule-templates",
            put(handlers::schedule_templates::update_template),
        )
        .route(
            "/schedule-templates",
            get(handlers::schedule_templates::get_all_templates),
        )
        .route(
            "/schedule-templates/{id}",
            get(handlers::schedule_templates::get_template),
        )
        .route(
            "/schedule-templates/{id}",
            delete(handlers::schedule_templates::delete_template),
        )
        .route(
            "/_search/schedule-templates",
            get(handlers::schedule_templates::search_templates),
        )
        // Weekdays
        .route("/weekdays", post(handlers::weekdays::create_weekday))
        .route("/weekdays", put(handlers::weekdays::update_weekday))
        .route("/weekdays", get(handlers::weekdays::get_all_weekdays))
        .route("/weekdays/{id}", get(handlers::weekdays::get_weekday))
        .route("/weekdays/{id}", delete(handlers::weekdays::delete_weekday))
        .route("/_search/weekdays", get(handlers::weekdays::search_weekdays))
        // Vehicle facilities
        .route(
            "/vehicle-facilities",
            post(handlers::vehicle_facilities::create_facility),
        )
        .route(
            "/vehicle-facilities",
            put(handlers::vehicle_facilities::update_facility),
        )
        .route(
            "/vehicle-facilities",
            get(handlers::vehicle_facilities::get_all_facilities),
        )
        .route(
            "/vehicle-facilities/{id}",
            get(handlers::vehicle_facilities::get_facility),
        )
        .route(
            "/vehicle-facilities/{id}",
            delete(handlers::vehicle_facilities::delete_facility),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::i18n::Translator;
    use std::sync::Arc;

    #[test]
    fn router_builds_with_local_state() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo, Translator::empty());
        let _router = create_router(state);
    }
}
