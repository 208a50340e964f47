//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::i18n::Translator;
use crate::models::{ScheduleTemplate, Weekday};
use crate::search::{InMemoryIndex, SearchRepository};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Search-index mirror for weekdays
    pub weekday_index: Arc<dyn SearchRepository<Weekday>>,
    /// Search-index mirror for schedule templates
    pub template_index: Arc<dyn SearchRepository<ScheduleTemplate>>,
    /// Immutable display-language dictionary, loaded once at startup
    pub translator: Arc<Translator>,
}

impl AppState {
    /// Create application state with in-memory search indexes.
    pub fn new(repository: Arc<dyn FullRepository>, translator: Translator) -> Self {
        Self {
            repository,
            weekday_index: Arc::new(InMemoryIndex::new()),
            template_index: Arc::new(InMemoryIndex::new()),
            translator: Arc::new(translator),
        }
    }
}
