//! Persistence layer for scheduling entities.
//!
//! Storage is abstracted behind per-entity repository traits (combined into
//! [`FullRepository`]) so backends can be swapped:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository.rs)                      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  LocalRepository (in-memory)                            │
//! │  PostgresRepository (feature-gated)                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The application holds an `Arc<dyn FullRepository>` created by
//! [`RepositoryFactory`]; no process-global repository state.

// Feature flag priority: postgres > local
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod error;
pub mod factory;
pub mod page;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use factory::{RepositoryFactory, RepositoryType};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::{PostgresConfig, PostgresRepository};
pub use repository::{
    FullRepository, ScheduleInstanceRepository, ScheduleTemplateRepository,
    VehicleFacilityRepository, WeekdayRepository,
};
