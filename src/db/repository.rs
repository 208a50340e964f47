//! Repository trait definitions.
//!
//! One trait per entity kind, combined into [`FullRepository`] which is what
//! the application layer holds (`Arc<dyn FullRepository>`). Implementations
//! live in `repositories/`.
//!
//! `save` is an upsert keyed on the id field: a body without an id gets a
//! fresh one assigned; a body with an id replaces the row under that id,
//! creating it when absent. Both backends follow this contract. `delete_by_id`
//! is idempotent; deleting a missing row succeeds. Paged finds are ordered by
//! id so pagination is stable.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use super::page::{Page, PageRequest};
use crate::models::{
    FacilityId, InstanceId, ScheduleInstance, ScheduleTemplate, TemplateId, VehicleFacility,
    Weekday, WeekdayId,
};

/// Storage operations for schedule templates.
#[async_trait]
pub trait ScheduleTemplateRepository {
    async fn save_template(&self, template: &ScheduleTemplate) -> RepositoryResult<ScheduleTemplate>;
    async fn find_template_by_id(&self, id: TemplateId) -> RepositoryResult<Option<ScheduleTemplate>>;
    async fn find_templates(&self, page: PageRequest) -> RepositoryResult<Page<ScheduleTemplate>>;
    async fn delete_template_by_id(&self, id: TemplateId) -> RepositoryResult<()>;
}

/// Storage operations for schedule instances.
#[async_trait]
pub trait ScheduleInstanceRepository {
    async fn save_instance(&self, instance: &ScheduleInstance) -> RepositoryResult<ScheduleInstance>;
    async fn find_instance_by_id(&self, id: InstanceId) -> RepositoryResult<Option<ScheduleInstance>>;
    async fn find_instances(&self, page: PageRequest) -> RepositoryResult<Page<ScheduleInstance>>;
    /// Unpaged listing, used by the all-schedule-instances endpoint.
    async fn find_all_instances(&self) -> RepositoryResult<Vec<ScheduleInstance>>;
    /// Date-scoped search backing the schedule-operations endpoint: instances
    /// on `date` whose vehicle number or notes contain `search` (case
    /// insensitive; empty matches all).
    async fn find_instances_by_date(
        &self,
        date: NaiveDate,
        search: &str,
        page: PageRequest,
    ) -> RepositoryResult<Page<ScheduleInstance>>;
    async fn delete_instance_by_id(&self, id: InstanceId) -> RepositoryResult<()>;
}

/// Storage operations for weekdays.
#[async_trait]
pub trait WeekdayRepository {
    async fn save_weekday(&self, weekday: &Weekday) -> RepositoryResult<Weekday>;
    async fn find_weekday_by_id(&self, id: WeekdayId) -> RepositoryResult<Option<Weekday>>;
    async fn find_weekdays(&self, page: PageRequest) -> RepositoryResult<Page<Weekday>>;
    async fn delete_weekday_by_id(&self, id: WeekdayId) -> RepositoryResult<()>;
}

/// Storage operations for vehicle facilities.
#[async_trait]
pub trait VehicleFacilityRepository {
    async fn save_facility(&self, facility: &VehicleFacility) -> RepositoryResult<VehicleFacility>;
    async fn find_facility_by_id(&self, id: FacilityId) -> RepositoryResult<Option<VehicleFacility>>;
    async fn find_facilities(&self, page: PageRequest) -> RepositoryResult<Page<VehicleFacility>>;
    async fn delete_facility_by_id(&self, id: FacilityId) -> RepositoryResult<()>;
}

/// Combined repository interface the application layer depends on.
#[async_trait]
pub trait FullRepository:
    ScheduleTemplateRepository
    + ScheduleInstanceRepository
    + WeekdayRepository
    + VehicleFacilityRepository
    + Send
    + Sync
{
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
