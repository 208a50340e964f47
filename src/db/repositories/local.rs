//! In-memory repository for unit testing and local development.
//!
//! Tables are `BTreeMap`s keyed by id so ordered iteration gives stable,
//! id-ordered pagination for free. Ids are assigned from a shared monotonic
//! counter; saving with a client-supplied id advances the counter past it so
//! a later allocation never lands on an occupied key. All state lives behind
//! `parking_lot` locks; there are no transaction boundaries beyond single
//! operations.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::db::error::RepositoryResult;
use crate::db::page::{Page, PageRequest};
use crate::db::repository::{
    FullRepository, ScheduleInstanceRepository, ScheduleTemplateRepository,
    VehicleFacilityRepository, WeekdayRepository,
};
use crate::models::{
    FacilityId, InstanceId, ScheduleInstance, ScheduleTemplate, TemplateId, VehicleFacility,
    Weekday, WeekdayId,
};

/// In-memory implementation of all repository traits.
#[derive(Default)]
pub struct LocalRepository {
    templates: RwLock<BTreeMap<i64, ScheduleTemplate>>,
    instances: RwLock<BTreeMap<i64, ScheduleInstance>>,
    weekdays: RwLock<BTreeMap<i64, Weekday>>,
    facilities: RwLock<BTreeMap<i64, VehicleFacility>>,
    next_id: AtomicI64,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Keep the counter ahead of a client-supplied id so a later allocation
    /// can never collide with a row stored under that id.
    fn reserve_id(&self, id: i64) {
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScheduleTemplateRepository for LocalRepository {
    async fn save_template(
        &self,
        template: &ScheduleTemplate,
    ) -> RepositoryResult<ScheduleTemplate> {
        let mut stored = template.clone();
        let id = match stored.id {
            Some(id) => {
                self.reserve_id(id.value());
                id.value()
            }
            None => {
                let id = self.allocate_id();
                stored.id = Some(TemplateId::new(id));
                id
            }
        };
        self.templates.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_template_by_id(
        &self,
        id: TemplateId,
    ) -> RepositoryResult<Option<ScheduleTemplate>> {
        Ok(self.templates.read().get(&id.value()).cloned())
    }

    async fn find_templates(&self, page: PageRequest) -> RepositoryResult<Page<ScheduleTemplate>> {
        let all: Vec<ScheduleTemplate> = self.templates.read().values().cloned().collect();
        Ok(Page::from_slice(&all, &page))
    }

    async fn delete_template_by_id(&self, id: TemplateId) -> RepositoryResult<()> {
        self.templates.write().remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl ScheduleInstanceRepository for LocalRepository {
    async fn save_instance(
        &self,
        instance: &ScheduleInstance,
    ) -> RepositoryResult<ScheduleInstance> {
        let mut stored = instance.clone();
        let id = match stored.id {
            Some(id) => {
                self.reserve_id(id.value());
                id.value()
            }
            None => {
                let id = self.allocate_id();
                stored.id = Some(InstanceId::new(id));
                id
            }
        };
        self.instances.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_instance_by_id(
        &self,
        id: InstanceId,
    ) -> RepositoryResult<Option<ScheduleInstance>> {
        Ok(self.instances.read().get(&id.value()).cloned())
    }

    async fn find_instances(&self, page: PageRequest) -> RepositoryResult<Page<ScheduleInstance>> {
        let all: Vec<ScheduleInstance> = self.instances.read().values().cloned().collect();
        Ok(Page::from_slice(&all, &page))
    }

    async fn find_all_instances(&self) -> RepositoryResult<Vec<ScheduleInstance>> {
        Ok(self.instances.read().values().cloned().collect())
    }

    async fn find_instances_by_date(
        &self,
        date: NaiveDate,
        search: &str,
        page: PageRequest,
    ) -> RepositoryResult<Page<ScheduleInstance>> {
        let matching: Vec<ScheduleInstance> = self
            .instances
            .read()
            .values()
            .filter(|inst| inst.instance_date == date && inst.matches_search(search))
            .cloned()
            .collect();
        Ok(Page::from_slice(&matching, &page))
    }

    async fn delete_instance_by_id(&self, id: InstanceId) -> RepositoryResult<()> {
        self.instances.write().remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl WeekdayRepository for LocalRepository {
    async fn save_weekday(&self, weekday: &Weekday) -> RepositoryResult<Weekday> {
        let mut stored = weekday.clone();
        let id = match stored.id {
            Some(id) => {
                self.reserve_id(id.value());
                id.value()
            }
            None => {
                let id = self.allocate_id();
                stored.id = Some(WeekdayId::new(id));
                id
            }
        };
        self.weekdays.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_weekday_by_id(&self, id: WeekdayId) -> RepositoryResult<Option<Weekday>> {
        Ok(self.weekdays.read().get(&id.value()).cloned())
    }

    async fn find_weekdays(&self, page: PageRequest) -> RepositoryResult<Page<Weekday>> {
        let all: Vec<Weekday> = self.weekdays.read().values().cloned().collect();
        Ok(Page::from_slice(&all, &page))
    }

    async fn delete_weekday_by_id(&self, id: WeekdayId) -> RepositoryResult<()> {
        self.weekdays.write().remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl VehicleFacilityRepository for LocalRepository {
    async fn save_facility(&self, facility: &VehicleFacility) -> RepositoryResult<VehicleFacility> {
        let mut stored = facility.clone();
        let id = match stored.id {
            Some(id) => {
                self.reserve_id(id.value());
                id.value()
            }
            None => {
                let id = self.allocate_id();
                stored.id = Some(FacilityId::new(id));
                id
            }
        };
        self.facilities.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_facility_by_id(
        &self,
        id: FacilityId,
    ) -> RepositoryResult<Option<VehicleFacility>> {
        Ok(self.facilities.read().get(&id.value()).cloned())
    }

    async fn find_facilities(&self, page: PageRequest) -> RepositoryResult<Page<VehicleFacility>> {
        let all: Vec<VehicleFacility> = self.facilities.read().values().cloned().collect();
        Ok(Page::from_slice(&all, &page))
    }

    async fn delete_facility_by_id(&self, id: FacilityId) -> RepositoryResult<()> {
        self.facilities.write().remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn weekday(name: &str) -> Weekday {
        Weekday {
            id: None,
            name: name.to_string(),
        }
    }

    fn instance_on(date: NaiveDate, notes: &str) -> ScheduleInstance {
        ScheduleInstance {
            id: None,
            instance_date: date,
            start_time: Some(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()),
            vehicle_number: None,
            notes: Some(notes.to_string()),
            schedule_template_id: None,
        }
    }

    #[tokio::test]
    async fn save_assigns_ids_monotonically() {
        let repo = LocalRepository::new();
        let a = repo.save_weekday(&weekday("Monday")).await.unwrap();
        let b = repo.save_weekday(&weekday("Tuesday")).await.unwrap();
        assert!(a.id.unwrap().value() < b.id.unwrap().value());
    }

    #[tokio::test]
    async fn save_with_id_updates_in_place() {
        let repo = LocalRepository::new();
        let mut saved = repo.save_weekday(&weekday("Monday")).await.unwrap();
        saved.name = "Mon".to_string();
        let updated = repo.save_weekday(&saved).await.unwrap();
        assert_eq!(updated.id, saved.id);

        let page = repo.find_weekdays(PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "Mon");
    }

    #[tokio::test]
    async fn client_supplied_id_is_never_reused_by_the_allocator() {
        let repo = LocalRepository::new();
        let parked = Weekday {
            id: Some(WeekdayId::new(3)),
            name: "Parked".to_string(),
        };
        repo.save_weekday(&parked).await.unwrap();

        // Allocation must skip past the occupied key instead of catching up
        // to it and overwriting the row.
        for name in ["Monday", "Tuesday", "Wednesday"] {
            let saved = repo.save_weekday(&weekday(name)).await.unwrap();
            assert!(saved.id.unwrap().value() > 3);
        }

        let kept = repo.find_weekday_by_id(WeekdayId::new(3)).await.unwrap();
        assert_eq!(kept.unwrap().name, "Parked");
    }

    #[tokio::test]
    async fn save_with_unknown_id_upserts() {
        let repo = LocalRepository::new();
        let row = Weekday {
            id: Some(WeekdayId::new(10)),
            name: "Friday".to_string(),
        };
        let saved = repo.save_weekday(&row).await.unwrap();
        assert_eq!(saved.id, Some(WeekdayId::new(10)));

        let found = repo.find_weekday_by_id(WeekdayId::new(10)).await.unwrap();
        assert_eq!(found.unwrap().name, "Friday");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = LocalRepository::new();
        let saved = repo.save_weekday(&weekday("Monday")).await.unwrap();
        let id = saved.id.unwrap();
        repo.delete_weekday_by_id(id).await.unwrap();
        // Second delete of the same id still succeeds.
        repo.delete_weekday_by_id(id).await.unwrap();
        assert!(repo.find_weekday_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pagination_returns_at_most_size_items_with_total() {
        let repo = LocalRepository::new();
        for i in 0..7 {
            repo.save_weekday(&weekday(&format!("day-{}", i)))
                .await
                .unwrap();
        }
        let page = repo.find_weekdays(PageRequest::new(0, 3)).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_count, 7);

        let last = repo.find_weekdays(PageRequest::new(2, 3)).await.unwrap();
        assert_eq!(last.items.len(), 1);
    }

    #[tokio::test]
    async fn date_scoped_search_filters_by_date_and_term() {
        let repo = LocalRepository::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        repo.save_instance(&instance_on(today, "brake inspection"))
            .await
            .unwrap();
        repo.save_instance(&instance_on(today, "oil change"))
            .await
            .unwrap();
        repo.save_instance(&instance_on(tomorrow, "brake inspection"))
            .await
            .unwrap();

        let page = repo
            .find_instances_by_date(today, "brake", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].notes.as_deref(), Some("brake inspection"));

        let all_today = repo
            .find_instances_by_date(today, "", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(all_today.total_count, 2);
    }
}
