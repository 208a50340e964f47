//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic migration execution on startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::page::{Page, PageRequest};
use crate::db::repository::{
    FullRepository, ScheduleInstanceRepository, ScheduleTemplateRepository,
    VehicleFacilityRepository, WeekdayRepository,
};
use crate::models::{
    FacilityId, InstanceId, ScheduleInstance, ScheduleTemplate, TemplateId, VehicleFacility,
    Weekday, WeekdayId,
};

mod models;
mod schema;

use models::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
        }
    }
}

impl PostgresConfig {
    /// Build configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL is not set".to_string())?;

        let read_u64 = |key: &str, default: u64| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        Ok(Self {
            database_url,
            max_pool_size: read_u64("PG_POOL_MAX", 10) as u32,
            min_pool_size: read_u64("PG_POOL_MIN", 1) as u32,
            connection_timeout_sec: read_u64("PG_CONN_TIMEOUT_SEC", 30),
        })
    }
}

/// Postgres-backed implementation of all repository traits.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a repository, build the connection pool, and run pending
    /// migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .build(manager)?;

        let mut conn = pool.get()?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::Configuration {
                message: format!("Migration failed: {}", e),
                context: ErrorContext::new("run_pending_migrations"),
            }
        })?;

        Ok(Self { pool })
    }

    /// Run a blocking Diesel operation on the blocking thread pool.
    async fn run<F, T>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Blocking task join error: {}", e)))?
        .map_err(|e| e.with_operation(operation))
    }
}

#[async_trait]
impl ScheduleTemplateRepository for PostgresRepository {
    async fn save_template(
        &self,
        template: &ScheduleTemplate,
    ) -> RepositoryResult<ScheduleTemplate> {
        use schema::schedule_templates::dsl::*;
        let row = NewTemplateRow::from(template);
        let existing_id = template.id;
        self.run("save_template", move |conn| {
            // Save is an upsert regardless of whether the id row exists yet,
            // matching the local backend.
            let saved: TemplateRow = match existing_id {
                Some(tid) => diesel::insert_into(schedule_templates)
                    .values((id.eq(tid.value()), &row))
                    .on_conflict(id)
                    .do_update()
                    .set(&row)
                    .get_result(conn)?,
                None => diesel::insert_into(schedule_templates)
                    .values(&row)
                    .get_result(conn)?,
            };
            Ok(saved.into())
        })
        .await
    }

    async fn find_template_by_id(
        &self,
        template_id: TemplateId,
    ) -> RepositoryResult<Option<ScheduleTemplate>> {
        use schema::schedule_templates::dsl::*;
        self.run("find_template_by_id", move |conn| {
            let row: Option<TemplateRow> = schedule_templates
                .filter(id.eq(template_id.value()))
                .first(conn)
                .optional()?;
            Ok(row.map(Into::into))
        })
        .await
    }

    async fn find_templates(&self, page: PageRequest) -> RepositoryResult<Page<ScheduleTemplate>> {
        use schema::schedule_templates::dsl::*;
        self.run("find_templates", move |conn| {
            let total: i64 = schedule_templates.count().get_result(conn)?;
            let rows: Vec<TemplateRow> = schedule_templates
                .order(id.asc())
                .offset(page.offset() as i64)
                .limit(page.size as i64)
                .load(conn)?;
            Ok(Page::new(
                rows.into_iter().map(Into::into).collect(),
                total as u64,
            ))
        })
        .await
    }

    async fn delete_template_by_id(&self, template_id: TemplateId) -> RepositoryResult<()> {
        use schema::schedule_templates::dsl::*;
        self.run("delete_template_by_id", move |conn| {
            diesel::delete(schedule_templates.filter(id.eq(template_id.value())))
                .execute(conn)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ScheduleInstanceRepository for PostgresRepository {
    async fn save_instance(
        &self,
        instance: &ScheduleInstance,
    ) -> RepositoryResult<ScheduleInstance> {
        use schema::schedule_instances::dsl::*;
        let row = NewInstanceRow::from(instance);
        let existing_id = instance.id;
        self.run("save_instance", move |conn| {
            let saved: InstanceRow = match existing_id {
                Some(iid) => diesel::insert_into(schedule_instances)
                    .values((id.eq(iid.value()), &row))
                    .on_conflict(id)
                    .do_update()
                    .set(&row)
                    .get_result(conn)?,
                None => diesel::insert_into(schedule_instances)
                    .values(&row)
                    .get_result(conn)?,
            };
            Ok(saved.into())
        })
        .await
    }

    async fn find_instance_by_id(
        &self,
        instance_id: InstanceId,
    ) -> RepositoryResult<Option<ScheduleInstance>> {
        use schema::schedule_instances::dsl::*;
        self.run("find_instance_by_id", move |conn| {
            let row: Option<InstanceRow> = schedule_instances
                .filter(id.eq(instance_id.value()))
                .first(conn)
                .optional()?;
            Ok(row.map(Into::into))
        })
        .await
    }

    async fn find_instances(&self, page: PageRequest) -> RepositoryResult<Page<ScheduleInstance>> {
        use schema::schedule_instances::dsl::*;
        self.run("find_instances", move |conn| {
            let total: i64 = schedule_instances.count().get_result(conn)?;
            let rows: Vec<InstanceRow> = schedule_instances
                .order(id.asc())
                .offset(page.offset() as i64)
                .limit(page.size as i64)
                .load(conn)?;
            Ok(Page::new(
                rows.into_iter().map(Into::into).collect(),
                total as u64,
            ))
        })
        .await
    }

    async fn find_all_instances(&self) -> RepositoryResult<Vec<ScheduleInstance>> {
        use schema::schedule_instances::dsl::*;
        self.run("find_all_instances", move |conn| {
            let rows: Vec<InstanceRow> = schedule_instances.order(id.asc()).load(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn find_instances_by_date(
        &self,
        date: NaiveDate,
        search: &str,
        page: PageRequest,
    ) -> RepositoryResult<Page<ScheduleInstance>> {
        use schema::schedule_instances::dsl::*;
        let pattern = format!("%{}%", search);
        let filtered = !search.is_empty();
        self.run("find_instances_by_date", move |conn| {
            let (total, rows): (i64, Vec<InstanceRow>) = if filtered {
                let text_match = vehicle_number
                    .ilike(pattern.clone())
                    .or(notes.ilike(pattern.clone()));
                let total = schedule_instances
                    .filter(instance_date.eq(date))
                    .filter(text_match.clone())
                    .count()
                    .get_result(conn)?;
                let rows = schedule_instances
                    .filter(instance_date.eq(date))
                    .filter(text_match)
                    .order(id.asc())
                    .offset(page.offset() as i64)
                    .limit(page.size as i64)
                    .load(conn)?;
                (total, rows)
            } else {
                let total = schedule_instances
                    .filter(instance_date.eq(date))
                    .count()
                    .get_result(conn)?;
                let rows = schedule_instances
                    .filter(instance_date.eq(date))
                    .order(id.asc())
                    .offset(page.offset() as i64)
                    .limit(page.size as i64)
                    .load(conn)?;
                (total, rows)
            };

            Ok(Page::new(
                rows.into_iter().map(Into::into).collect(),
                total as u64,
            ))
        })
        .await
    }

    async fn delete_instance_by_id(&self, instance_id: InstanceId) -> RepositoryResult<()> {
        use schema::schedule_instances::dsl::*;
        self.run("delete_instance_by_id", move |conn| {
            diesel::delete(schedule_instances.filter(id.eq(instance_id.value())))
                .execute(conn)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl WeekdayRepository for PostgresRepository {
    async fn save_weekday(&self, weekday: &Weekday) -> RepositoryResult<Weekday> {
        use schema::weekdays::dsl::*;
        let row = NewWeekdayRow::from(weekday);
        let existing_id = weekday.id;
        self.run("save_weekday", move |conn| {
            let saved: WeekdayRow = match existing_id {
                Some(wid) => diesel::insert_into(weekdays)
                    .values((id.eq(wid.value()), &row))
                    .on_conflict(id)
                    .do_update()
                    .set(&row)
                    .get_result(conn)?,
                None => diesel::insert_into(weekdays).values(&row).get_result(conn)?,
            };
            Ok(saved.into())
        })
        .await
    }

    async fn find_weekday_by_id(&self, weekday_id: WeekdayId) -> RepositoryResult<Option<Weekday>> {
        use schema::weekdays::dsl::*;
        self.run("find_weekday_by_id", move |conn| {
            let row: Option<WeekdayRow> = weekdays
                .filter(id.eq(weekday_id.value()))
                .first(conn)
                .optional()?;
            Ok(row.map(Into::into))
        })
        .await
    }

    async fn find_weekdays(&self, page: PageRequest) -> RepositoryResult<Page<Weekday>> {
        use schema::weekdays::dsl::*;
        self.run("find_weekdays", move |conn| {
            let total: i64 = weekdays.count().get_result(conn)?;
            let rows: Vec<WeekdayRow> = weekdays
                .order(id.asc())
                .offset(page.offset() as i64)
                .limit(page.size as i64)
                .load(conn)?;
            Ok(Page::new(
                rows.into_iter().map(Into::into).collect(),
                total as u64,
            ))
        })
        .await
    }

    async fn delete_weekday_by_id(&self, weekday_id: WeekdayId) -> RepositoryResult<()> {
        use schema::weekdays::dsl::*;
        self.run("delete_weekday_by_id", move |conn| {
            diesel::delete(weekdays.filter(id.eq(weekday_id.value()))).execute(conn)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl VehicleFacilityRepository for PostgresRepository {
    async fn save_facility(&self, facility: &VehicleFacility) -> RepositoryResult<VehicleFacility> {
        use schema::vehicle_facilities::dsl::*;
        let row = NewFacilityRow::from(facility);
        let existing_id = facility.id;
        self.run("save_facility", move |conn| {
            let saved: FacilityRow = match existing_id {
                Some(fid) => diesel::insert_into(vehicle_facilities)
                    .values((id.eq(fid.value()), &row))
                    .on_conflict(id)
                    .do_update()
                    .set(&row)
                    .get_result(conn)?,
                None => diesel::insert_into(vehicle_facilities)
                    .values(&row)
                    .get_result(conn)?,
            };
            Ok(saved.into())
        })
        .await
    }

    async fn find_facility_by_id(
        &self,
        facility_id: FacilityId,
    ) -> RepositoryResult<Option<VehicleFacility>> {
        use schema::vehicle_facilities::dsl::*;
        self.run("find_facility_by_id", move |conn| {
            let row: Option<FacilityRow> = vehicle_facilities
                .filter(id.eq(facility_id.value()))
                .first(conn)
                .optional()?;
            Ok(row.map(Into::into))
        })
        .await
    }

    async fn find_facilities(&self, page: PageRequest) -> RepositoryResult<Page<VehicleFacility>> {
        use schema::vehicle_facilities::dsl::*;
        self.run("find_facilities", move |conn| {
            let total: i64 = vehicle_facilities.count().get_result(conn)?;
            let rows: Vec<FacilityRow> = vehicle_facilities
                .order(id.asc())
                .offset(page.offset() as i64)
                .limit(page.size as i64)
                .load(conn)?;
            Ok(Page::new(
                rows.into_iter().map(Into::into).collect(),
                total as u64,
            ))
        })
        .await
    }

    async fn delete_facility_by_id(&self, facility_id: FacilityId) -> RepositoryResult<()> {
        use schema::vehicle_facilities::dsl::*;
        self.run("delete_facility_by_id", move |conn| {
            diesel::delete(vehicle_facilities.filter(id.eq(facility_id.value()))).execute(conn)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.run("health_check", |conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }
}
