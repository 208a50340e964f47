//! Row types mapping between Diesel and the domain entities.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{schedule_instances, schedule_templates, vehicle_facilities, weekdays};
use crate::models::{
    FacilityId, InstanceId, ScheduleInstance, ScheduleTemplate, TemplateId, VehicleFacility,
    Weekday, WeekdayId,
};

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = schedule_templates)]
pub struct TemplateRow {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub weekday_ids: Vec<i64>,
    pub vehicle_facility_ids: Vec<i64>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = schedule_templates)]
pub struct NewTemplateRow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub weekday_ids: Vec<i64>,
    pub vehicle_facility_ids: Vec<i64>,
}

impl From<TemplateRow> for ScheduleTemplate {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: Some(TemplateId::new(row.id)),
            start_time: row.start_time,
            end_time: row.end_time,
            weekday_ids: row.weekday_ids,
            vehicle_facility_ids: row.vehicle_facility_ids,
        }
    }
}

impl From<&ScheduleTemplate> for NewTemplateRow {
    fn from(template: &ScheduleTemplate) -> Self {
        Self {
            start_time: template.start_time,
            end_time: template.end_time,
            weekday_ids: template.weekday_ids.clone(),
            vehicle_facility_ids: template.vehicle_facility_ids.clone(),
        }
    }
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = schedule_instances)]
pub struct InstanceRow {
    pub id: i64,
    pub instance_date: NaiveDate,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub vehicle_number: Option<String>,
    pub notes: Option<String>,
    pub schedule_template_id: Option<i64>,
}

// Updates are full replacements, so None clears the column.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = schedule_instances)]
#[diesel(treat_none_as_null = true)]
pub struct NewInstanceRow {
    pub instance_date: NaiveDate,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub vehicle_number: Option<String>,
    pub notes: Option<String>,
    pub schedule_template_id: Option<i64>,
}

impl From<InstanceRow> for ScheduleInstance {
    fn from(row: InstanceRow) -> Self {
        Self {
            id: Some(InstanceId::new(row.id)),
            instance_date: row.instance_date,
            start_time: row.start_time,
            end_time: row.end_time,
            vehicle_number: row.vehicle_number,
            notes: row.notes,
            schedule_template_id: row.schedule_template_id.map(TemplateId::new),
        }
    }
}

impl From<&ScheduleInstance> for NewInstanceRow {
    fn from(instance: &ScheduleInstance) -> Self {
        Self {
            instance_date: instance.instance_date,
            start_time: instance.start_time,
            end_time: instance.end_time,
            vehicle_number: instance.vehicle_number.clone(),
            notes: instance.notes.clone(),
            schedule_template_id: instance.schedule_template_id.map(|id| id.value()),
        }
    }
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = weekdays)]
pub struct WeekdayRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = weekdays)]
pub struct NewWeekdayRow {
    pub name: String,
}

impl From<WeekdayRow> for Weekday {
    fn from(row: WeekdayRow) -> Self {
        Self {
            id: Some(WeekdayId::new(row.id)),
            name: row.name,
        }
    }
}

impl From<&Weekday> for NewWeekdayRow {
    fn from(weekday: &Weekday) -> Self {
        Self {
            name: weekday.name.clone(),
        }
    }
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = vehicle_facilities)]
pub struct FacilityRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = vehicle_facilities)]
#[diesel(treat_none_as_null = true)]
pub struct NewFacilityRow {
    pub name: String,
    pub description: Option<String>,
}

impl From<FacilityRow> for VehicleFacility {
    fn from(row: FacilityRow) -> Self {
        Self {
            id: Some(FacilityId::new(row.id)),
            name: row.name,
            description: row.description,
        }
    }
}

impl From<&VehicleFacility> for NewFacilityRow {
    fn from(facility: &VehicleFacility) -> Self {
        Self {
            name: facility.name.clone(),
            description: facility.description.clone(),
        }
    }
}
