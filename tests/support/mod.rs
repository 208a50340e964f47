//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use depot_sched::db::repository::FullRepository;
use depot_sched::db::LocalRepository;
use depot_sched::http::AppState;
use depot_sched::i18n::Translator;
use depot_sched::models::{ScheduleInstance, ScheduleTemplate, VehicleFacility, Weekday};

/// Application state over a fresh in-memory repository and a small test
/// dictionary.
pub fn app_state() -> AppState {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    let translator =
        Translator::from_str_content("brake,tiringa,piraku\ninspection,parikshawa,aaivu\n")
            .expect("test dictionary is well formed");
    AppState::new(repo, translator)
}

pub fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0).unwrap()
}

pub fn weekday(name: &str) -> Weekday {
    Weekday {
        id: None,
        name: name.to_string(),
    }
}

pub fn facility(name: &str) -> VehicleFacility {
    VehicleFacility {
        id: None,
        name: name.to_string(),
        description: None,
    }
}

pub fn template(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleTemplate {
    ScheduleTemplate {
        id: None,
        start_time: start,
        end_time: end,
        weekday_ids: vec![],
        vehicle_facility_ids: vec![],
    }
}

pub fn instance(date: NaiveDate) -> ScheduleInstance {
    ScheduleInstance {
        id: None,
        instance_date: date,
        start_time: None,
        end_time: None,
        vehicle_number: None,
        notes: None,
        schedule_template_id: None,
    }
}
