//! Scheduling entities: templates and their dated instances.
//!
//! A `ScheduleTemplate` describes a recurring service window (start/end time
//! plus the weekdays and vehicle facilities it applies to). A
//! `ScheduleInstance` is one concrete, dated occurrence, optionally derived
//! from a template. The instance keeps a weak reference to its template by id;
//! deleting a template does not cascade to existing instances.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, TemplateId);
define_id_type!(i64, InstanceId);

/// Reusable definition of a recurring scheduled time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    /// Absent on creation; assigned by the repository.
    pub id: Option<TemplateId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Weekdays this template applies to.
    #[serde(default)]
    pub weekday_ids: Vec<i64>,
    /// Vehicle facilities this template applies to.
    #[serde(default)]
    pub vehicle_facility_ids: Vec<i64>,
}

/// One concrete, dated service appointment.
///
/// `start_time`/`end_time` may be left unset on creation when the instance is
/// derived from a template; expansion fills them in from the template window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInstance {
    /// Absent on creation; assigned by the repository.
    pub id: Option<InstanceId>,
    pub instance_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Registration number of the vehicle being serviced.
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Weak reference to the template this instance was expanded from.
    #[serde(default)]
    pub schedule_template_id: Option<TemplateId>,
}

impl ScheduleInstance {
    /// Text the date-scoped operations search matches against.
    pub fn search_haystack(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref vehicle) = self.vehicle_number {
            parts.push(vehicle.as_str());
        }
        if let Some(ref notes) = self.notes {
            parts.push(notes.as_str());
        }
        parts.join(" ")
    }

    /// Case-insensitive containment match used by `find_by_date`.
    /// An empty search term matches every instance.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.search_haystack()
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instance(vehicle: Option<&str>, notes: Option<&str>) -> ScheduleInstance {
        ScheduleInstance {
            id: None,
            instance_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            start_time: None,
            end_time: None,
            vehicle_number: vehicle.map(str::to_string),
            notes: notes.map(str::to_string),
            schedule_template_id: None,
        }
    }

    #[test]
    fn empty_term_matches_everything() {
        assert!(instance(None, None).matches_search(""));
        assert!(instance(Some("NA-1234"), None).matches_search(""));
    }

    #[test]
    fn search_is_case_insensitive_over_vehicle_and_notes() {
        let inst = instance(Some("NA-1234"), Some("brake inspection"));
        assert!(inst.matches_search("na-12"));
        assert!(inst.matches_search("BRAKE"));
        assert!(!inst.matches_search("oil change"));
    }

    #[test]
    fn instance_without_text_fields_only_matches_empty_term() {
        let inst = instance(None, None);
        assert!(!inst.matches_search("x"));
    }

    #[test]
    fn template_round_trips_through_json() {
        let template = ScheduleTemplate {
            id: Some(TemplateId::new(7)),
            start_time: Utc.with_ymd_and_hms(2024, 3, 4, 8, 30, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 3, 4, 17, 0, 0).unwrap(),
            weekday_ids: vec![1, 2, 3],
            vehicle_facility_ids: vec![10],
        };
        let json = serde_json::to_string(&template).unwrap();
        let back: ScheduleTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(template, back);
    }

    #[test]
    fn instance_deserializes_with_optional_fields_missing() {
        let json = r#"{"id": null, "instance_date": "2024-03-04"}"#;
        let inst: ScheduleInstance = serde_json::from_str(json).unwrap();
        assert!(inst.start_time.is_none());
        assert!(inst.schedule_template_id.is_none());
    }
}
