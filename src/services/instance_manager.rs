//! Template-to-instance expansion.
//!
//! When a schedule instance is created against a template, fields the request
//! leaves unset are populated from the template. The override policy per
//! field:
//!
//! - `start_time`, `end_time`: override-if-present — a request value wins,
//!   otherwise the template window is inherited.
//! - `schedule_template_id`: inherit-always — set to the resolved template's
//!   id regardless of what the request carried.
//! - `instance_date`, `vehicle_number`, `notes`: request-owned, never
//!   inherited.

use crate::models::{ScheduleInstance, ScheduleTemplate};

/// Expand a template into the given instance request.
///
/// Returns a fully populated instance; the caller persists it.
pub fn create_from_template(
    instance: &ScheduleInstance,
    template: &ScheduleTemplate,
) -> ScheduleInstance {
    let mut expanded = instance.clone();
    expanded.start_time = instance.start_time.or(Some(template.start_time));
    expanded.end_time = instance.end_time.or(Some(template.end_time));
    expanded.schedule_template_id = template.id;
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateId;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn template() -> ScheduleTemplate {
        ScheduleTemplate {
            id: Some(TemplateId::new(5)),
            start_time: Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 3, 4, 17, 0, 0).unwrap(),
            weekday_ids: vec![1],
            vehicle_facility_ids: vec![2],
        }
    }

    fn request() -> ScheduleInstance {
        ScheduleInstance {
            id: None,
            instance_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            start_time: None,
            end_time: None,
            vehicle_number: Some("NA-1234".to_string()),
            notes: None,
            schedule_template_id: Some(TemplateId::new(5)),
        }
    }

    #[test]
    fn unset_times_inherit_the_template_window() {
        let expanded = create_from_template(&request(), &template());
        assert_eq!(expanded.start_time, Some(template().start_time));
        assert_eq!(expanded.end_time, Some(template().end_time));
    }

    #[test]
    fn explicit_start_wins_end_still_inherited() {
        let mut req = request();
        let explicit = Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap();
        req.start_time = Some(explicit);

        let expanded = create_from_template(&req, &template());
        assert_eq!(expanded.start_time, Some(explicit));
        assert_eq!(expanded.end_time, Some(template().end_time));
    }

    #[test]
    fn template_linkage_is_always_the_resolved_template() {
        let mut req = request();
        // A stale id in the request is overwritten by the resolved template.
        req.schedule_template_id = Some(TemplateId::new(99));
        let expanded = create_from_template(&req, &template());
        assert_eq!(expanded.schedule_template_id, Some(TemplateId::new(5)));
    }

    #[test]
    fn request_owned_fields_are_untouched() {
        let expanded = create_from_template(&request(), &template());
        assert_eq!(expanded.vehicle_number.as_deref(), Some("NA-1234"));
        assert_eq!(
            expanded.instance_date,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert!(expanded.notes.is_none());
    }
}
