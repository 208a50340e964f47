//! Reference entities: weekdays and vehicle facilities.

use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, WeekdayId);
define_id_type!(i64, FacilityId);

/// A day-of-week lookup row referenced by schedule templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weekday {
    /// Absent on creation; assigned by the repository.
    pub id: Option<WeekdayId>,
    /// Display name, e.g. "Monday". Required non-empty.
    pub name: String,
}

/// A service facility offered at the depot (lift bay, wash, alignment, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFacility {
    /// Absent on creation; assigned by the repository.
    pub id: Option<FacilityId>,
    /// Display name. Required non-empty.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Weekday {
    /// Validation applied before persisting.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("weekday name must not be empty".to_string());
        }
        Ok(())
    }
}

impl VehicleFacility {
    /// Validation applied before persisting.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("vehicle facility name must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_requires_a_name() {
        let weekday = Weekday {
            id: None,
            name: "  ".to_string(),
        };
        assert!(weekday.validate().is_err());

        let weekday = Weekday {
            id: None,
            name: "Monday".to_string(),
        };
        assert!(weekday.validate().is_ok());
    }

    #[test]
    fn facility_requires_a_name() {
        let facility = VehicleFacility {
            id: None,
            name: String::new(),
            description: Some("two-post lift".to_string()),
        };
        assert!(facility.validate().is_err());
    }
}
