//! Alert headers emitted on entity mutations.
//!
//! Every successful create/update/delete carries a pair of headers the admin
//! frontend turns into a toast: `x-depotsched-alert` holds a message key
//! (`depotsched.<entity>.created` etc.) and `x-depotsched-params` the entity
//! id.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const ALERT_HEADER: &str = "x-depotsched-alert";
pub const PARAMS_HEADER: &str = "x-depotsched-params";

fn alert_headers(entity: &str, action: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let alert = format!("depotsched.{}.{}", entity, action);
    if let Ok(value) = HeaderValue::from_str(&alert) {
        headers.insert(HeaderName::from_static(ALERT_HEADER), value);
    }
    if let Ok(value) = HeaderValue::from_str(param) {
        headers.insert(HeaderName::from_static(PARAMS_HEADER), value);
    }
    headers
}

/// Headers for a 201 creation response.
pub fn entity_creation_alert(entity: &str, id: &str) -> HeaderMap {
    alert_headers(entity, "created", id)
}

/// Headers for a 200 update response.
pub fn entity_update_alert(entity: &str, id: &str) -> HeaderMap {
    alert_headers(entity, "updated", id)
}

/// Headers for a 200 deletion response.
pub fn entity_deletion_alert(entity: &str, id: &str) -> HeaderMap {
    alert_headers(entity, "deleted", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_alert_headers() {
        let headers = entity_creation_alert("weekday", "7");
        assert_eq!(
            headers.get(ALERT_HEADER).unwrap(),
            "depotsched.weekday.created"
        );
        assert_eq!(headers.get(PARAMS_HEADER).unwrap(), "7");
    }

    #[test]
    fn update_and_delete_alert_keys() {
        assert_eq!(
            entity_update_alert("scheduleInstance", "3")
                .get(ALERT_HEADER)
                .unwrap(),
            "depotsched.scheduleInstance.updated"
        );
        assert_eq!(
            entity_deletion_alert("scheduleInstance", "3")
                .get(ALERT_HEADER)
                .unwrap(),
            "depotsched.scheduleInstance.deleted"
        );
    }
}
