//! Canned substitute data for failed requests.

use serde_json::{json, Value};

/// Substitute dataset for a known data type.
///
/// Consumers render this when a request fails and the UI must still show
/// something. Unknown keys get `None`.
pub fn fallback_for(data_type: &str) -> Option<Value> {
    match data_type {
        "user" => Some(json!({
            "id": 1,
            "vorname": "Benutzer",
            "nachname": "Lokal",
            "email": "benutzer@bbqgmbh.de",
            "role_id": 2
        })),

        "timeEntries" => Some(json!([])),

        "projects" => Some(json!([])),

        "wageSettings" => Some(json!({
            "hourlyRates": {
                "default": 125.00,
                "Junior Developer": 85.00,
                "Developer": 110.00,
                "Senior Developer": 140.00,
                "Project Manager": 160.00
            },
            "taxRates": {
                "default": 0.19,
                "reduced": 0.07
            }
        })),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{User, WageSettings};

    #[test]
    fn test_wage_settings_default_rate() {
        let value = fallback_for("wageSettings").unwrap();
        assert_eq!(value["hourlyRates"]["default"], 125.00);

        let settings: WageSettings = serde_json::from_value(value).unwrap();
        assert_eq!(settings.default_hourly_rate(), Some(125.00));
        assert_eq!(settings.tax_rates["reduced"], 0.07);
    }

    #[test]
    fn test_unknown_key_is_none() {
        assert_eq!(fallback_for("unknown"), None);
        assert_eq!(fallback_for(""), None);
    }

    #[test]
    fn test_user_fallback_is_the_local_placeholder() {
        let user: User = serde_json::from_value(fallback_for("user").unwrap()).unwrap();
        assert_eq!(user.vorname, "Benutzer");
        assert_eq!(user.nachname, "Lokal");
        assert_eq!(user.email, "benutzer@bbqgmbh.de");
        assert_eq!(user.role_id, 2);
    }

    #[test]
    fn test_list_fallbacks_are_empty() {
        assert_eq!(fallback_for("timeEntries").unwrap(), json!([]));
        assert_eq!(fallback_for("projects").unwrap(), json!([]));
    }
}
