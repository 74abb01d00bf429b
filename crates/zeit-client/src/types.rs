//! Request and response types for the Zeiterfassung API.
//!
//! These types mirror the backend's contract, German field names included.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// The authenticated user, as returned by `/api/user/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: i64,
    /// First name.
    pub vorname: String,
    /// Last name.
    pub nachname: String,
    /// Email address.
    pub email: String,
    /// Role ID.
    pub role_id: i64,
}

impl User {
    /// Full name for the welcome line. Falls back to the generic label when
    /// either half of the name is missing.
    pub fn display_name(&self) -> String {
        if self.vorname.is_empty() || self.nachname.is_empty() {
            "Benutzer".to_string()
        } else {
            format!("{} {}", self.vorname, self.nachname)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time entries
// ─────────────────────────────────────────────────────────────────────────────

/// One tracked work period, as listed by `/api/time_entries/recent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Entry ID.
    pub id: i64,
    /// Work date.
    pub datum: NaiveDate,
    /// Clock-in time.
    pub startzeit: NaiveTime,
    /// Clock-out time.
    pub endzeit: NaiveTime,
    /// Project name.
    #[serde(default)]
    pub projekt: Option<String>,
    /// Task name.
    #[serde(default)]
    pub aufgabe: Option<String>,
    /// Server-calculated duration in hours.
    #[serde(default)]
    pub dauer: Option<f64>,
    /// Free-text comment.
    #[serde(default)]
    pub kommentar: Option<String>,
}

/// Payload for creating a time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimeEntry {
    /// Work date.
    pub datum: NaiveDate,
    /// Clock-in time.
    pub startzeit: NaiveTime,
    /// Clock-out time.
    pub endzeit: NaiveTime,
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projekt: Option<String>,
    /// Task name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aufgabe: Option<String>,
    /// Free-text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kommentar: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Absences
// ─────────────────────────────────────────────────────────────────────────────

/// Approval state of an absence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
}

impl AbsenceStatus {
    /// The German label the dashboard shows.
    pub fn label(&self) -> &'static str {
        match self {
            AbsenceStatus::Pending => "Ausstehend",
            AbsenceStatus::Approved => "Genehmigt",
            AbsenceStatus::Rejected => "Abgelehnt",
        }
    }
}

/// One planned absence, as listed by `/api/absences/upcoming`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    /// Absence ID.
    pub id: i64,
    /// First day away.
    pub start_datum: NaiveDate,
    /// Last day away.
    pub end_datum: NaiveDate,
    /// Absence type (Urlaub, Krankheit, ...).
    pub typ: String,
    /// Approval state.
    pub status: AbsenceStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wage settings
// ─────────────────────────────────────────────────────────────────────────────

/// Billing rates, as carried by the `wageSettings` fallback dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageSettings {
    /// Hourly rate per role name, with a `default` entry.
    #[serde(rename = "hourlyRates")]
    pub hourly_rates: HashMap<String, f64>,
    /// Tax rate per class (`default`, `reduced`).
    #[serde(rename = "taxRates")]
    pub tax_rates: HashMap<String, f64>,
}

impl WageSettings {
    /// The default hourly rate, if configured.
    pub fn default_hourly_rate(&self) -> Option<f64> {
        self.hourly_rates.get("default").copied()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// Result of probing one API endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointReport {
    /// The probed endpoint, as given by the caller.
    pub endpoint: String,
    /// Full URL the probe was issued against.
    pub url: String,
    /// Whether the endpoint answered successfully.
    pub success: bool,
    /// HTTP status, where one was received.
    pub status: Option<u16>,
    /// Round-trip time in milliseconds.
    pub response_time_ms: u64,
    /// Size of the response body in bytes, on success.
    pub response_size: Option<usize>,
    /// Classified failure, on error.
    pub error_details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name() {
        let user = User {
            id: 1,
            vorname: "Max".to_string(),
            nachname: "Mustermann".to_string(),
            email: "max@bbqgmbh.de".to_string(),
            role_id: 2,
        };
        assert_eq!(user.display_name(), "Max Mustermann");

        let anonymous = User {
            vorname: String::new(),
            ..user
        };
        assert_eq!(anonymous.display_name(), "Benutzer");
    }

    #[test]
    fn test_time_entry_deserializes_backend_shape() {
        let entry: TimeEntry = serde_json::from_value(json!({
            "id": 7,
            "datum": "2024-01-15",
            "startzeit": "09:00:00",
            "endzeit": "17:30:00",
            "projekt": "Intranet",
            "dauer": 8.5
        }))
        .unwrap();

        assert_eq!(entry.datum, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(entry.dauer, Some(8.5));
        assert_eq!(entry.aufgabe, None);
    }

    #[test]
    fn test_absence_status_labels() {
        let absence: Absence = serde_json::from_value(json!({
            "id": 3,
            "start_datum": "2024-07-01",
            "end_datum": "2024-07-14",
            "typ": "Urlaub",
            "status": "approved"
        }))
        .unwrap();

        assert_eq!(absence.status, AbsenceStatus::Approved);
        assert_eq!(absence.status.label(), "Genehmigt");
        assert_eq!(AbsenceStatus::Pending.label(), "Ausstehend");
        assert_eq!(AbsenceStatus::Rejected.label(), "Abgelehnt");
    }

    #[test]
    fn test_new_entry_omits_empty_optionals() {
        let entry = NewTimeEntry {
            datum: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            startzeit: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            endzeit: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            projekt: None,
            aufgabe: None,
            kommentar: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("projekt").is_none());
        assert!(value.get("kommentar").is_none());
    }
}
