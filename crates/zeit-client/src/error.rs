//! Classified request outcomes.
//!
//! Every completed request maps to exactly one of these variants. The German
//! `user_message` strings are what the notifier shows; `Display` stays terse
//! for logs.

use serde_json::Value;
use thiserror::Error;
use zeit_notify::Severity;

/// Classified outcome of a failed request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable session: token missing, rejected, or refresh failed.
    #[error("session expired")]
    AuthExpired,

    /// The session is valid but lacks permission for this action.
    #[error("access forbidden")]
    Forbidden,

    /// The resource does not exist.
    #[error("not found")]
    NotFound,

    /// The server rejected the payload (422). Carries the joined field errors.
    #[error("validation error: {0}")]
    Validation(String),

    /// Server-side failure or an otherwise unhandled status.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Status text or server-provided message.
        message: String,
    },

    /// Transport failure before any status was received.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the JSON the contract promises.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Client construction or request encoding problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// URL parsing failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Check if this outcome forces a new login.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// Check if this is a not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Check if this is a server-side failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { status, .. } if *status >= 500)
    }

    /// The HTTP status this outcome was classified from, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::Validation(_) => Some(422),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Severity the notifier should display this outcome with.
    pub fn severity(&self) -> Severity {
        match self {
            ApiError::AuthExpired | ApiError::NotFound => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The German user-facing message for this outcome.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthExpired => {
                "Ihre Sitzung ist abgelaufen. Bitte melden Sie sich erneut an.".to_string()
            }
            ApiError::Forbidden => {
                "Zugriff verweigert. Sie haben keine Berechtigung für diese Aktion.".to_string()
            }
            ApiError::NotFound => "Die angeforderte Ressource wurde nicht gefunden.".to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Server { status, message } => match status {
                500 | 502 | 503 | 504 => {
                    "Ein Serverfehler ist aufgetreten. Bitte versuchen Sie es später erneut."
                        .to_string()
                }
                _ => format!("Fehler: {message}"),
            },
            ApiError::Network(message) => format!("Verbindungsfehler: {message}"),
            ApiError::MalformedResponse(_) => {
                "Fehler: Die vom Server empfangenen Daten sind ungültig.".to_string()
            }
            other => format!("Fehler: {other}"),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

const GENERIC_VALIDATION: &str = "Validierungsfehler bei der Anfrage.";

/// Build the user-facing message for a 422 body.
///
/// A structured `detail` list joins each field error as `loc.join('.'): msg`,
/// in the order the server sent them. A string `detail` is used directly.
/// Anything else falls back to the generic message.
pub(crate) fn validation_message(body: Option<&Value>) -> String {
    match body.and_then(|b| b.get("detail")) {
        Some(Value::Array(errors)) if !errors.is_empty() => {
            let entries: Vec<String> = errors.iter().map(field_error_entry).collect();
            format!("Validierungsfehler: {}", entries.join("; "))
        }
        Some(Value::String(detail)) => format!("Validierungsfehler: {detail}"),
        _ => GENERIC_VALIDATION.to_string(),
    }
}

fn field_error_entry(err: &Value) -> String {
    let Some(msg) = err.get("msg").and_then(Value::as_str) else {
        return err.to_string();
    };
    let loc = err
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();

    if loc.is_empty() {
        msg.to_string()
    } else {
        format!("{loc}: {msg}")
    }
}
