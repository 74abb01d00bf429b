//! The notifier port and its implementations.

use std::fmt;
use std::time::{Duration, Instant};

use console::style;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// How long a notice stays visible when the caller does not say otherwise.
pub const DEFAULT_NOTICE_MS: u64 = 5_000;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
    Info,
}

impl Severity {
    /// User-facing label for terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "FEHLER",
            Severity::Warning => "WARNUNG",
            Severity::Success => "ERFOLG",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// A displayed notice.
#[derive(Debug, Clone)]
pub struct Notice {
    /// User-facing message text.
    pub message: String,
    /// Severity the notice was raised with.
    pub severity: Severity,
    /// Display duration in milliseconds. Zero means sticky.
    pub duration_ms: u64,
    shown_at: Instant,
}

impl Notice {
    fn new(message: &str, severity: Severity, duration_ms: u64) -> Self {
        Self {
            message: message.to_string(),
            severity,
            duration_ms,
            shown_at: Instant::now(),
        }
    }

    /// Whether the display duration has elapsed.
    pub fn is_expired(&self) -> bool {
        self.duration_ms > 0 && self.shown_at.elapsed() >= Duration::from_millis(self.duration_ms)
    }
}

/// Port through which the client reports user-facing events.
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Show a notice to the user.
    fn notify(&self, message: &str, severity: Severity, duration_ms: u64);
}

// ============================================================================
// NotificationCenter
// ============================================================================

/// Holds the currently visible notice.
///
/// Only one notice is shown at a time: a new notice replaces the current one,
/// and [`current`](NotificationCenter::current) stops returning a notice once
/// its display duration has elapsed.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    slot: Mutex<Option<Notice>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible notice, if any.
    pub fn current(&self) -> Option<Notice> {
        let mut slot = self.slot.lock();
        if slot.as_ref().is_some_and(Notice::is_expired) {
            *slot = None;
        }
        slot.clone()
    }

    /// Remove the current notice without waiting for it to expire.
    pub fn dismiss(&self) {
        *self.slot.lock() = None;
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u64) {
        match severity {
            Severity::Error => tracing::error!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Success | Severity::Info => tracing::info!("{message}"),
        }
        *self.slot.lock() = Some(Notice::new(message, severity, duration_ms));
    }
}

// ============================================================================
// ConsoleNotifier
// ============================================================================

/// Renders notices as styled lines on stderr.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity, _duration_ms: u64) {
        let line = format!("[{}] {}", severity.label(), message);
        let styled = match severity {
            Severity::Error => style(line).red(),
            Severity::Warning => style(line).yellow(),
            Severity::Success => style(line).green(),
            Severity::Info => style(line).cyan(),
        };
        eprintln!("{styled}");
    }
}

// ============================================================================
// RecordingNotifier (for testing)
// ============================================================================

/// Collects every notice it receives, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.notices.lock().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u64) {
        self.notices
            .lock()
            .push(Notice::new(message, severity, duration_ms));
    }
}
