//! Notification port for the Zeiterfassung client.
//!
//! The request pipeline and the overwork rule both talk to a [`Notifier`]
//! trait instead of any concrete UI, so consumers decide how notices are
//! rendered. This crate ships three implementations:
//!
//! - [`NotificationCenter`] — keeps at most one visible notice at a time
//!   (a new notice replaces whatever is showing).
//! - [`ConsoleNotifier`] — styled terminal output for the CLI.
//! - [`RecordingNotifier`] — collects notices, for tests.
//!
//! The overwork rule lives in [`overwork`]: elapsed work hours (including
//! shifts that cross midnight) and the 8-hour alert policy.

pub mod notifier;
pub mod overwork;

pub use notifier::{
    ConsoleNotifier, Notice, NotificationCenter, Notifier, RecordingNotifier, Severity,
    DEFAULT_NOTICE_MS,
};
pub use overwork::{hours_worked, OverworkMonitor, WorkedShift, OVERWORK_THRESHOLD_HOURS};
