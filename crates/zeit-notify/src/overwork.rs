//! Work-hour calculation and the 8-hour alert rule.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rand::Rng;

use crate::notifier::{Notifier, Severity};

/// Hours above which a workday counts as overwork.
pub const OVERWORK_THRESHOLD_HOURS: f64 = 8.0;

/// Overwork notices stay visible longer than regular ones.
const OVERWORK_NOTICE_MS: u64 = 10_000;

const OVERWORK_MESSAGES: &[&str] = &[
    "Zeit zum Feierabend! Dein Laptop wird dich nicht vermissen.",
    "Die Arbeit läuft nicht weg... aber deine Freizeit schon!",
    "Genug für heute! Die Welt rettest du morgen weiter.",
    "Die Arbeit wird nicht eifersüchtig, wenn du jetzt Freizeit hast.",
    "Hey Workaholic, dein Sofa vermisst dich!",
    "Freizeit ist kein Luxus, sondern eine Notwendigkeit!",
    "8 Stunden sind genug! Gib deinen Augen eine Pause vom Bildschirm.",
    "Feierabend ist nicht nur ein schönes Wort, sondern auch eine gute Idee!",
    "Deine Netflix-Watchlist weint vor Einsamkeit.",
    "Dein Bett fragt sich, wo du so lange bleibst.",
];

/// Elapsed hours between two clock times on the given date.
///
/// An end time before the start time means the shift crosses midnight, so one
/// day is added to the end timestamp instead of producing a negative duration.
pub fn hours_worked(start: NaiveTime, end: NaiveTime, date: NaiveDate) -> f64 {
    let start_at = date.and_time(start);
    let mut end_at = date.and_time(end);
    if end_at < start_at {
        end_at += chrono::Duration::days(1);
    }
    (end_at - start_at).num_seconds() as f64 / 3600.0
}

/// One rendered time entry, as the overwork scan sees it.
#[derive(Debug, Clone, Copy)]
pub struct WorkedShift {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkedShift {
    pub fn hours(&self) -> f64 {
        hours_worked(self.start, self.end, self.date)
    }
}

/// Applies the overwork rule.
///
/// A newly created entry over the threshold raises exactly one notification.
/// Entries that are merely being re-rendered only get a visual flag, never a
/// notification.
#[derive(Debug)]
pub struct OverworkMonitor {
    threshold: f64,
    notifier: Arc<dyn Notifier>,
}

impl OverworkMonitor {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_threshold(notifier, OVERWORK_THRESHOLD_HOURS)
    }

    pub fn with_threshold(notifier: Arc<dyn Notifier>, threshold: f64) -> Self {
        Self {
            threshold,
            notifier,
        }
    }

    /// Check a newly created entry. Returns whether a notification was shown.
    pub fn record_new_entry(&self, hours: f64) -> bool {
        if hours <= self.threshold {
            return false;
        }
        let message = format!(
            "Du hast {hours:.1} Stunden gearbeitet! {}",
            pick_overwork_message()
        );
        self.notifier
            .notify(&message, Severity::Info, OVERWORK_NOTICE_MS);
        true
    }

    /// Flag already-displayed entries over the threshold. No notifications.
    pub fn flag_existing(&self, shifts: &[WorkedShift]) -> Vec<bool> {
        shifts.iter().map(|s| s.hours() > self.threshold).collect()
    }
}

fn pick_overwork_message() -> &'static str {
    let idx = rand::rng().random_range(0..OVERWORK_MESSAGES.len());
    OVERWORK_MESSAGES[idx]
}
