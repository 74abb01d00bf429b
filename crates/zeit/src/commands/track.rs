//! Track command - record a time entry.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use console::style;

use zeit_client::NewTimeEntry;
use zeit_notify::{hours_worked, ConsoleNotifier, OverworkMonitor};

use super::Context;

/// Arguments for the track command.
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Date of the entry (YYYY-MM-DD)
    pub datum: NaiveDate,

    /// Start time (HH:MM)
    pub start: String,

    /// End time (HH:MM); earlier than the start means the shift ran past midnight
    pub ende: String,

    /// Project name
    #[arg(long)]
    pub projekt: Option<String>,

    /// Task name
    #[arg(long)]
    pub aufgabe: Option<String>,

    /// Free-text comment
    #[arg(long)]
    pub kommentar: Option<String>,
}

/// Run the track command.
pub async fn run(args: TrackArgs, ctx: &Context) -> Result<()> {
    let start = parse_time(&args.start).context("Ungültige Startzeit, erwartet HH:MM")?;
    let ende = parse_time(&args.ende).context("Ungültige Endzeit, erwartet HH:MM")?;

    let hours = hours_worked(start, ende, args.datum);

    let client = ctx.client()?;
    let entry = client
        .time_entries()
        .create(&NewTimeEntry {
            datum: args.datum,
            startzeit: start,
            endzeit: ende,
            projekt: args.projekt,
            aufgabe: args.aufgabe,
            kommentar: args.kommentar,
        })
        .await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!(
            "{} Eintrag {} gespeichert: {}, {:.1} h",
            style("✓").green(),
            entry.id,
            args.datum.format("%d.%m.%Y"),
            hours,
        );
    }

    // Only the freshly created entry may raise the overwork notification.
    let monitor = OverworkMonitor::new(Arc::new(ConsoleNotifier::new()));
    monitor.record_new_entry(hours);

    Ok(())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
