//! Zeit - command-line client for the BBQ GmbH Zeiterfassung.
//!
//! Main entry point for the zeit CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{auth, dashboard, diagnostics, track};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Zeit - command-line client for the BBQ GmbH Zeiterfassung
#[derive(Parser)]
#[command(name = "zeit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL (default: from config, then http://localhost:8000)
    #[arg(long, global = true, env = "ZEIT_SERVER_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard: user, recent time entries, upcoming absences
    Dashboard(dashboard::DashboardArgs),

    /// Record a time entry
    Track(track::TrackArgs),

    /// Probe API endpoints and report reachability
    Diagnostics(diagnostics::DiagnosticsArgs),

    /// Session management
    Auth(auth::AuthArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "zeit=debug,zeit_client=debug,zeit_auth=debug,zeit_notify=debug,zeit_config=debug,info"
    } else {
        "zeit=info,zeit_client=info,zeit_auth=info,zeit_notify=info,warn"
    };

    let log_dir = zeit_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "zeit.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "zeit=trace,zeit_client=trace,zeit_auth=trace,zeit_notify=trace,zeit_config=trace,info",
                )),
        )
        .init();

    // Config file, then the --server flag / ZEIT_SERVER_URL on top
    let mut config = zeit_config::ZeitConfig::load()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    let ctx = commands::Context {
        config,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Dashboard(args) => dashboard::run(args, &ctx).await,
        Commands::Track(args) => track::run(args, &ctx).await,
        Commands::Diagnostics(args) => diagnostics::run(args, &ctx).await,
        Commands::Auth(args) => auth::run(args, &ctx).await,
    }
}
