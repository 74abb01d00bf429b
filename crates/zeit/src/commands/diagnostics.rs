//! Diagnostics command - probe API endpoints.

use anyhow::Result;
use clap::Args;
use console::{style, Style};

use zeit_client::api::DEFAULT_ENDPOINTS;

use super::Context;

/// Arguments for the diagnostics command.
#[derive(Args, Debug)]
pub struct DiagnosticsArgs {
    /// Endpoints under /api/v1 to probe (default: /users/ /roles/)
    pub endpoints: Vec<String>,
}

/// Run the diagnostics command.
pub async fn run(args: DiagnosticsArgs, ctx: &Context) -> Result<()> {
    let endpoints: Vec<String> = if args.endpoints.is_empty() {
        DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()
    } else {
        args.endpoints
    };

    let client = ctx.client()?;
    let reports = client.diagnostics().run(&endpoints).await;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let green = Style::new().green();
    let red = Style::new().red();

    println!();
    println!("{}", style("API-Diagnose").bold());
    println!("{}", dim.apply_to("─".repeat(56)));
    println!();

    for report in &reports {
        let marker = if report.success {
            green.apply_to("●")
        } else {
            red.apply_to("●")
        };
        let status = report
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let size = report
            .response_size
            .map(|s| format!("{s} B"))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {} {:<24} {:>4}  {:>6} ms  {:>10}",
            marker, report.endpoint, status, report.response_time_ms, size,
        );

        if ctx.verbose && let Some(details) = &report.error_details {
            println!("      {}", dim.apply_to(details));
        }
    }
    println!();

    Ok(())
}
