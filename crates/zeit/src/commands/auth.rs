//! Auth command - session management.

use anyhow::Result;
use clap::{Args, Subcommand};

use zeit_auth::{mask_token, SessionStore};

use super::Context;

/// Arguments for the auth command.
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store a session token
    Login {
        /// The token; read from stdin when omitted
        token: Option<String>,
    },

    /// Show session status
    Status,

    /// Clear the stored session token
    Logout,
}

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login { token } => cmd_login(token, ctx).await,
        AuthCommand::Status => cmd_status(ctx).await,
        AuthCommand::Logout => cmd_logout(ctx).await,
    }
}

async fn cmd_login(token: Option<String>, ctx: &Context) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            print!("Token> ");
            use std::io::Write;
            std::io::stdout().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            input.trim().to_string()
        }
    };

    if token.is_empty() {
        println!("Kein Token angegeben, abgebrochen.");
        return Ok(());
    }

    let store = ctx.session_store()?;
    store.save(&token).await?;

    println!("Angemeldet. Token: {}", mask_token(&token));
    Ok(())
}

async fn cmd_status(ctx: &Context) -> Result<()> {
    let store = ctx.session_store()?;

    println!("Sitzungsstatus");
    println!("--------------");

    match store.token().await {
        Some(token) => {
            println!("Token: {}", mask_token(&token));
            println!("Server: {}", ctx.config.server_url);
        }
        None => {
            println!("Nicht angemeldet.");
            println!("  Mit 'zeit auth login' einen Sitzungstoken hinterlegen");
        }
    }

    Ok(())
}

async fn cmd_logout(ctx: &Context) -> Result<()> {
    let store = ctx.session_store()?;

    if store.has_token() {
        store.clear().await?;
        println!("Abgemeldet, Sitzungstoken entfernt.");
    } else {
        println!("Kein Sitzungstoken vorhanden.");
    }

    Ok(())
}
