use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::api::GraphClient;
use crate::auth::Credentials;
use crate::config::Config;

#[derive(Args)]
pub struct AuthCommands {}

/// Run the client-credentials grant and report the outcome without printing the token
pub async fn auth_command(
    _args: AuthCommands,
    config: &Config,
    credentials: Credentials,
) -> Result<()> {
    println!("  {}: {}", "Tenant".dimmed(), credentials.tenant_id.cyan());
    println!("  {}: {}", "Client".dimmed(), credentials.client_id.cyan());
    println!("  {}: {}", "Authority".dimmed(), config.authority_host.cyan());
    println!("  {}: {}", "Scope".dimmed(), config.scope.cyan());

    let client = GraphClient::connect(config, credentials)
        .await
        .context("Could not authenticate")?;

    let remaining = client
        .token()
        .map(|token| token.remaining().as_secs())
        .unwrap_or_default();

    println!();
    println!(
        "  {} token valid for {} minutes",
        "✓".bright_green().bold(),
        remaining / 60
    );

    Ok(())
}
