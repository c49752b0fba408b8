use anyhow::{Context, Result};
use clap::Args;
use log::info;

use crate::api::constants::resolve_url;
use crate::api::{GraphClient, report_users};
use crate::auth::Credentials;
use crate::config::Config;

#[derive(Args)]
pub struct UsersCommands {
    /// Users collection to read (path or URL, defaults to the configured users endpoint)
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn users_command(
    args: UsersCommands,
    config: &Config,
    credentials: Credentials,
) -> Result<()> {
    let url = match args.url {
        Some(url) => resolve_url(&config.graph_host, &url),
        None => config.users_url(),
    };

    let mut client = GraphClient::connect(config, credentials)
        .await
        .context("Could not authenticate")?;

    let users = client.fetch_and_decode(&url).await?;

    let stdout = std::io::stdout();
    let count = report_users(&users, &mut stdout.lock())?;
    info!("Listed {} users", count);

    Ok(())
}
