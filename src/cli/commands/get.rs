use anyhow::{Context, Result};
use clap::Args;

use crate::api::{Endpoint, Fetcher, GraphClient};
use crate::auth::Credentials;
use crate::config::Config;

#[derive(Args)]
pub struct GetCommands {
    /// Graph path (e.g. "v1.0/groups/<id>/members") or full URL
    pub endpoint: String,
}

pub async fn get_command(
    args: GetCommands,
    config: &Config,
    credentials: Credentials,
) -> Result<()> {
    let endpoint = Endpoint {
        name: "get".to_string(),
        path: args.endpoint,
        description: None,
    };

    let mut client = GraphClient::connect(config, credentials)
        .await
        .context("Could not authenticate")?;

    let stdout = std::io::stdout();
    let mut sink = stdout.lock();
    Fetcher::new(&mut client, &config.graph_host)
        .dump(std::slice::from_ref(&endpoint), &mut sink)
        .await?;

    Ok(())
}
