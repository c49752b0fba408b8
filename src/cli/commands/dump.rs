use anyhow::{Context, Result};
use clap::Args;
use log::info;

use crate::api::{Fetcher, GraphClient, OnError};
use crate::auth::Credentials;
use crate::config::Config;

#[derive(Args)]
pub struct DumpCommands {
    /// Only dump these endpoints (by catalog name); catalog order is kept
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Carry on with the remaining endpoints when one request fails
    #[arg(long)]
    pub keep_going: bool,
}

pub async fn dump_command(
    args: DumpCommands,
    config: &Config,
    credentials: Credentials,
) -> Result<()> {
    // Resolve the selection before touching the network
    let endpoints = config.select_endpoints(&args.only)?;
    info!("Dumping {} endpoints", endpoints.len());

    let mut client = GraphClient::connect(config, credentials)
        .await
        .context("Could not authenticate")?;

    let policy = if args.keep_going {
        OnError::Continue
    } else {
        OnError::Halt
    };

    let stdout = std::io::stdout();
    let mut sink = stdout.lock();

    let report = Fetcher::new(&mut client, &config.graph_host)
        .on_error(policy)
        .dump(&endpoints, &mut sink)
        .await?;

    if !report.is_success() {
        for failure in &report.failed {
            eprintln!("{}: {}", failure.endpoint.name, failure.error);
        }
        anyhow::bail!(
            "{} of {} endpoints failed",
            report.failed.len(),
            endpoints.len()
        );
    }

    Ok(())
}
