use anyhow::Result;
use clap::Args;
use colored::*;

use crate::config::Config;

#[derive(Args)]
pub struct EndpointsCommands {
    /// Print full URLs instead of paths
    #[arg(long)]
    pub urls: bool,
}

pub fn endpoints_command(args: EndpointsCommands, config: &Config) -> Result<()> {
    let catalog = config.catalog();
    let width = catalog.iter().map(|e| e.name.len()).max().unwrap_or(0);

    for endpoint in &catalog {
        let target = if args.urls {
            config.endpoint_url(endpoint)
        } else {
            endpoint.path.clone()
        };

        println!(
            "{:width$}  {}",
            endpoint.name.bright_green(),
            target.cyan(),
            width = width
        );
        if let Some(description) = &endpoint.description {
            println!("{:width$}  {}", "", description.dimmed(), width = width);
        }
    }

    Ok(())
}
