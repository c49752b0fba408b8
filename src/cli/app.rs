use super::commands::auth::AuthCommands;
use super::commands::dump::DumpCommands;
use super::commands::endpoints::EndpointsCommands;
use super::commands::get::GetCommands;
use super::commands::users::UsersCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graph-dump", version)]
#[command(about = "Dump Microsoft Graph directory and security data to stdout")]
pub struct Cli {
    /// Load AZURE_* credentials from this .env file instead of the environment
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    /// Configuration file (defaults to <config dir>/graph-dump/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dump every catalog endpoint (or a subset) as raw JSON
    Dump(DumpCommands),
    /// List user principal names
    Users(UsersCommands),
    /// Dump a single endpoint path or URL
    Get(GetCommands),
    /// Show the endpoint catalog
    Endpoints(EndpointsCommands),
    /// Check that the credentials can obtain a token
    Auth(AuthCommands),
}
