use anyhow::Result;
use clap::Parser;
use graph_dump::auth::Credentials;
use graph_dump::cli::{Cli, Commands, commands};
use graph_dump::config::Config;
use log::{debug, error, info};

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = &cli.log_file {
        // Truncate on each run
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    debug!("Graph host: {}, authority: {}", config.graph_host, config.authority_host);

    let env_file = cli.env_file.as_deref();

    match cli.command {
        Commands::Endpoints(args) => commands::endpoints_command(args, &config),
        Commands::Dump(args) => {
            commands::dump_command(args, &config, load_credentials(env_file)?).await
        }
        Commands::Users(args) => {
            commands::users_command(args, &config, load_credentials(env_file)?).await
        }
        Commands::Get(args) => {
            commands::get_command(args, &config, load_credentials(env_file)?).await
        }
        Commands::Auth(args) => {
            commands::auth_command(args, &config, load_credentials(env_file)?).await
        }
    }
}

fn load_credentials(env_file: Option<&str>) -> Result<Credentials> {
    match env_file {
        Some(path) => Credentials::from_env_file(path),
        None => Ok(Credentials::from_env()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a .env file in the working directory if there is one
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Starting graph-dump");

    if let Err(err) = run(cli).await {
        error!("{:#}", err);
        return Err(err);
    }

    Ok(())
}
