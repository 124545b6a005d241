//! Work item type server binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wit_config::{ConfigLoader, LogLevel, WitConfig};
use wit_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", WitConfig::default().to_yaml()?);
        return Ok(());
    }

    let mut config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    config.validate_all().context("Invalid configuration")?;

    wit_logging::init_logging_from_config(&config.logging)?;

    let server = Server::new(config).await?;
    server.start().await
}

fn apply_cli_overrides(config: &mut WitConfig, cli: &Cli) {
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
}
