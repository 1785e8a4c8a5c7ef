use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log::{error, info};

use isg_tools::cli::commands::{
    handle_config_command, handle_inspect_command, handle_plans_command, handle_renewal_command,
};
use isg_tools::cli::{Cli, Commands};
use isg_tools::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    // Inspection failures print the full error report, backtrace included when enabled
    let detailed = matches!(cli.command, Commands::Inspect(_));

    if let Err(e) = run(cli).await {
        error!("{:?}", e);
        if detailed {
            eprintln!("{} {:?}", "✗ Error:".bright_red().bold(), e);
        } else {
            eprintln!("{} {:#}", "✗ Error:".bright_red().bold(), e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("isg-tools.log")
        .context("Failed to open isg-tools.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;
    info!("Starting isg-tools with config {:?}", config_path);

    match cli.command {
        Commands::Inspect(args) => handle_inspect_command(args, &config),
        Commands::Plans(args) => handle_plans_command(args, &config).await,
        Commands::Renewal(args) => handle_renewal_command(args, &config).await,
        Commands::Config(args) => handle_config_command(args, &config, &config_path),
    }
}
