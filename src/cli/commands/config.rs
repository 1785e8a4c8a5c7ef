use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use log::info;
use std::path::Path;

use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Write a configuration file with default values
    Init {
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_config_command(args: ConfigCommands, config: &Config, config_path: &Path) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show => {
            println!("# {}", config_path.display().to_string().dimmed());
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigSubcommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigSubcommands::Init { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to replace it)",
                    config_path.display()
                );
            }

            info!("Writing default config to {:?}", config_path);
            Config::default().save_to(config_path)?;
            println!(
                "{} Wrote default configuration to {}",
                "✓".bright_green().bold(),
                config_path.display()
            );
            Ok(())
        }
    }
}
