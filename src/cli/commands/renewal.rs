//! Training renewal upload command

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::api::build_http_client;
use crate::config::Config;
use crate::renewal::{RenewalUploader, UploadError, UploadSummary, UploaderConfig};

/// How many updated identifiers the summary prints
const IDENTIFIER_PREVIEW: usize = 5;

#[derive(Args)]
pub struct RenewalCommands {
    #[command(subcommand)]
    pub command: RenewalSubcommands,
}

#[derive(Subcommand)]
pub enum RenewalSubcommands {
    /// Upload a spreadsheet to the bulk training renewal endpoint
    Upload {
        /// Spreadsheet to upload (defaults to [personnel].renewal_file)
        file: Option<PathBuf>,
        /// Whether the server may overwrite existing renewal dates (true/false)
        #[arg(long)]
        overwrite: Option<bool>,
    },
}

pub async fn handle_renewal_command(args: RenewalCommands, config: &Config) -> Result<()> {
    match args.command {
        RenewalSubcommands::Upload { file, overwrite } => {
            let path = file
                .or_else(|| config.personnel.renewal_file.clone())
                .context("No spreadsheet given; pass a path or set [personnel].renewal_file in the config")?;
            let overwrite = overwrite.unwrap_or(config.personnel.overwrite_existing);
            upload(config, path, overwrite).await
        }
    }
}

async fn upload(config: &Config, path: PathBuf, overwrite: bool) -> Result<()> {
    let uploader = RenewalUploader::new(
        build_http_client(&config.http)?,
        UploaderConfig::from_base_url(&config.personnel.base_url),
    );

    println!(
        "📤 Uploading {} (overwriteExisting={})",
        path.display().to_string().cyan(),
        overwrite
    );

    match uploader.upload_file(&path, overwrite).await {
        Ok(summary) => {
            println!("Status Code: 200");
            print_summary(&summary);
            Ok(())
        }
        Err(UploadError::Rejected { status, body }) => {
            println!("Status Code: {}", status);
            println!("Response: {}", body);
            println!("\n{} Error: {}", "✗".bright_red().bold(), status);
            Err(UploadError::Rejected { status, body })
                .with_context(|| format!("Upload of {} was rejected", path.display()))
        }
        Err(e) => Err(e).with_context(|| format!("Upload of {} failed", path.display())),
    }
}

fn print_summary(summary: &UploadSummary) {
    println!("\n{} Success!", "✓".bright_green().bold());
    println!("  Total Rows: {}", summary.total_rows);
    println!("  Updated: {}", summary.updated_count);
    println!("  Skipped: {}", summary.skipped_count);
    println!("  Not Found: {}", summary.not_found_count);

    let (shown, truncated) = summary.identifier_preview(IDENTIFIER_PREVIEW);
    if !shown.is_empty() {
        let suffix = if truncated { "..." } else { "" };
        println!("  Updated IDs: {}{}", shown.join(", "), suffix);
    }

    if !summary.is_consistent() {
        println!(
            "  {} Server counts exceed total rows ({} > {})",
            "⚠".yellow(),
            summary.accounted_rows(),
            summary.total_rows
        );
    }
}
