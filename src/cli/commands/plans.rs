//! Annual work plan commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use log::{info, warn};
use std::path::PathBuf;

use crate::api::build_http_client;
use crate::config::Config;
use crate::plans::{
    BatchSummary, PlanningClient, SubmissionOutcome, SubmitterConfig, WorkPlanRecord,
    WorkPlanSubmitter, builtin_records, inspect_batch, load_records_file,
};

#[derive(Args)]
pub struct PlansCommands {
    #[command(subcommand)]
    pub command: PlansSubcommands,
}

#[derive(Subcommand)]
pub enum PlansSubcommands {
    /// Submit work plan records one by one
    Submit {
        /// Plan year (defaults to [planning].year)
        #[arg(long)]
        year: Option<i32>,
        /// JSON array of records to submit instead of the built-in catalogue
        #[arg(long)]
        records: Option<PathBuf>,
        /// Print request bodies without contacting the server
        #[arg(long)]
        dry_run: bool,
    },
    /// List plans stored for a year
    List {
        /// Plan year (defaults to [planning].year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Copy every plan of one year into another year
    CopyYear {
        /// Source year
        #[arg(long)]
        from: i32,
        /// Target year
        #[arg(long)]
        to: i32,
    },
}

pub async fn handle_plans_command(args: PlansCommands, config: &Config) -> Result<()> {
    match args.command {
        PlansSubcommands::Submit {
            year,
            records,
            dry_run,
        } => submit(config, year.unwrap_or(config.planning.year), records, dry_run).await,
        PlansSubcommands::List { year } => list(config, year.unwrap_or(config.planning.year)).await,
        PlansSubcommands::CopyYear { from, to } => copy_year(config, from, to).await,
    }
}

/// Build the batch for a run: the file when given, otherwise the catalogue
pub fn resolve_records(config: &Config, year: i32, records: Option<PathBuf>) -> Result<Vec<WorkPlanRecord>> {
    let planning = &config.planning;
    match records {
        Some(path) => load_records_file(&path, year, planning.default_priority, planning.default_status),
        None => Ok(builtin_records(year, planning.default_priority, planning.default_status)),
    }
}

/// Refuse batches with duplicate sequence numbers or empty required fields
pub fn check_batch(records: &[WorkPlanRecord]) -> Result<()> {
    let issues = inspect_batch(records);

    if !issues.out_of_order.is_empty() {
        warn!("Sequence numbers not increasing at: {:?}", issues.out_of_order);
        println!(
            "{} Sequence numbers are not increasing at: {}",
            "⚠".yellow(),
            join_numbers(&issues.out_of_order)
        );
    }

    if !issues.duplicate_sequences.is_empty() {
        anyhow::bail!(
            "Duplicate sequence numbers in batch: {}",
            join_numbers(&issues.duplicate_sequences)
        );
    }

    if !issues.incomplete_records.is_empty() {
        anyhow::bail!(
            "Records missing activity name or related legislation: {}",
            join_numbers(&issues.incomplete_records)
        );
    }

    Ok(())
}

async fn submit(config: &Config, year: i32, records: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let records = resolve_records(config, year, records)?;
    check_batch(&records)?;

    if dry_run {
        for record in &records {
            println!(
                "{}",
                serde_json::to_string(record).context("Failed to serialize record")?
            );
        }
        println!("\n{} records, nothing sent (dry run)", records.len());
        return Ok(());
    }

    let submitter = WorkPlanSubmitter::new(
        build_http_client(&config.http)?,
        SubmitterConfig::from_base_url(&config.planning.base_url),
    );

    println!("Adding ISG annual work plan records for {}...\n", year);
    info!("Submitting {} records for {}", records.len(), year);

    let summary = submitter.submit_batch(&records, print_outcome).await;
    print_summary(records.len(), &summary);

    Ok(())
}

fn print_outcome(record: &WorkPlanRecord, outcome: &SubmissionOutcome) {
    let seq = record.sequence_number;
    match outcome {
        SubmissionOutcome::Accepted => {
            let short: String = record.activity_name.chars().take(50).collect();
            println!("{} [{}] {}...", "✓".bright_green().bold(), seq, short);
        }
        SubmissionOutcome::Rejected { status } => {
            println!("{} [{}] Error: {}", "✗".bright_red().bold(), seq, status);
        }
        SubmissionOutcome::TransportFailure { cause } => {
            println!("{} [{}] Error: {}", "✗".bright_red().bold(), seq, cause.red());
        }
    }
}

fn print_summary(submitted: usize, summary: &BatchSummary) {
    println!("\n{}", "=".repeat(60));
    println!("Total: {} plans", submitted);
    println!("Accepted: {}", summary.accepted_count().to_string().green());
    println!("Rejected: {}", summary.rejected_count());
    println!("Failed: {}", summary.failed_count());

    let retry = summary.retry_candidates();
    if !retry.is_empty() {
        println!("Re-run candidates: {}", join_numbers(&retry).yellow());
    }
    println!("{}", "=".repeat(60));
}

async fn list(config: &Config, year: i32) -> Result<()> {
    let client = PlanningClient::new(build_http_client(&config.http)?, &config.planning.base_url);
    let plans = client
        .list_plans(year)
        .await
        .with_context(|| format!("Failed to list plans for {}", year))?;

    if plans.is_empty() {
        println!("No plans stored for {}.", year);
        return Ok(());
    }

    println!("Annual work plans for {}:", year);
    println!("{:>4}  {:<24} {:<9} {:<11} Activity", "Seq", "Category", "Priority", "Status");
    println!("{}", "-".repeat(80));

    for plan in &plans {
        let seq = plan
            .sequence_number
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let category: String = plan.category.as_deref().unwrap_or("").chars().take(24).collect();
        println!(
            "{:>4}  {:<24} {:<9} {:<11} {}",
            seq,
            category,
            plan.priority.as_deref().unwrap_or(""),
            plan.status.as_deref().unwrap_or(""),
            plan.activity_name
        );
    }

    println!("\nTotal plans: {}", plans.len());
    Ok(())
}

async fn copy_year(config: &Config, from: i32, to: i32) -> Result<()> {
    if from == to {
        anyhow::bail!("Source and target year are both {}", from);
    }

    let client = PlanningClient::new(build_http_client(&config.http)?, &config.planning.base_url);
    println!("Copying plans from {} to {}...", from, to);

    let copied = client
        .copy_year(from, to)
        .await
        .with_context(|| format!("Failed to copy plans from {} to {}", from, to))?;

    println!(
        "{} Copied {} plans from {} to {}",
        "✓".bright_green().bold(),
        copied,
        from,
        to
    );
    Ok(())
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
