//! Spreadsheet header inspection

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::excel::{CoverageReport, HeaderToken, SheetData, check_coverage, read_sheet, tokenize_headers};

#[derive(Args)]
pub struct InspectCommands {
    /// Spreadsheet to inspect (defaults to [inspect].file, then [personnel].renewal_file)
    pub file: Option<PathBuf>,

    /// Sheet name (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Number of data rows to preview
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns to show per preview row
    #[arg(long)]
    pub columns: Option<usize>,

    /// Expected field name to check for; repeatable
    #[arg(long = "expect")]
    pub expect: Vec<String>,
}

/// Resolved inspection settings for one run
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub file: PathBuf,
    pub sheet: Option<String>,
    pub preview_rows: usize,
    pub preview_columns: usize,
    pub expected_headers: Vec<String>,
}

impl InspectOptions {
    pub fn resolve(args: InspectCommands, config: &Config) -> Result<Self> {
        let file = args
            .file
            .or_else(|| config.inspect.file.clone())
            .or_else(|| config.personnel.renewal_file.clone())
            .context("No spreadsheet given; pass a path or set [inspect].file in the config")?;

        let expected_headers = if args.expect.is_empty() {
            config.inspect.expected_headers.clone()
        } else {
            args.expect
        };

        Ok(Self {
            file,
            sheet: args.sheet,
            preview_rows: args.rows.unwrap_or(config.inspect.preview_rows),
            preview_columns: args.columns.unwrap_or(config.inspect.preview_columns),
            expected_headers,
        })
    }
}

pub fn handle_inspect_command(args: InspectCommands, config: &Config) -> Result<()> {
    let options = InspectOptions::resolve(args, config)?;
    info!("Inspecting {:?}", options.file);

    let sheet = read_sheet(&options.file, options.sheet.as_deref())
        .with_context(|| format!("Failed to inspect {}", options.file.display()))?;
    let tokens = tokenize_headers(&sheet.headers);

    println!("📄 {} (sheet '{}')", options.file.display().to_string().cyan(), sheet.name);
    println!("Rows: {}, Columns: {}", sheet.row_count(), sheet.column_count());
    println!();

    print_headers(&tokens);
    print_preview(&sheet, &options);

    if !options.expected_headers.is_empty() {
        let report = check_coverage(&tokens, &options.expected_headers);
        print_coverage(&report);
    }

    Ok(())
}

fn print_headers(tokens: &[HeaderToken]) {
    println!("{}", "Spreadsheet Headers (first row):".bold());
    println!("{}", "-".repeat(80));

    if tokens.iter().all(HeaderToken::is_empty) {
        println!("{}", "Row 1 has no headers".yellow());
        println!();
        return;
    }

    for token in tokens.iter().filter(|t| !t.is_empty()) {
        println!(
            "Column {}: '{}'",
            token.column,
            token.raw_text.as_deref().unwrap_or_default()
        );
        println!("  Normalized: '{}'", token.normalized_text.green());
        println!();
    }
}

fn print_preview(sheet: &SheetData, options: &InspectOptions) {
    println!(
        "\n{}",
        format!("First {} Data Rows:", options.preview_rows).bold()
    );
    println!("{}", "-".repeat(80));

    for row in sheet.preview(options.preview_rows, options.preview_columns) {
        println!("Row {}:", row.row_number);
        for (column, value) in row.cells {
            println!("  Column {}: {}", column, value);
        }
        println!();
    }
}

fn print_coverage(report: &CoverageReport) {
    println!("{}", "=".repeat(60));
    println!("FIELD COVERAGE");
    println!("{}", "=".repeat(60));
    println!("{}", report.summary());

    if !report.matched.is_empty() {
        println!("\n✅ Matched Fields:");
        for m in &report.matched {
            println!("  • '{}' → column {} ('{}')", m.expected, m.column, m.header);
        }
    }

    if !report.missing.is_empty() {
        println!("\n❌ Missing Fields:");
        for missing in &report.missing {
            match &missing.suggestion {
                Some(suggestion) => println!(
                    "  • '{}' (closest header: '{}')",
                    missing.expected.red(),
                    suggestion
                ),
                None => println!("  • '{}'", missing.expected.red()),
            }
        }
    }

    if !report.extra.is_empty() {
        println!("\n⚠️  Extra Columns:");
        for header in &report.extra {
            println!(
                "  • column {}: '{}'",
                header.column,
                header.raw_text.as_deref().unwrap_or_default()
            );
        }
    }
}
