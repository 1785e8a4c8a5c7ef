use super::commands::ConfigCommands;
use super::commands::InspectCommands;
use super::commands::PlansCommands;
use super::commands::RenewalCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "isg-tools")]
#[command(about = "Operator tools for the ISG planning and personnel services")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the per-user location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print spreadsheet headers with their normalized forms and preview data rows
    Inspect(InspectCommands),
    /// Annual work plan submission and maintenance
    Plans(PlansCommands),
    /// Bulk ISG basic training renewal upload
    Renewal(RenewalCommands),
    /// Show or initialise the configuration file
    Config(ConfigCommands),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::plans::PlansSubcommands;
    use crate::cli::commands::renewal::RenewalSubcommands;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit_with_overrides() {
        let cli = Cli::parse_from([
            "isg-tools",
            "--config",
            "/tmp/isg.toml",
            "plans",
            "submit",
            "--year",
            "2026",
            "--dry-run",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/isg.toml")));
        match cli.command {
            Commands::Plans(PlansCommands {
                command: PlansSubcommands::Submit { year, dry_run, records },
            }) => {
                assert_eq!(year, Some(2026));
                assert!(dry_run);
                assert!(records.is_none());
            }
            _ => panic!("expected plans submit"),
        }
    }

    #[test]
    fn test_parse_upload_overwrite_value() {
        let cli = Cli::parse_from(["isg-tools", "renewal", "upload", "data.xlsx", "--overwrite", "false"]);

        match cli.command {
            Commands::Renewal(RenewalCommands {
                command: RenewalSubcommands::Upload { file, overwrite },
            }) => {
                assert_eq!(file, Some(PathBuf::from("data.xlsx")));
                assert_eq!(overwrite, Some(false));
            }
            _ => panic!("expected renewal upload"),
        }
    }

    #[test]
    fn test_parse_inspect_expectations() {
        let cli = Cli::parse_from([
            "isg-tools", "inspect", "x.xlsx", "--expect", "T.C. Kimlik No", "--expect", "Adı", "--rows", "5",
        ]);

        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.expect, vec!["T.C. Kimlik No", "Adı"]);
                assert_eq!(args.rows, Some(5));
                assert_eq!(args.columns, None);
            }
            _ => panic!("expected inspect"),
        }
    }
}
