use crate::types::{BuildingType, ProjectCategory};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// MAXTERRA Savings Calculator - compare floor system costs from the terminal
#[derive(Parser)]
#[command(name = "maxterra-savings")]
#[command(about = "Estimate project savings from switching to MAXTERRA MgO floor systems")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (dispatch endpoint, redirect form, timeout)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive calculator (default)
    Run,
    /// Calculate savings without the interactive wizard
    Calculate {
        #[command(flatten)]
        project: ProjectArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the comparison catalog
    Catalog,
    /// Calculate savings and write the Field/Value CSV report
    Report {
        #[command(flatten)]
        project: ProjectArgs,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        /// CSV file to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Project selection shared by the non-interactive commands
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// What is being replaced (wet-underlayment or full-subfloor)
    #[arg(long)]
    pub category: ProjectCategory,

    /// Project size in square feet
    #[arg(long, default_value_t = crate::engine::DEFAULT_AREA_SIZE)]
    pub area: f64,

    /// Current subfloor product (catalog identifier, e.g. exacor)
    #[arg(long)]
    pub comparator: Option<String>,

    /// Building type (multifamily, hotel, commercial, retail, singlefamily, other)
    #[arg(long)]
    pub building_type: Option<BuildingType>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["maxterra-savings"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_calculate_subfloor() {
        let cli = Cli::try_parse_from([
            "maxterra-savings",
            "calculate",
            "--category",
            "full-subfloor",
            "--area",
            "10000",
            "--comparator",
            "exacor",
            "--building-type",
            "hotel",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Calculate { project, json }) => {
                assert_eq!(project.category, ProjectCategory::FullSubfloor);
                assert_eq!(project.area, 10_000.0);
                assert_eq!(project.comparator.as_deref(), Some("exacor"));
                assert_eq!(project.building_type, Some(BuildingType::Hotel));
                assert!(json);
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_cli_category_alias_and_default_area() {
        let cli = Cli::try_parse_from(["maxterra-savings", "calculate", "--category", "gypcrete"])
            .unwrap();
        match cli.command {
            Some(Commands::Calculate { project, json }) => {
                assert_eq!(project.category, ProjectCategory::WetUnderlayment);
                assert_eq!(project.area, 10_000.0);
                assert!(!json);
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        let result = Cli::try_parse_from(["maxterra-savings", "calculate", "--category", "tile"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_report_requires_contact() {
        let result = Cli::try_parse_from([
            "maxterra-savings",
            "report",
            "--category",
            "wet-underlayment",
            "--output",
            "report.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["maxterra-savings", "catalog", "--config", "/etc/savings.json"])
            .unwrap();
        assert_eq!(cli.config.unwrap().to_str().unwrap(), "/etc/savings.json");
    }
}
