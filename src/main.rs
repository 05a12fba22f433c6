//! MAXTERRA Savings Calculator - Main entry point
//!
//! Interactive wizard by default; `calculate`, `catalog` and `report` run
//! without a terminal UI.

use anyhow::{Context, Result};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use maxterra_savings::app::App;
use maxterra_savings::catalog::Catalog;
use maxterra_savings::cli::{Cli, Commands, ProjectArgs};
use maxterra_savings::config::AppConfig;
use maxterra_savings::dispatch::HttpDispatcher;
use maxterra_savings::engine::{ProjectSelection, SavingsResult, compute_savings};
use maxterra_savings::format;
use maxterra_savings::report;
use maxterra_savings::wizard::ContactRecord;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize tracing. `RUST_LOG` overrides the default `info` level.
///
/// The interactive UI owns the terminal, so without a log file its logs
/// are dropped rather than drawn over the screen.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None if interactive => BoxMakeWriter::new(std::io::sink),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .with_target(false)
        .init();
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Run));
    init_tracing(cli.log_file.as_deref(), interactive)?;
    info!("MAXTERRA Savings Calculator starting up");

    let config = AppConfig::resolve(cli.config.as_deref());
    debug!(?config, "configuration resolved");
    let catalog = Catalog::standard();

    match cli.command {
        None | Some(Commands::Run) => run_tui(catalog, config),
        Some(Commands::Calculate { project, json }) => {
            let result = calculate(&project, &catalog)?;
            if json {
                println!("{}", result.to_json_pretty()?);
            } else {
                for line in report::summary_lines(&result) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        Some(Commands::Catalog) => {
            print_catalog(&catalog);
            Ok(())
        }
        Some(Commands::Report {
            project,
            first_name,
            last_name,
            email,
            output,
        }) => {
            let result = calculate(&project, &catalog)?;
            let contact = ContactRecord {
                first_name,
                last_name,
                email,
            };
            let rows = report::report_rows(&result, project.building_type, &contact);
            report::save_csv(&output, &rows)?;
            println!("✓ Report written to {}", output.display());
            Ok(())
        }
    }
}

fn calculate(project: &ProjectArgs, catalog: &Catalog) -> Result<SavingsResult> {
    let mut selection = ProjectSelection::new(project.category, project.area);
    selection.comparison_target = project.comparator.clone();
    selection.building_type = project.building_type;

    compute_savings(&selection, catalog).map_err(|e| {
        error!("Calculation failed: {}", e);
        anyhow::Error::new(e)
    })
}

fn print_catalog(catalog: &Catalog) {
    let baseline = catalog.baseline();
    println!("Wet Gypsum Underlayment (baseline: OSB + gypcrete)");
    println!(
        "  {:<16}{:>10}{:>12}",
        "gypcrete",
        format::per_area(baseline.current.total()),
        format::per_area(baseline.own.total())
    );
    println!();
    println!("Entire Subfloor System");
    println!("  {:<16}{:>10}{:>12}   {}", "identifier", "current", "MAXTERRA", "name");
    for entry in catalog.entries() {
        println!(
            "  {:<16}{:>10}{:>12}   {}",
            entry.identifier,
            format::per_area(entry.alternative_cost_per_area),
            format::per_area(entry.own_cost_per_area),
            entry.display_name
        );
    }
}

/// Run the interactive calculator
fn run_tui(catalog: Catalog, config: AppConfig) -> Result<()> {
    let dispatcher = HttpDispatcher::from_config(&config).context("Failed to build HTTP client")?;
    info!(endpoint = dispatcher.endpoint(), "report dispatcher ready");

    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let mut app = App::new(Arc::new(catalog), Arc::new(dispatcher), config);
            app.run(&mut terminal).map_err(anyhow::Error::new)
        });

    // Always attempt cleanup, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    if let Some(redirect) = result? {
        println!("Thanks! Your report is on its way.");
        println!("Continue at: {}", redirect);
    }
    Ok(())
}
