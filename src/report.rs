//! Field/Value CSV export of a finished calculation
//!
//! The export mirrors what the sales team receives: one row per field, with
//! the selection, the headline figures, per-square-foot costs and the
//! visitor's contact details.

use crate::dispatch::NOT_APPLICABLE;
use crate::engine::SavingsResult;
use crate::format;
use crate::types::BuildingType;
use crate::wizard::ContactRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One `Field,Value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub field: &'static str,
    pub value: String,
}

impl ReportRow {
    fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Build the report rows in their published order.
pub fn report_rows(
    result: &SavingsResult,
    building_type: Option<BuildingType>,
    contact: &ContactRecord,
) -> Vec<ReportRow> {
    let figures = result.figures();
    let category = result.category();
    let cents = |v: f64| format!("{:.2}", (v * 100.0).round() / 100.0);

    vec![
        ReportRow::new("What are you looking to replace?", category.label()),
        ReportRow::new("Replace System", category.replacement()),
        ReportRow::new(
            "Competitor",
            result.competitor_name().unwrap_or(NOT_APPLICABLE),
        ),
        ReportRow::new("Project Size (sq ft)", figures.area_size.to_string()),
        ReportRow::new(
            "Building Type",
            building_type.map(|b| b.label()).unwrap_or_default(),
        ),
        ReportRow::new("Total Project Savings ($)", figures.total_savings.to_string()),
        ReportRow::new("Savings (%)", figures.percent_savings.to_string()),
        ReportRow::new("Cost Savings per SF ($)", cents(result.savings_per_area())),
        ReportRow::new(
            "Current System Cost ($)",
            figures.baseline_total_cost.to_string(),
        ),
        ReportRow::new(
            "Current System Cost per SF ($/sq ft)",
            cents(figures.baseline_cost_per_area),
        ),
        ReportRow::new("MAXTERRA System Cost ($)", figures.own_total_cost.to_string()),
        ReportRow::new(
            "MAXTERRA Cost per SF ($/sq ft)",
            cents(figures.own_cost_per_area),
        ),
        ReportRow::new("First Name", contact.first_name.trim()),
        ReportRow::new("Last Name", contact.last_name.trim()),
        ReportRow::new("Email", contact.email.trim()),
    ]
}

/// Write rows as CSV with a `Field,Value` header.
pub fn write_csv<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Field", "Value"])
        .context("Failed to write CSV header")?;
    for row in rows {
        csv.write_record([row.field, row.value.as_str()])
            .with_context(|| format!("Failed to write CSV row '{}'", row.field))?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the report to a file, replacing any existing one.
pub fn save_csv<P: AsRef<Path>>(path: P, rows: &[ReportRow]) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create report file {:?}", path.as_ref()))?;
    write_csv(file, rows)?;
    info!("Report written to {:?}", path.as_ref());
    Ok(())
}

/// Plain-text summary for the `calculate` command
pub fn summary_lines(result: &SavingsResult) -> Vec<String> {
    let figures = result.figures();
    let mut lines = vec![
        format!("Project type:        {}", result.category().label()),
        format!("Compared against:    {}", figures.comparison_name),
        format!("Project size:        {}", format::area(figures.area_size)),
        format!(
            "Total savings:       {} ({}% less)",
            format::currency(figures.total_savings),
            figures.percent_savings
        ),
        format!(
            "Current system:      {} ({}/sq ft)",
            format::currency(figures.baseline_total_cost),
            format::per_area(figures.baseline_cost_per_area)
        ),
        format!(
            "MAXTERRA system:     {} ({}/sq ft)",
            format::currency(figures.own_total_cost),
            format::per_area(figures.own_cost_per_area)
        ),
        format!(
            "Savings per sq ft:   {}",
            format::per_area(result.savings_per_area())
        ),
    ];
    if let SavingsResult::FullSubfloor {
        spacing_note,
        construction_note,
        ..
    } = result
    {
        lines.extend(spacing_note.iter().map(|n| format!("  - {n}")));
        lines.extend(construction_note.iter().map(|n| format!("  - {n}")));
    }
    lines.push("Additional benefits:".to_string());
    lines.extend(figures.additional_benefits.iter().map(|b| format!("  - {b}")));
    lines
}
