//! Savings engine
//!
//! A single pure operation, [`compute_savings`], turns the user's
//! [`ProjectSelection`] into a [`SavingsResult`] using the comparison
//! catalog. It has no side effects and no caching; calling it twice with the
//! same inputs yields the same result.
//!
//! # Rounding
//!
//! Project totals are rounded to whole currency units and the percentage to a
//! whole percent. `total_savings` is derived from the two rounded totals so
//! `baseline_total_cost - own_total_cost == total_savings` always holds.
//! Per-square-foot figures keep full precision.

use crate::catalog::{BASELINE_LABEL, Catalog};
use crate::error::{Result, SavingsError};
use crate::types::{BuildingType, ProjectCategory};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Project size offered before the user types anything, in square feet
pub const DEFAULT_AREA_SIZE: f64 = 10_000.0;

/// Largest project size accepted, in square feet
pub const MAX_AREA_SIZE: f64 = 1.0e9;

/// The user's in-progress choices. Owned by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSelection {
    pub category: Option<ProjectCategory>,
    pub building_type: Option<BuildingType>,
    /// Square feet; `None` while the field is blank
    pub area_size: Option<f64>,
    /// Catalog identifier, only consulted for full-subfloor projects
    pub comparison_target: Option<String>,
}

impl Default for ProjectSelection {
    fn default() -> Self {
        Self {
            category: None,
            building_type: None,
            area_size: Some(DEFAULT_AREA_SIZE),
            comparison_target: None,
        }
    }
}

impl ProjectSelection {
    /// Convenience constructor for a complete selection
    pub fn new(category: ProjectCategory, area_size: f64) -> Self {
        Self {
            category: Some(category),
            area_size: Some(area_size),
            ..Self::default()
        }
    }

    pub fn with_comparator(mut self, identifier: impl Into<String>) -> Self {
        self.comparison_target = Some(identifier.into());
        self
    }

    pub fn with_building_type(mut self, building_type: BuildingType) -> Self {
        self.building_type = Some(building_type);
        self
    }

    /// Names of the fields still blank for the chosen category.
    ///
    /// These are presence checks only; whether the comparator exists in the
    /// catalog is decided by [`compute_savings`].
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let Some(category) = self.category else {
            missing.push("project type");
            return missing;
        };
        if self.area_size.is_none() {
            missing.push("project size");
        }
        if category.requires_comparator() {
            if self.building_type.is_none() {
                missing.push("building type");
            }
            if self
                .comparison_target
                .as_deref()
                .is_none_or(|t| t.trim().is_empty())
            {
                missing.push("current subfloor product");
            }
        }
        missing
    }
}

/// Figures shared by both result kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsFigures {
    /// Comparator display name, or the baseline label
    pub comparison_name: String,
    pub total_savings: u64,
    pub percent_savings: u32,
    pub baseline_total_cost: u64,
    pub own_total_cost: u64,
    pub baseline_cost_per_area: f64,
    pub own_cost_per_area: f64,
    /// Project size the totals were computed for
    pub area_size: f64,
    pub additional_benefits: Vec<String>,
}

/// Outcome of a calculation. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SavingsResult {
    /// Compared against the OSB + gypcrete baseline
    WetUnderlayment {
        #[serde(flatten)]
        figures: SavingsFigures,
    },
    /// Compared against a named competitor subfloor
    FullSubfloor {
        /// Catalog identifier of the comparator
        comparator: String,
        spacing_note: Option<String>,
        construction_note: Option<String>,
        #[serde(flatten)]
        figures: SavingsFigures,
    },
}

impl SavingsResult {
    pub fn figures(&self) -> &SavingsFigures {
        match self {
            Self::WetUnderlayment { figures } | Self::FullSubfloor { figures, .. } => figures,
        }
    }

    pub fn category(&self) -> ProjectCategory {
        match self {
            Self::WetUnderlayment { .. } => ProjectCategory::WetUnderlayment,
            Self::FullSubfloor { .. } => ProjectCategory::FullSubfloor,
        }
    }

    pub fn comparison_name(&self) -> &str {
        &self.figures().comparison_name
    }

    /// Comparator display name for reports; `None` for the baseline
    pub fn competitor_name(&self) -> Option<&str> {
        match self {
            Self::WetUnderlayment { .. } => None,
            Self::FullSubfloor { figures, .. } => Some(&figures.comparison_name),
        }
    }

    /// Per-square-foot difference between the current system and MAXTERRA
    pub fn savings_per_area(&self) -> f64 {
        let figures = self.figures();
        figures.baseline_cost_per_area - figures.own_cost_per_area
    }

    /// Pretty-printed JSON, tagged with `kind`
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the savings for a selection.
///
/// # Errors
///
/// [`SavingsError::InvalidSelection`] when the category is missing, the area
/// is missing or not a positive finite number, the comparator is missing or
/// unknown, or the comparison has a zero baseline cost.
pub fn compute_savings(selection: &ProjectSelection, catalog: &Catalog) -> Result<SavingsResult> {
    let category = selection
        .category
        .ok_or_else(|| SavingsError::invalid_selection("no project type chosen"))?;
    let area = validated_area(selection.area_size)?;

    let result = match category {
        ProjectCategory::WetUnderlayment => {
            let baseline = catalog.baseline();
            let figures = figures(
                BASELINE_LABEL.to_string(),
                baseline.current.total(),
                baseline.own.total(),
                area,
                baseline.additional_benefits.clone(),
            )?;
            SavingsResult::WetUnderlayment { figures }
        }
        ProjectCategory::FullSubfloor => {
            let identifier = selection
                .comparison_target
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| SavingsError::invalid_selection("no current subfloor product chosen"))?;
            let entry = catalog.get(identifier).ok_or_else(|| {
                SavingsError::invalid_selection(format!("unknown subfloor product '{identifier}'"))
            })?;
            let figures = figures(
                entry.display_name.clone(),
                entry.alternative_cost_per_area,
                entry.own_cost_per_area,
                area,
                entry.additional_benefits.clone(),
            )?;
            SavingsResult::FullSubfloor {
                comparator: entry.identifier.clone(),
                spacing_note: entry.spacing_note.clone(),
                construction_note: entry.construction_note.clone(),
                figures,
            }
        }
    };

    debug!(
        category = %category,
        comparison = result.comparison_name(),
        area,
        savings = result.figures().total_savings,
        "computed savings"
    );
    Ok(result)
}

fn validated_area(area: Option<f64>) -> Result<f64> {
    match area {
        None => Err(SavingsError::invalid_selection("project size is required")),
        Some(a) if a > MAX_AREA_SIZE => Err(SavingsError::invalid_selection(format!(
            "project size must be at most {} sq ft (got {a})",
            crate::format::thousands(MAX_AREA_SIZE as u64)
        ))),
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        Some(a) => Err(SavingsError::invalid_selection(format!(
            "project size must be a positive number of square feet (got {a})"
        ))),
    }
}

fn figures(
    comparison_name: String,
    baseline_per_area: f64,
    own_per_area: f64,
    area: f64,
    additional_benefits: Vec<String>,
) -> Result<SavingsFigures> {
    let baseline_total = baseline_per_area * area;
    let own_total = own_per_area * area;
    if baseline_total <= 0.0 {
        return Err(SavingsError::invalid_selection(format!(
            "{comparison_name} has no baseline cost to compare against"
        )));
    }
    if !baseline_total.is_finite() || baseline_total >= u64::MAX as f64 {
        return Err(SavingsError::invalid_selection(format!(
            "project total for {comparison_name} is too large to calculate"
        )));
    }

    let baseline_total_cost = whole_units(baseline_total);
    let own_total_cost = whole_units(own_total);
    let percent = ((baseline_total - own_total) / baseline_total * 100.0).round();

    Ok(SavingsFigures {
        comparison_name,
        total_savings: baseline_total_cost.saturating_sub(own_total_cost),
        percent_savings: percent.max(0.0) as u32,
        baseline_total_cost,
        own_total_cost,
        baseline_cost_per_area: baseline_per_area,
        own_cost_per_area: own_per_area,
        area_size: area,
        additional_benefits,
    })
}

fn whole_units(amount: f64) -> u64 {
    amount.round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_has_default_area() {
        let selection = ProjectSelection::default();
        assert_eq!(selection.area_size, Some(DEFAULT_AREA_SIZE));
        assert!(selection.category.is_none());
    }

    #[test]
    fn test_missing_fields_for_subfloor() {
        let selection = ProjectSelection::new(ProjectCategory::FullSubfloor, 500.0);
        assert_eq!(
            selection.missing_fields(),
            vec!["building type", "current subfloor product"]
        );
    }

    #[test]
    fn test_wet_underlayment_needs_only_area() {
        let mut selection = ProjectSelection::new(ProjectCategory::WetUnderlayment, 500.0);
        assert!(selection.missing_fields().is_empty());
        selection.area_size = None;
        assert_eq!(selection.missing_fields(), vec!["project size"]);
    }

    #[test]
    fn test_blank_comparator_is_missing() {
        let selection = ProjectSelection::new(ProjectCategory::FullSubfloor, 500.0)
            .with_building_type(BuildingType::Hotel)
            .with_comparator("   ");
        assert_eq!(selection.missing_fields(), vec!["current subfloor product"]);
    }

    #[test]
    fn test_zero_baseline_cost_is_rejected() {
        let err = figures("free".into(), 0.0, 0.0, 100.0, Vec::new()).unwrap_err();
        assert!(matches!(err, SavingsError::InvalidSelection(_)));
    }

    #[test]
    fn test_unrepresentable_total_is_rejected() {
        let err = figures("huge".into(), 4.32, 2.95, 1.0e20, Vec::new()).unwrap_err();
        assert!(matches!(err, SavingsError::InvalidSelection(_)));
        assert!(figures("inf".into(), f64::INFINITY, 1.0, 1.0, Vec::new()).is_err());
    }

    #[test]
    fn test_savings_per_area_keeps_precision() {
        let catalog = Catalog::standard();
        let selection = ProjectSelection::new(ProjectCategory::WetUnderlayment, 1.0);
        let result = compute_savings(&selection, &catalog).unwrap();
        assert!((result.savings_per_area() - 1.665).abs() < 1e-9);
    }
}
