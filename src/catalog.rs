//! Comparison catalog
//!
//! Read-only cost data for every competitor product the calculator can
//! compare against, plus the fixed wet-gypsum (gypcrete) baseline.
//!
//! # Invariants
//!
//! - Identifiers are unique and non-empty
//! - Every cost figure is finite and non-negative
//! - `alternative_cost_per_area >= own_cost_per_area` for every entry
//!
//! [`Catalog::new`] enforces these. The catalog has no mutation API; build it
//! once at startup and share it behind an `Arc`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used for the baseline wherever a comparator name would appear
pub const BASELINE_LABEL: &str = "gypcrete";

/// One named competitor product and the cost figures it is compared on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Stable lookup key (e.g. `exacor`)
    pub identifier: String,
    /// Product name as shown to the user (e.g. `EXACOR`)
    pub display_name: String,
    /// MAXTERRA cost per square foot in this configuration
    pub own_cost_per_area: f64,
    /// Competitor cost per square foot
    pub alternative_cost_per_area: f64,
    /// Joist spacing assumption behind the figures
    pub spacing_note: Option<String>,
    /// Construction type assumption behind the figures
    pub construction_note: Option<String>,
    /// Ordered selling points versus this competitor
    pub additional_benefits: Vec<String>,
}

impl ComparisonEntry {
    /// Per-square-foot difference between the competitor and MAXTERRA
    pub fn savings_per_area(&self) -> f64 {
        self.alternative_cost_per_area - self.own_cost_per_area
    }
}

/// Two-line-item cost of a floor build-up: substrate plus finish layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Substrate (OSB) cost per square foot
    pub substrate: f64,
    /// Wet layer or dry underlayment cost per square foot
    pub finish_layer: f64,
    /// Installation process description
    pub process: String,
}

impl CostBreakdown {
    /// Combined cost per square foot
    pub fn total(&self) -> f64 {
        self.substrate + self.finish_layer
    }
}

/// The fixed wet-installation comparison used for underlayment projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GypcreteBaseline {
    /// OSB + gypcrete
    pub current: CostBreakdown,
    /// OSB + MAXTERRA underlayment
    pub own: CostBreakdown,
    pub additional_benefits: Vec<String>,
}

/// Catalog data errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Comparator identifier must not be empty")]
    EmptyIdentifier,

    #[error("Duplicate comparator identifier '{0}'")]
    DuplicateIdentifier(String),

    #[error("Cost figure for '{identifier}' must be finite and non-negative (got {value})")]
    InvalidCost { identifier: String, value: f64 },

    #[error(
        "Comparator '{identifier}' costs less than MAXTERRA ({alternative} < {own}); entries must demonstrate savings"
    )]
    NegativeSavings {
        identifier: String,
        own: f64,
        alternative: f64,
    },
}

/// Immutable lookup table of comparators plus the gypcrete baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<ComparisonEntry>,
    baseline: GypcreteBaseline,
}

impl Catalog {
    /// Build a catalog, validating every entry and the baseline.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, naming the offending entry.
    pub fn new(
        entries: Vec<ComparisonEntry>,
        baseline: GypcreteBaseline,
    ) -> Result<Self, CatalogError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.identifier.trim().is_empty() {
                return Err(CatalogError::EmptyIdentifier);
            }
            if entries[..index]
                .iter()
                .any(|earlier| earlier.identifier == entry.identifier)
            {
                return Err(CatalogError::DuplicateIdentifier(entry.identifier.clone()));
            }
            for value in [entry.own_cost_per_area, entry.alternative_cost_per_area] {
                check_cost(&entry.identifier, value)?;
            }
            if entry.alternative_cost_per_area < entry.own_cost_per_area {
                return Err(CatalogError::NegativeSavings {
                    identifier: entry.identifier.clone(),
                    own: entry.own_cost_per_area,
                    alternative: entry.alternative_cost_per_area,
                });
            }
        }

        for value in [
            baseline.current.substrate,
            baseline.current.finish_layer,
            baseline.own.substrate,
            baseline.own.finish_layer,
        ] {
            check_cost(BASELINE_LABEL, value)?;
        }
        if baseline.current.total() < baseline.own.total() {
            return Err(CatalogError::NegativeSavings {
                identifier: BASELINE_LABEL.to_string(),
                own: baseline.own.total(),
                alternative: baseline.current.total(),
            });
        }

        Ok(Self { entries, baseline })
    }

    /// The published MAXTERRA comparison data.
    pub fn standard() -> Self {
        Self {
            entries: standard_entries(),
            baseline: standard_baseline(),
        }
    }

    /// Look up a comparator by identifier
    pub fn get(&self, identifier: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    /// All comparators, in declaration order
    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn baseline(&self) -> &GypcreteBaseline {
        &self.baseline
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_cost(identifier: &str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidCost {
            identifier: identifier.to_string(),
            value,
        })
    }
}

fn entry(
    identifier: &str,
    display_name: &str,
    own: f64,
    alternative: f64,
    spacing_note: &str,
    construction_note: Option<&str>,
    benefits: [&str; 3],
) -> ComparisonEntry {
    ComparisonEntry {
        identifier: identifier.to_string(),
        display_name: display_name.to_string(),
        own_cost_per_area: own,
        alternative_cost_per_area: alternative,
        spacing_note: Some(spacing_note.to_string()),
        construction_note: construction_note.map(str::to_string),
        additional_benefits: benefits.iter().map(|b| b.to_string()).collect(),
    }
}

fn standard_entries() -> Vec<ComparisonEntry> {
    vec![
        entry(
            "structocrete",
            "STRUCTO-CRETE",
            4.76,
            7.46,
            "Both products rated for 24\" O.C.",
            None,
            [
                "44-50% material cost savings",
                "No premium pricing without performance benefit",
                "Quartz silica-free formulation",
            ],
        ),
        entry(
            "exacor",
            "EXACOR",
            2.95,
            4.32,
            "MAXTERRA 24\" O.C. vs EXACOR 16\" O.C. (maximum approved spacing)",
            Some("Based on wood open web truss construction"),
            [
                "Works with 24\" O.C. vs 16\" O.C. (50% fewer joists)",
                "Compatible with common wood species (S.G. ≥ 0.42)",
                "Non-combustible E136-22 certification",
            ],
        ),
        entry(
            "megaboard",
            "MEGABOARD",
            3.20,
            4.48,
            "Both products rated for 24\" O.C.",
            None,
            [
                "No complex installation requirements",
                "Works with standard CFS member sizes",
                "No additional strapping requirements",
            ],
        ),
        entry(
            "dragonboard",
            "DragonBoard",
            3.20,
            4.48,
            "MAXTERRA 24\" O.C. vs DragonBoard 19.2\" O.C. (maximum approved spacing)",
            Some("Based on CFS open web truss construction"),
            [
                "ICC-ESR certified vs no certification",
                "Complete diaphragm testing with design equations",
                "Non-combustible E136-22 certification",
            ],
        ),
        entry(
            "nocom",
            "NOCOM",
            1.76,
            2.35,
            "Both products at 24\" O.C.",
            Some("Based on CFS cantilever configuration"),
            [
                "ICC-ESR certified vs no certification",
                "Third-party validated performance",
                "Complete wet performance testing",
            ],
        ),
    ]
}

fn standard_baseline() -> GypcreteBaseline {
    GypcreteBaseline {
        current: CostBreakdown {
            substrate: 0.70,
            finish_layer: 2.875,
            process: "Multi-trade, wet installation".to_string(),
        },
        own: CostBreakdown {
            substrate: 0.70,
            finish_layer: 1.21,
            process: "Single trade, dry installation".to_string(),
        },
        additional_benefits: vec![
            "Eliminates 7+ day curing time".to_string(),
            "Single trade installation vs multi-trade".to_string(),
            "No moisture introduced into building".to_string(),
            "Meets code requirements without sound mats".to_string(),
        ],
    }
}
