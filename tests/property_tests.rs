//! Property-Based Tests for the savings engine
//!
//! These tests verify:
//! - Rounded totals always reconcile with the reported savings
//! - The percentage stays within 0..=100
//! - Totals scale with the project size
//! - Sizes beyond the limit are rejected

use maxterra_savings::catalog::Catalog;
use maxterra_savings::engine::{MAX_AREA_SIZE, ProjectSelection, compute_savings};
use maxterra_savings::types::{BuildingType, ProjectCategory};
use proptest::prelude::*;

/// Strategy for a valid selection of either category
fn selection_strategy() -> impl Strategy<Value = ProjectSelection> {
    let comparators = Catalog::standard()
        .entries()
        .iter()
        .map(|e| e.identifier.clone())
        .collect::<Vec<_>>();

    prop_oneof![
        (1.0f64..MAX_AREA_SIZE / 10.0)
            .prop_map(|area| ProjectSelection::new(ProjectCategory::WetUnderlayment, area)),
        (1.0f64..MAX_AREA_SIZE / 10.0, prop::sample::select(comparators)).prop_map(|(area, id)| {
            ProjectSelection::new(ProjectCategory::FullSubfloor, area)
                .with_building_type(BuildingType::Other)
                .with_comparator(id)
        }),
    ]
}

proptest! {
    /// baseline_total_cost - own_total_cost == total_savings
    #[test]
    fn savings_reconcile_with_totals(selection in selection_strategy()) {
        let result = compute_savings(&selection, &Catalog::standard()).unwrap();
        let f = result.figures();
        prop_assert!(f.baseline_total_cost >= f.own_total_cost);
        prop_assert_eq!(f.baseline_total_cost - f.own_total_cost, f.total_savings);
    }

    /// Percent savings is a whole percentage in range
    #[test]
    fn percent_is_in_range(selection in selection_strategy()) {
        let result = compute_savings(&selection, &Catalog::standard()).unwrap();
        prop_assert!(result.figures().percent_savings <= 100);
    }

    /// Per-area figures do not depend on project size
    #[test]
    fn per_area_figures_ignore_size(selection in selection_strategy(), factor in 2.0f64..10.0) {
        let catalog = Catalog::standard();
        let small = compute_savings(&selection, &catalog).unwrap();
        let mut larger = selection.clone();
        larger.area_size = larger.area_size.map(|a| a * factor);
        let large = compute_savings(&larger, &catalog).unwrap();

        prop_assert_eq!(small.figures().own_cost_per_area, large.figures().own_cost_per_area);
        prop_assert_eq!(small.figures().percent_savings, large.figures().percent_savings);
        prop_assert!(large.figures().baseline_total_cost >= small.figures().baseline_total_cost);
    }

    /// Sizes above the limit are refused instead of saturating the totals
    #[test]
    fn oversized_area_rejected(area in MAX_AREA_SIZE * 1.0001..1.0e300) {
        let selection = ProjectSelection::new(ProjectCategory::FullSubfloor, area)
            .with_building_type(BuildingType::Other)
            .with_comparator("exacor");
        prop_assert!(compute_savings(&selection, &Catalog::standard()).is_err());
    }

    /// Non-positive sizes never produce a result
    #[test]
    fn non_positive_area_rejected(area in -1_000_000.0f64..=0.0) {
        let selection = ProjectSelection::new(ProjectCategory::WetUnderlayment, area);
        prop_assert!(compute_savings(&selection, &Catalog::standard()).is_err());
    }
}
