//! MAXTERRA Savings Calculator Library
//!
//! Core of the terminal savings calculator: the comparison catalog, the
//! savings engine, the wizard state machine and report dispatch, plus the
//! ratatui front end that drives them.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod format;
pub mod input;
pub mod report;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, ComparisonEntry, CostBreakdown, GypcreteBaseline};
pub use config::AppConfig;
pub use dispatch::{
    Acknowledgement, DispatchError, HttpDispatcher, ReportDispatcher, ReportRecord, redirect_url,
};
pub use engine::{ProjectSelection, SavingsFigures, SavingsResult, compute_savings};
pub use error::{Result, SavingsError};
pub use types::{BuildingType, ProjectCategory};
pub use wizard::{ContactRecord, StepKind, Wizard, WizardError, WizardStep};
