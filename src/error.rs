//! Error handling module for the savings calculator
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Module-level error enums (catalog, wizard, dispatch) convert into
//! [`SavingsError`] so callers can use a single `Result` alias.

use crate::catalog::CatalogError;
use crate::dispatch::DispatchError;
use crate::wizard::WizardError;
use thiserror::Error;

/// Main error type for the savings calculator
#[derive(Error, Debug)]
pub enum SavingsError {
    /// A required selection is missing or does not resolve against the catalog
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A wizard action was refused
    #[error("{0}")]
    Wizard(#[from] WizardError),

    /// The report dispatcher call failed
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// Catalog data violates its invariants
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, SavingsError>;

impl SavingsError {
    /// Create an invalid selection error
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
