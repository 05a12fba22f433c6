//! Wizard state machine
//!
//! The calculator is a linear five-step wizard. The current step is an
//! explicit enum, and the steps that display a calculation own it, so a
//! results screen without a result cannot be represented.
//!
//! # Step Flow
//!
//! ```text
//! CategorySelection
//!     ↓ (category chosen)
//! ProjectDetails
//!     ↓ calculate (required fields filled, engine succeeds)
//! ResultsSummary ──(email entered)──→ FullReport
//!     ↓ submit (contact complete) → pending → dispatch outcome
//! Submitted
//! ```
//!
//! Back navigation is allowed everywhere except from `CategorySelection`,
//! from `Submitted`, and while a submission is pending.
//!
//! # Invariants
//!
//! - The engine runs exactly once per successful `calculate`
//! - A stored result is never mutated; recalculating replaces it
//! - At most one dispatch is in flight per session
//! - A failed dispatch keeps the contact fields and clears the pending flag

use crate::catalog::Catalog;
use crate::dispatch::{Acknowledgement, DispatchError, ReportRecord, redirect_url};
use crate::engine::{ProjectSelection, SavingsResult, compute_savings};
use crate::types::{BuildingType, ProjectCategory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Contact details captured on the results screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ContactRecord {
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Names of blank fields, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Current wizard step. Steps that show a calculation carry it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WizardStep {
    /// Choose what to replace.
    #[default]
    CategorySelection,
    /// Project size, building type and (for subfloors) the current product.
    ProjectDetails,
    /// Headline savings plus the contact form.
    ResultsSummary {
        result: SavingsResult,
        /// A dispatch is in flight; submission and back navigation are disabled
        pending: bool,
    },
    /// Extended benefit detail for the same result.
    FullReport { result: SavingsResult },
    /// Report delivered; control leaves for the follow-up form.
    Submitted { redirect: Url },
}

/// Fieldless mirror of [`WizardStep`] for lookups and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    CategorySelection,
    ProjectDetails,
    ResultsSummary,
    FullReport,
    Submitted,
}

impl StepKind {
    /// All steps in wizard order
    pub const ALL: [StepKind; 5] = [
        Self::CategorySelection,
        Self::ProjectDetails,
        Self::ResultsSummary,
        Self::FullReport,
        Self::Submitted,
    ];

    /// Display title for this step
    pub const fn title(self) -> &'static str {
        match self {
            Self::CategorySelection => "What are you looking to replace?",
            Self::ProjectDetails => "Project Details",
            Self::ResultsSummary => "Your Potential Savings",
            Self::FullReport => "Complete Savings Analysis",
            Self::Submitted => "Report Sent",
        }
    }

    /// Step number (1-indexed for display)
    pub const fn step_number(self) -> usize {
        match self {
            Self::CategorySelection => 1,
            Self::ProjectDetails => 2,
            Self::ResultsSummary => 3,
            Self::FullReport => 4,
            Self::Submitted => 5,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 5;

    pub fn kind(&self) -> StepKind {
        match self {
            Self::CategorySelection => StepKind::CategorySelection,
            Self::ProjectDetails => StepKind::ProjectDetails,
            Self::ResultsSummary { .. } => StepKind::ResultsSummary,
            Self::FullReport { .. } => StepKind::FullReport,
            Self::Submitted { .. } => StepKind::Submitted,
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind().title()
    }

    pub fn step_number(&self) -> usize {
        self.kind().step_number()
    }

    /// The stored calculation, if this step carries one
    pub fn result(&self) -> Option<&SavingsResult> {
        match self {
            Self::ResultsSummary { result, .. } | Self::FullReport { result } => Some(result),
            _ => None,
        }
    }

    /// Whether a dispatch is in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::ResultsSummary { pending: true, .. })
    }

    /// Check if the current step allows going back.
    pub fn can_go_back(&self) -> bool {
        match self {
            Self::CategorySelection | Self::Submitted { .. } => false,
            Self::ResultsSummary { pending, .. } => !pending,
            Self::ProjectDetails | Self::FullReport { .. } => true,
        }
    }
}

/// Reasons a wizard action is refused. The wizard stays where it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Choose a project type to continue")]
    NoCategory,

    #[error("Please complete: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Cannot calculate savings: {0}")]
    InvalidSelection(String),

    #[error("Enter your email to view the full report")]
    EmailRequired,

    #[error("Please enter your {}", .0.join(", "))]
    IncompleteContact(Vec<&'static str>),

    #[error("Your report is already being sent")]
    AlreadySubmitting,

    #[error("No report submission is in progress")]
    NotPending,

    #[error("{0}")]
    DispatchFailure(String),

    #[error("Cannot {action} from {step}")]
    WrongStep { action: &'static str, step: StepKind },
}

/// Session state: the current step, selections and contact details.
#[derive(Debug, Clone)]
pub struct Wizard {
    catalog: Arc<Catalog>,
    step: WizardStep,
    selection: ProjectSelection,
    contact: ContactRecord,
    /// Last refusal or failure, shown until the next successful transition
    notice: Option<String>,
}

impl Wizard {
    /// Start a session at `CategorySelection` with default selections.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            step: WizardStep::default(),
            selection: ProjectSelection::default(),
            contact: ContactRecord::default(),
            notice: None,
        }
    }

    #[inline]
    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    #[inline]
    pub fn selection(&self) -> &ProjectSelection {
        &self.selection
    }

    #[inline]
    pub fn contact(&self) -> &ContactRecord {
        &self.contact
    }

    /// Contact fields are free text; they are only checked on submission.
    pub fn contact_mut(&mut self) -> &mut ContactRecord {
        &mut self.contact
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    // ------------------------------------------------------------------
    // Selection editing
    // ------------------------------------------------------------------

    /// Choose the project category. Only on the first step.
    pub fn select_category(&mut self, category: ProjectCategory) -> Result<(), WizardError> {
        self.ensure_step(StepKind::CategorySelection, "choose a project type")?;
        self.selection.category = Some(category);
        debug!("project category set to {}", category);
        Ok(())
    }

    pub fn set_area_size(&mut self, area: Option<f64>) -> Result<(), WizardError> {
        self.ensure_editable("change the project size")?;
        self.selection.area_size = area;
        Ok(())
    }

    pub fn set_building_type(&mut self, building: Option<BuildingType>) -> Result<(), WizardError> {
        self.ensure_editable("change the building type")?;
        self.selection.building_type = building;
        Ok(())
    }

    pub fn set_comparison_target(&mut self, identifier: Option<String>) -> Result<(), WizardError> {
        self.ensure_editable("change the subfloor product")?;
        self.selection.comparison_target = identifier;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// `CategorySelection` → `ProjectDetails`.
    pub fn continue_to_details(&mut self) -> Result<(), WizardError> {
        self.ensure_step(StepKind::CategorySelection, "continue")?;
        if self.selection.category.is_none() {
            return self.refuse(WizardError::NoCategory);
        }
        self.enter(WizardStep::ProjectDetails);
        Ok(())
    }

    /// Whether `calculate` would pass its presence checks
    pub fn can_calculate(&self) -> bool {
        self.step.kind() == StepKind::ProjectDetails && self.selection.missing_fields().is_empty()
    }

    /// `ProjectDetails` → `ResultsSummary`, running the engine once.
    ///
    /// # Errors
    ///
    /// - `MissingFields` if a required field for the category is blank
    /// - `InvalidSelection` if the engine rejects the selection
    ///
    /// The new result is available through [`WizardStep::result`].
    pub fn calculate(&mut self) -> Result<(), WizardError> {
        self.ensure_step(StepKind::ProjectDetails, "calculate savings")?;

        let missing = self.selection.missing_fields();
        if !missing.is_empty() {
            return self.refuse(WizardError::MissingFields(missing));
        }

        let result = match compute_savings(&self.selection, &self.catalog) {
            Ok(result) => result,
            Err(e) => {
                warn!("calculation refused: {}", e);
                return self.refuse(WizardError::InvalidSelection(e.to_string()));
            }
        };

        info!(
            comparison = result.comparison_name(),
            savings = result.figures().total_savings,
            "savings calculated"
        );
        self.enter(WizardStep::ResultsSummary {
            result,
            pending: false,
        });
        Ok(())
    }

    /// `ResultsSummary` → `FullReport`. Needs only an email.
    pub fn view_full_report(&mut self) -> Result<(), WizardError> {
        if self.step.is_pending() {
            return self.refuse(WizardError::AlreadySubmitting);
        }
        self.ensure_step(StepKind::ResultsSummary, "view the full report")?;
        if !self.contact.has_email() {
            return self.refuse(WizardError::EmailRequired);
        }
        if let WizardStep::ResultsSummary { result, .. } = std::mem::take(&mut self.step) {
            self.enter(WizardStep::FullReport { result });
        }
        Ok(())
    }

    /// Go back one step.
    ///
    /// Leaving `ResultsSummary` drops the stored result; leaving
    /// `FullReport` keeps it. Selections are never cleared.
    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.step.is_pending() {
            return self.refuse(WizardError::AlreadySubmitting);
        }
        let previous = match std::mem::take(&mut self.step) {
            WizardStep::ProjectDetails => WizardStep::CategorySelection,
            WizardStep::ResultsSummary { .. } => WizardStep::ProjectDetails,
            WizardStep::FullReport { result } => WizardStep::ResultsSummary {
                result,
                pending: false,
            },
            current @ (WizardStep::CategorySelection | WizardStep::Submitted { .. }) => {
                let step = current.kind();
                self.step = current;
                return self.refuse(WizardError::WrongStep {
                    action: "go back",
                    step,
                });
            }
        };
        self.enter(previous);
        Ok(())
    }

    /// Start a submission: validate the contact, enter the pending
    /// sub-state and return the record to dispatch.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitting` while a previous dispatch is in flight
    /// - `IncompleteContact` if any contact field is blank
    pub fn begin_submission(&mut self) -> Result<ReportRecord, WizardError> {
        if self.step.is_pending() {
            return self.refuse(WizardError::AlreadySubmitting);
        }
        self.ensure_step(StepKind::ResultsSummary, "submit")?;

        let missing = self.contact.missing_fields();
        if !missing.is_empty() {
            return self.refuse(WizardError::IncompleteContact(missing));
        }

        let record = match &mut self.step {
            WizardStep::ResultsSummary { result, pending } => {
                *pending = true;
                ReportRecord::new(&self.contact, self.selection.building_type, result)
            }
            _ => return self.refuse(WizardError::NotPending),
        };
        self.notice = None;
        info!(email = %record.email, "submission started");
        Ok(record)
    }

    /// Resolve the in-flight submission.
    ///
    /// On success the wizard enters `Submitted` and returns the follow-up
    /// URL. On failure it leaves the pending sub-state, keeps the contact
    /// fields and records a notice.
    pub fn finish_submission(
        &mut self,
        outcome: Result<Acknowledgement, DispatchError>,
        redirect_base: &Url,
    ) -> Result<Url, WizardError> {
        if !self.step.is_pending() {
            return self.refuse(WizardError::NotPending);
        }

        match outcome {
            Ok(_) => {
                let redirect = redirect_url(redirect_base, &self.contact);
                info!(%redirect, "report dispatched");
                self.enter(WizardStep::Submitted {
                    redirect: redirect.clone(),
                });
                Ok(redirect)
            }
            Err(e) => {
                warn!("report dispatch failed: {}", e);
                if let WizardStep::ResultsSummary { pending, .. } = &mut self.step {
                    *pending = false;
                }
                self.refuse(WizardError::DispatchFailure(e.user_message()))
            }
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn enter(&mut self, step: WizardStep) {
        debug!("wizard: {} -> {}", self.step.kind(), step.kind());
        self.step = step;
        self.notice = None;
    }

    fn refuse<T>(&mut self, err: WizardError) -> Result<T, WizardError> {
        self.notice = Some(err.to_string());
        Err(err)
    }

    fn ensure_step(&mut self, expected: StepKind, action: &'static str) -> Result<(), WizardError> {
        let step = self.step.kind();
        if step == expected {
            Ok(())
        } else {
            self.refuse(WizardError::WrongStep { action, step })
        }
    }

    fn ensure_editable(&mut self, action: &'static str) -> Result<(), WizardError> {
        match self.step.kind() {
            StepKind::CategorySelection | StepKind::ProjectDetails => Ok(()),
            step => self.refuse(WizardError::WrongStep { action, step }),
        }
    }
}
