//! Application state definitions
//!
//! `AppState` wraps the [`Wizard`] with the screen-level state it does not
//! own: list cursors, which field has focus, and the raw text of fields
//! before it is parsed.

use crate::catalog::Catalog;
use crate::input::{FieldKind, TextField, cycle_option, parse_area};
use crate::types::{BuildingType, ProjectCategory};
use crate::wizard::Wizard;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Focusable fields on the project details step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsField {
    AreaSize,
    BuildingType,
    Comparator,
}

impl DetailsField {
    /// Fields shown for a category, in focus order
    pub fn for_category(category: Option<ProjectCategory>) -> &'static [DetailsField] {
        match category {
            Some(ProjectCategory::FullSubfloor) => {
                &[Self::AreaSize, Self::BuildingType, Self::Comparator]
            }
            _ => &[Self::AreaSize, Self::BuildingType],
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AreaSize => "Project Size (sq ft)",
            Self::BuildingType => "Building Type",
            Self::Comparator => "Current Subfloor Product",
        }
    }
}

/// Focusable contact fields on the results step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::FirstName, Self::LastName, Self::Email];

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub wizard: Wizard,
    /// Highlighted row on the category list
    pub category_cursor: usize,
    pub details_focus: DetailsField,
    pub area_input: TextField,
    pub contact_focus: ContactField,
    pub first_name_input: TextField,
    pub last_name_input: TextField,
    pub email_input: TextField,
    /// Informational status line, shown when the wizard has no notice
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let wizard = Wizard::new(catalog);
        let area_text = wizard
            .selection()
            .area_size
            .map(|a| a.to_string())
            .unwrap_or_default();

        Self {
            wizard,
            category_cursor: 0,
            details_focus: DetailsField::AreaSize,
            area_input: TextField::new(FieldKind::Numeric, "10000").with_value(area_text),
            contact_focus: ContactField::FirstName,
            first_name_input: TextField::new(FieldKind::Text, "YourFirstName"),
            last_name_input: TextField::new(FieldKind::Text, "YourLastName"),
            email_input: TextField::new(FieldKind::Text, "you@example.com"),
            status_message: "Choose what you are looking to replace".to_string(),
            help_visible: false,
        }
    }

    /// Categories in menu order
    pub fn categories() -> Vec<ProjectCategory> {
        ProjectCategory::iter().collect()
    }

    /// Category under the cursor
    pub fn highlighted_category(&self) -> Option<ProjectCategory> {
        Self::categories().get(self.category_cursor).copied()
    }

    pub fn move_category_cursor(&mut self, down: bool) {
        let len = Self::categories().len();
        if len == 0 {
            return;
        }
        self.category_cursor = if down {
            (self.category_cursor + 1) % len
        } else {
            (self.category_cursor + len - 1) % len
        };
    }

    /// Fields visible on the details step for the chosen category
    pub fn details_fields(&self) -> &'static [DetailsField] {
        DetailsField::for_category(self.wizard.selection().category)
    }

    pub fn move_details_focus(&mut self, forward: bool) {
        let fields = self.details_fields();
        self.details_focus = cycle_option(fields, Some(&self.details_focus), forward)
            .unwrap_or(DetailsField::AreaSize);
    }

    pub fn move_contact_focus(&mut self, forward: bool) {
        self.contact_focus = cycle_option(&ContactField::ALL, Some(&self.contact_focus), forward)
            .unwrap_or(ContactField::FirstName);
    }

    /// Text field with keyboard focus on the current step, if any
    pub fn focused_text_field(&mut self) -> Option<&mut TextField> {
        use crate::wizard::StepKind;
        match self.wizard.step().kind() {
            StepKind::ProjectDetails if self.details_focus == DetailsField::AreaSize => {
                Some(&mut self.area_input)
            }
            StepKind::ResultsSummary if !self.wizard.step().is_pending() => {
                Some(match self.contact_focus {
                    ContactField::FirstName => &mut self.first_name_input,
                    ContactField::LastName => &mut self.last_name_input,
                    ContactField::Email => &mut self.email_input,
                })
            }
            _ => None,
        }
    }

    /// Push edited field text into the wizard.
    pub fn sync_fields(&mut self) {
        use crate::wizard::StepKind;
        match self.wizard.step().kind() {
            StepKind::ProjectDetails => {
                let area = parse_area(&self.area_input.value);
                // Only fails off the editable steps, which this arm excludes
                let _ = self.wizard.set_area_size(area);
            }
            StepKind::ResultsSummary => {
                let contact = self.wizard.contact_mut();
                contact.first_name = self.first_name_input.value.clone();
                contact.last_name = self.last_name_input.value.clone();
                contact.email = self.email_input.value.clone();
            }
            _ => {}
        }
    }

    /// Cycle the focused list-valued field on the details step.
    pub fn cycle_details_option(&mut self, forward: bool) {
        match self.details_focus {
            DetailsField::AreaSize => {}
            DetailsField::BuildingType => {
                let options: Vec<BuildingType> = BuildingType::iter().collect();
                let current = self.wizard.selection().building_type;
                let next = cycle_option(&options, current.as_ref(), forward);
                let _ = self.wizard.set_building_type(next);
            }
            DetailsField::Comparator => {
                let options: Vec<String> = self
                    .wizard
                    .catalog()
                    .entries()
                    .iter()
                    .map(|e| e.identifier.clone())
                    .collect();
                let current = self.wizard.selection().comparison_target.clone();
                let next = cycle_option(&options, current.as_ref(), forward);
                let _ = self.wizard.set_comparison_target(next);
            }
        }
    }

    /// Line for the status bar: the wizard's notice wins over the status message
    pub fn status_line(&self) -> (&str, bool) {
        match self.wizard.notice() {
            Some(notice) => (notice, true),
            None => (&self.status_message, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::StepKind;

    fn state() -> AppState {
        AppState::new(Arc::new(Catalog::standard()))
    }

    #[test]
    fn test_area_field_starts_with_default() {
        let state = state();
        assert_eq!(state.area_input.value, "10000");
        assert_eq!(state.highlighted_category(), Some(ProjectCategory::WetUnderlayment));
    }

    #[test]
    fn test_category_cursor_wraps() {
        let mut state = state();
        state.move_category_cursor(false);
        assert_eq!(state.highlighted_category(), Some(ProjectCategory::FullSubfloor));
        state.move_category_cursor(true);
        assert_eq!(state.category_cursor, 0);
    }

    #[test]
    fn test_comparator_field_only_for_subfloor() {
        let mut state = state();
        assert_eq!(state.details_fields().len(), 2);
        state.wizard.select_category(ProjectCategory::FullSubfloor).unwrap();
        assert_eq!(state.details_fields().last(), Some(&DetailsField::Comparator));
    }

    #[test]
    fn test_cycle_comparator_walks_catalog() {
        let mut state = state();
        state.wizard.select_category(ProjectCategory::FullSubfloor).unwrap();
        state.wizard.continue_to_details().unwrap();
        state.details_focus = DetailsField::Comparator;

        state.cycle_details_option(true);
        assert_eq!(state.wizard.selection().comparison_target.as_deref(), Some("structocrete"));
        state.cycle_details_option(false);
        assert_eq!(state.wizard.selection().comparison_target.as_deref(), Some("nocom"));
    }

    #[test]
    fn test_sync_area_on_details() {
        let mut state = state();
        state.wizard.select_category(ProjectCategory::WetUnderlayment).unwrap();
        state.wizard.continue_to_details().unwrap();
        assert_eq!(state.wizard.step().kind(), StepKind::ProjectDetails);

        state.area_input.value = "2,500".into();
        state.sync_fields();
        assert_eq!(state.wizard.selection().area_size, Some(2500.0));

        state.area_input.value.clear();
        state.sync_fields();
        assert_eq!(state.wizard.selection().area_size, None);
    }
}
