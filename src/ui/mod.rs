//! User interface rendering module
//!
//! Organized into submodules:
//! - `header` - Banner, step progress, status line, navigation bar
//! - `screens` - One screen per wizard step

mod header;
pub mod screens;

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::wizard::WizardStep;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub use header::HeaderRenderer;

/// UI renderer for the application
///
/// Main entry point for rendering; delegates each step to `screens`.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Banner + progress
                Constraint::Min(8),    // Step content
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        let step = state.wizard.step();
        self.header.render_header(f, chunks[0], step.kind());

        match step {
            WizardStep::CategorySelection => screens::render_category_screen(f, chunks[1], state),
            WizardStep::ProjectDetails => screens::render_details_screen(f, chunks[1], state),
            WizardStep::ResultsSummary { .. } => {
                screens::render_results_screen(f, chunks[1], state)
            }
            WizardStep::FullReport { .. } => {
                screens::render_full_report_screen(f, chunks[1], state)
            }
            WizardStep::Submitted { redirect } => {
                screens::render_submitted_screen(f, chunks[1], redirect)
            }
        }

        header::render_status_line(f, state, chunks[2]);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[3]);

        // Help overlay goes on top of everything
        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{BuildingType, ProjectCategory};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        let renderer = UiRenderer::new();
        let ctx = KeybindingContext::new();
        terminal.draw(|f| renderer.render(f, state, &ctx)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> AppState {
        AppState::new(Arc::new(Catalog::standard()))
    }

    #[test]
    fn test_category_screen_lists_both_options() {
        let text = screen_text(&state());
        assert!(text.contains("Wet Gypsum Underlayment"));
        assert!(text.contains("Entire Subfloor System"));
        assert!(text.contains("Step 1 of 5"));
    }

    #[test]
    fn test_results_screen_shows_headline() {
        let mut state = state();
        state.wizard.select_category(ProjectCategory::FullSubfloor).unwrap();
        state.wizard.continue_to_details().unwrap();
        state.wizard.set_building_type(Some(BuildingType::Hotel)).unwrap();
        state.wizard.set_comparison_target(Some("exacor".into())).unwrap();
        state.wizard.calculate().unwrap();

        let text = screen_text(&state);
        assert!(text.contains("$13,700"));
        assert!(text.contains("32% savings vs EXACOR"));
        assert!(text.contains("Based on wood open web truss construction"));
    }

    #[test]
    fn test_help_overlay_renders_on_top() {
        let mut state = state();
        state.help_visible = true;
        let text = screen_text(&state);
        assert!(text.contains("F1 or Esc to close"));
    }
}
