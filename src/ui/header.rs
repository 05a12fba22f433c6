//! Header and common widget rendering
//!
//! Title banner, step progress, status line and navigation bar.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles};
use crate::wizard::{StepKind, WizardStep};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header renderer for the title banner
pub struct HeaderRenderer {
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            header_lines: vec![
                Line::from(vec![
                    Span::styled("MAXTERRA", Styles::title()),
                    Span::styled(" Savings Calculator", Styles::text_bold()),
                ]),
                Line::from(Span::styled(
                    "MgO subfloor and underlayment cost comparison",
                    Styles::text_muted(),
                )),
            ],
        }
    }

    /// Render the banner with the step progress beneath it
    pub fn render_header(&self, f: &mut Frame, area: Rect, step: StepKind) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut lines = self.header_lines.clone();
        lines.push(progress_line(step));

        let header = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Styles::border_inactive()),
            )
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }
}

/// "● ● ○ ○ ○  Step 2 of 5: Project Details"
fn progress_line(step: StepKind) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = StepKind::ALL
        .iter()
        .map(|s| {
            if s.step_number() <= step.step_number() {
                Span::styled("● ", Styles::focused())
            } else {
                Span::styled("○ ", Styles::text_muted())
            }
        })
        .collect();
    spans.push(Span::styled(
        format!(
            " Step {} of {}: {}",
            step.step_number(),
            WizardStep::TOTAL_STEPS,
            step.title()
        ),
        Styles::text_secondary(),
    ));
    Line::from(spans)
}

/// Render the status line: wizard notices in the error style, progress messages muted
pub fn render_status_line(f: &mut Frame, state: &AppState, area: Rect) {
    let (text, is_notice) = state.status_line();
    let style = if is_notice {
        Styles::error()
    } else if state.wizard.step().is_pending() {
        Styles::warning()
    } else {
        Styles::info()
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", text), style)),
        area,
    );
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext, area: Rect) {
    let items = keybinding_ctx.get_nav_items(state.wizard.step().kind());
    let mut spans = Vec::with_capacity(items.len() * 2);
    for item in items {
        spans.push(Span::styled(
            format!(" {} ", item.key_display),
            Styles::button_active(),
        ));
        spans.push(Span::styled(
            format!(" {}  ", item.action_label),
            Styles::nav_hint(),
        ));
    }
    let bar = Paragraph::new(Line::from(spans)).style(ratatui::style::Style::default().bg(Colors::BG_PRIMARY));
    f.render_widget(bar, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(state.wizard.step().kind(), keybinding_ctx);
    help_overlay.render(f, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_marks_completed_steps() {
        let line = progress_line(StepKind::ProjectDetails);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("● ● ○ ○ ○"));
        assert!(text.ends_with("Step 2 of 5: Project Details"));
    }
}
