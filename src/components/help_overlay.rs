//! Help overlay component
//!
//! Displays step-sensitive help in a centered floating panel.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::theme::{Colors, Styles};
use crate::wizard::StepKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const WIDTH_PERCENT: u16 = 60;
const HEIGHT_PERCENT: u16 = 70;
const MIN_WIDTH: u16 = 44;
const MIN_HEIGHT: u16 = 14;

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given step
    pub fn new(step: StepKind, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(step);
        Self {
            content: Self::build_content(&sections, step),
        }
    }

    fn build_content(sections: &[HelpSection], step: StepKind) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled("  MAXTERRA Savings Calculator  ", Styles::title())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Current: ", Styles::text_muted()),
                Span::styled(
                    format!("Step {} - {}", step.step_number(), step.title()),
                    Style::default().fg(Colors::SECONDARY),
                ),
            ]),
            Line::from(""),
        ];

        for section in sections {
            lines.push(Line::from(Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::focused()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        if matches!(step, StepKind::ProjectDetails | StepKind::ResultsSummary) {
            lines.push(Line::from(Span::styled(
                "Typing edits the highlighted field.",
                Styles::text_secondary(),
            )));
        }
        lines
    }

    /// Number of content lines, for sizing tests
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, WIDTH_PERCENT, HEIGHT_PERCENT);
        let block = Block::default()
            .title(" Help ")
            .title_bottom(Line::from(" F1 or Esc to close ").alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Style::default().bg(Colors::BG_PRIMARY));

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(self.content.clone())
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}

/// Percent-sized rectangle centered in `parent`, never smaller than the minimum panel
pub fn centered_rect(parent: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (parent.width * width_percent / 100)
        .max(MIN_WIDTH)
        .min(parent.width);
    let height = (parent.height * height_percent / 100)
        .max(MIN_HEIGHT)
        .min(parent.height);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(parent);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let area = centered_rect(parent, 60, 70);
        assert_eq!((area.width, area.height), (60, 28));
        assert_eq!((area.x, area.y), (20, 6));
    }

    #[test]
    fn test_centered_rect_clamps_to_small_terminals() {
        let parent = Rect::new(0, 0, 30, 10);
        let area = centered_rect(parent, 60, 70);
        assert_eq!((area.width, area.height), (30, 10));
    }

    #[test]
    fn test_text_steps_mention_field_editing() {
        let ctx = KeybindingContext::new();
        let details = HelpOverlay::new(StepKind::ProjectDetails, &ctx);
        let submitted = HelpOverlay::new(StepKind::Submitted, &ctx);
        assert!(details.line_count() > submitted.line_count());
    }
}
