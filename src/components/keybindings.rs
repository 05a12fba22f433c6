//! Keybinding system for step-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the current wizard
//! step. Steps with text fields leave printable characters to the field, so
//! single-letter shortcuts are only registered where nothing is typed.

use crate::wizard::StepKind;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    NextField,
    PreviousOption,
    NextOption,
    Select,
    Back,
    FullReport,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self::with_modifiers(key, KeyModifiers::NONE, action, display, description)
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        // Terminals report '?' with or without SHIFT
        self.key == key
            && (self.modifiers == modifiers
                || (self.modifiers.is_empty() && modifiers == KeyModifiers::SHIFT))
    }
}

/// Step-aware keybinding registry
pub struct KeybindingContext {
    step_bindings: HashMap<StepKind, Vec<Keybinding>>,
    /// Available on every step
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            step_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.step_bindings.insert(
            StepKind::CategorySelection,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous option"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next option"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose and continue"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        self.step_bindings.insert(
            StepKind::ProjectDetails,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::Left, KeyAction::PreviousOption, "Left", "Previous choice"),
                Keybinding::new(KeyCode::Right, KeyAction::NextOption, "Right", "Next choice"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Calculate savings"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            ],
        );

        self.step_bindings.insert(
            StepKind::ResultsSummary,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Submit report"),
                Keybinding::new(KeyCode::F(2), KeyAction::FullReport, "F2", "Full report"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            ],
        );

        self.step_bindings.insert(
            StepKind::FullReport,
            vec![
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to summary"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back to summary"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        self.step_bindings.insert(
            StepKind::Submitted,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Quit, "Enter", "Finish"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );
    }

    /// Get keybindings for a step (includes global bindings)
    pub fn get_bindings(&self, step: StepKind) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(step_bindings) = self.step_bindings.get(&step) {
            bindings.extend(step_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key press to an action on the given step
    pub fn action_for(&self, step: StepKind, key: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        self.get_bindings(step)
            .into_iter()
            .find(|b| b.matches(key, modifiers))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, step: StepKind) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(step);

        let priority_actions: &[KeyAction] = match step {
            StepKind::CategorySelection => &[
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            StepKind::ProjectDetails => &[
                KeyAction::NavigateUp,
                KeyAction::PreviousOption,
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Help,
            ],
            StepKind::ResultsSummary => &[
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::FullReport,
                KeyAction::Back,
                KeyAction::Help,
            ],
            StepKind::FullReport => &[KeyAction::Back, KeyAction::Help, KeyAction::Quit],
            StepKind::Submitted => &[KeyAction::Quit],
        };

        let mut items = Vec::new();
        for action in priority_actions {
            match action {
                // Up/Down and Left/Right collapse into one item each
                KeyAction::NavigateUp => items.push(NavBarItem::new("Up/Dn", "Move")),
                KeyAction::PreviousOption => items.push(NavBarItem::new("Lt/Rt", "Change")),
                _ => {
                    if let Some(binding) = bindings.iter().find(|b| b.action == *action) {
                        items.push(NavBarItem::new(&binding.display, &binding.description));
                    }
                }
            }
        }
        items
    }

    /// Get full help content for a step (for the help overlay)
    pub fn get_help_content(&self, step: StepKind) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::NextField
                        | KeyAction::PreviousOption
                        | KeyAction::NextOption
                )
            }),
            ("Actions", |a| matches!(a, KeyAction::Select | KeyAction::FullReport)),
            ("General", |a| {
                matches!(a, KeyAction::Back | KeyAction::Help | KeyAction::Quit)
            }),
        ];

        let bindings = self.get_bindings(step);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key_display: &str, action_label: &str) -> Self {
        Self {
            key_display: key_display.to_string(),
            action_label: action_label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_free_on_text_steps() {
        let ctx = KeybindingContext::new();
        for step in [StepKind::ProjectDetails, StepKind::ResultsSummary] {
            assert_eq!(ctx.action_for(step, KeyCode::Char('q'), KeyModifiers::NONE), None);
            assert_eq!(ctx.action_for(step, KeyCode::Char('?'), KeyModifiers::SHIFT), None);
        }
        assert_eq!(
            ctx.action_for(StepKind::CategorySelection, KeyCode::Char('q'), KeyModifiers::NONE),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_global_bindings_everywhere() {
        let ctx = KeybindingContext::new();
        for step in StepKind::ALL {
            assert_eq!(
                ctx.action_for(step, KeyCode::Char('c'), KeyModifiers::CONTROL),
                Some(KeyAction::Quit)
            );
            assert_eq!(
                ctx.action_for(step, KeyCode::F(1), KeyModifiers::NONE),
                Some(KeyAction::Help)
            );
        }
    }

    #[test]
    fn test_shifted_question_mark_opens_help() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.action_for(StepKind::FullReport, KeyCode::Char('?'), KeyModifiers::SHIFT),
            Some(KeyAction::Help)
        );
    }

    #[test]
    fn test_nav_items_and_help_sections() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(StepKind::ResultsSummary);
        assert!(items.iter().any(|i| i.key_display == "F2"));

        let sections = ctx.get_help_content(StepKind::ProjectDetails);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Actions", "General"]);
    }
}
