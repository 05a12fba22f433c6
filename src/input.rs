//! Form field editing
//!
//! The wizard edits its fields in place instead of through modal dialogs:
//! a focused [`TextField`] receives printable characters and Backspace, and
//! list-valued fields cycle through their options with [`cycle_option`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a text field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any printable character
    Text,
    /// Digits, one decimal point and thousands separators
    Numeric,
}

/// Result of offering a key to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// The field consumed the key and its value changed
    Changed,
    /// The field consumed the key without changing
    Ignored,
    /// Not an editing key; the caller should handle it
    Unhandled,
}

/// Single-line editable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub placeholder: &'static str,
    kind: FieldKind,
    max_len: usize,
}

impl TextField {
    pub fn new(kind: FieldKind, placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            placeholder,
            kind,
            max_len: 120,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Handle keyboard input for the field
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        if key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return InputResult::Unhandled;
        }

        match key_event.code {
            KeyCode::Backspace => {
                if self.value.pop().is_some() {
                    InputResult::Changed
                } else {
                    InputResult::Ignored
                }
            }
            KeyCode::Char(c) => {
                if self.accepts(c) && self.value.chars().count() < self.max_len {
                    self.value.push(c);
                    InputResult::Changed
                } else {
                    InputResult::Ignored
                }
            }
            _ => InputResult::Unhandled,
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Numeric => c.is_ascii_digit() || c == ',' || (c == '.' && !self.value.contains('.')),
        }
    }

    /// Value shown in the form; the placeholder when empty
    pub fn display_value(&self) -> &str {
        if self.value.is_empty() {
            self.placeholder
        } else {
            &self.value
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Parse a project size as typed, ignoring thousands separators.
///
/// Returns `None` for blank or unparsable input; range checks are left to
/// the calculation.
pub fn parse_area(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Step through `options` from `current`, wrapping at both ends.
///
/// From no selection, forward picks the first option and backward the last.
pub fn cycle_option<T: Clone + PartialEq>(options: &[T], current: Option<&T>, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match current.and_then(|c| options.iter().position(|o| o == c)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options.get(next).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_numeric_field_filters_characters() {
        let mut field = TextField::new(FieldKind::Numeric, "10000");
        for c in "1a2,5.0.0".chars() {
            field.handle_input(key(KeyCode::Char(c)));
        }
        assert_eq!(field.value, "12,5.00");
        assert_eq!(field.handle_input(key(KeyCode::Char('x'))), InputResult::Ignored);
    }

    #[test]
    fn test_backspace_and_placeholder() {
        let mut field = TextField::new(FieldKind::Text, "you@example.com").with_value("a");
        assert_eq!(field.handle_input(key(KeyCode::Backspace)), InputResult::Changed);
        assert_eq!(field.handle_input(key(KeyCode::Backspace)), InputResult::Ignored);
        assert_eq!(field.display_value(), "you@example.com");
        assert!(field.is_empty());
    }

    #[test]
    fn test_control_keys_pass_through() {
        let mut field = TextField::new(FieldKind::Text, "");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(field.handle_input(ctrl_c), InputResult::Unhandled);
        assert_eq!(field.handle_input(key(KeyCode::Enter)), InputResult::Unhandled);
        assert!(field.value.is_empty());
    }

    #[test]
    fn test_parse_area() {
        assert_eq!(parse_area("10,000"), Some(10_000.0));
        assert_eq!(parse_area(" 2500.5 "), Some(2500.5));
        assert_eq!(parse_area(""), None);
        assert_eq!(parse_area("1.2.3"), None);
    }

    #[test]
    fn test_cycle_option_wraps() {
        let options = ["a", "b", "c"];
        assert_eq!(cycle_option(&options, None, true), Some("a"));
        assert_eq!(cycle_option(&options, None, false), Some("c"));
        assert_eq!(cycle_option(&options, Some(&"c"), true), Some("a"));
        assert_eq!(cycle_option(&options, Some(&"a"), false), Some("c"));
        assert_eq!(cycle_option::<&str>(&[], None, true), None);
    }
}
