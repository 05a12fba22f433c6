//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors, styles and fixed UI strings. Screens
//! should never hardcode a color.
//!
//! # Usage
//! ```rust
//! use maxterra_savings::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Primary dark background for panels and overlays
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Brand Colors
    // -------------------------------------------------------------------------

    /// Brand orange - titles, focused fields, call-to-action buttons
    pub const PRIMARY: Color = Color::Rgb(249, 115, 22);

    /// Brand blue - per-area figures and secondary panels
    pub const SECONDARY: Color = Color::Rgb(59, 130, 246);

    /// Savings green - headline savings figures
    pub const SAVINGS: Color = Color::Rgb(35, 196, 95);

    // -------------------------------------------------------------------------
    // Semantic Colors (status, feedback)
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Cyan;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Rgb(249, 115, 22);

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Rgb(249, 115, 22);

    /// Selected item text
    pub const SELECTED_FG: Color = Color::Black;

    /// Navigation bar hint text
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Common style combinations
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn text_bold() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Screen titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Large savings figures
    pub fn savings() -> Style {
        Style::default()
            .fg(Colors::SAVINGS)
            .add_modifier(Modifier::BOLD)
    }

    /// Per-area figures
    pub fn per_area() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Highlighted list item or option
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    /// Enabled call-to-action button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled button
    pub fn button_inactive() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// UI TEXT
// =============================================================================

/// Fixed UI strings
pub struct UiText;

impl UiText {
    pub const BTN_CONTINUE: &'static str = "[ Continue ]";
    pub const BTN_CALCULATE: &'static str = "[ Calculate My Savings ]";
    pub const BTN_SUBMIT: &'static str = "[ Submit ]";
    pub const BTN_SUBMITTING: &'static str = "[ Submitting... ]";

    pub const NOT_SELECTED: &'static str = "Select...";

    pub const DISCLAIMER: &'static str = "*Calculations based on documented cost analysis using maximum approved spacing for optimal performance comparison. Actual savings may vary by project and location.";

    pub const CUSTOM_ANALYSIS: &'static str =
        "For different framing or construction approaches, contact us for customized analysis";
}
