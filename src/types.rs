//! Type-safe selection types for the calculator
//!
//! Project categories and building types are proper Rust enums rather than
//! strings, so every consumer matches them exhaustively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// What the customer is looking to replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    /// OSB + wet gypsum (gypcrete) underlayment, compared against the fixed baseline
    #[strum(to_string = "wet-underlayment", serialize = "gypcrete")]
    WetUnderlayment,
    /// Entire subfloor system, compared against a named competitor product
    #[strum(to_string = "full-subfloor", serialize = "subfloor")]
    FullSubfloor,
}

impl ProjectCategory {
    /// Human-readable project type, as sent to the report dispatcher
    pub const fn label(self) -> &'static str {
        match self {
            Self::WetUnderlayment => "Wet Gypsum Underlayment",
            Self::FullSubfloor => "Entire Subfloor System",
        }
    }

    /// What the customer's current system gets replaced with
    pub const fn replacement(self) -> &'static str {
        match self {
            Self::WetUnderlayment => {
                "OSB + Wet Gypsum with MAXTERRA MgO Fire- And Water-Resistant Underlayment"
            }
            Self::FullSubfloor => {
                "Subfloor with MAXTERRA MgO Non-Combustible Single Layer Structural Floor Panels"
            }
        }
    }

    /// Whether a named comparator must be chosen for this category
    pub const fn requires_comparator(self) -> bool {
        matches!(self, Self::FullSubfloor)
    }
}

/// Building type. Informational only; it never affects the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    #[strum(serialize = "multifamily")]
    MultiFamily,
    #[strum(serialize = "hotel")]
    Hotel,
    #[strum(serialize = "commercial")]
    Commercial,
    #[strum(serialize = "retail")]
    Retail,
    #[strum(serialize = "singlefamily")]
    SingleFamily,
    #[strum(serialize = "other")]
    Other,
}

impl BuildingType {
    /// Human-readable label for menus and reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::MultiFamily => "Multi-family Residential",
            Self::Hotel => "Hotel/Hospitality",
            Self::Commercial => "Commercial Office",
            Self::Retail => "Retail/Mixed-use",
            Self::SingleFamily => "Single-family Residential",
            Self::Other => "Other",
        }
    }
}
