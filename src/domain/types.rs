// ==========================================
// EventFab Element Import - Domain Types
// ==========================================
// Catalog enums for the import validators.
// Each catalog keeps an explicit Other(..) fallback so
// "known vs. custom" is a property of the variant, not a
// string comparison scattered through the validators.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Element Category
// ==========================================
// Closed set: a header row with any other value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    Production, // built in-house
    Hire,       // hired in for the event
    Outsourced, // fabricated by a third party
}

impl ElementCategory {
    pub const ALL: [ElementCategory; 3] = [
        ElementCategory::Production,
        ElementCategory::Hire,
        ElementCategory::Outsourced,
    ];

    /// Case-insensitive parse. Returns None for anything outside the set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "production" => Some(ElementCategory::Production),
            "hire" => Some(ElementCategory::Hire),
            "outsourced" => Some(ElementCategory::Outsourced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Production => "production",
            ElementCategory::Hire => "hire",
            ElementCategory::Outsourced => "outsourced",
        }
    }

    /// The allowed values joined for user-facing messages.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Element Type
// ==========================================
// Open set: unrecognized values are accepted as Other(..)
// with a warning; "custom" itself is part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementType {
    Stage,
    Backdrop,
    Skirting,
    Flooring,
    Trussing,
    Decor,
    Lighting,
    Sound,
    Chairs,
    Tables,
    Signage,
    Custom,
    Other(String), // unrecognized type, carried as given
}

impl ElementType {
    /// Case-insensitive parse. Never fails: unrecognized input
    /// becomes Other(..) preserving the original spelling.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "stage" => ElementType::Stage,
            "backdrop" => ElementType::Backdrop,
            "skirting" => ElementType::Skirting,
            "flooring" => ElementType::Flooring,
            "trussing" => ElementType::Trussing,
            "décor" => ElementType::Decor,
            "lighting" => ElementType::Lighting,
            "sound" => ElementType::Sound,
            "chairs" => ElementType::Chairs,
            "tables" => ElementType::Tables,
            "signage" => ElementType::Signage,
            "custom" => ElementType::Custom,
            _ => ElementType::Other(raw.trim().to_string()),
        }
    }

    /// True for catalog members (including the literal "custom").
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ElementType::Other(_))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Stage => write!(f, "stage"),
            ElementType::Backdrop => write!(f, "backdrop"),
            ElementType::Skirting => write!(f, "skirting"),
            ElementType::Flooring => write!(f, "flooring"),
            ElementType::Trussing => write!(f, "trussing"),
            ElementType::Decor => write!(f, "décor"),
            ElementType::Lighting => write!(f, "lighting"),
            ElementType::Sound => write!(f, "sound"),
            ElementType::Chairs => write!(f, "chairs"),
            ElementType::Tables => write!(f, "tables"),
            ElementType::Signage => write!(f, "signage"),
            ElementType::Custom => write!(f, "custom"),
            ElementType::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// ==========================================
// Unit of Measure
// ==========================================
// Open set, same policy as ElementType.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Pcs,
    Ltrs,
    Mtrs,
    Sqm,
    Pks,
    Kgs,
    Custom,
    Other(String), // unrecognized unit, carried as given
}

impl Unit {
    /// Case-insensitive parse. Never fails: unrecognized input
    /// becomes Other(..) preserving the original spelling.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pcs" => Unit::Pcs,
            "ltrs" => Unit::Ltrs,
            "mtrs" => Unit::Mtrs,
            "sqm" => Unit::Sqm,
            "pks" => Unit::Pks,
            "kgs" => Unit::Kgs,
            "custom" => Unit::Custom,
            _ => Unit::Other(raw.trim().to_string()),
        }
    }

    /// True for catalog members (including the literal "custom").
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Unit::Other(_))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Pcs => write!(f, "pcs"),
            Unit::Ltrs => write!(f, "ltrs"),
            Unit::Mtrs => write!(f, "mtrs"),
            Unit::Sqm => write!(f, "sqm"),
            Unit::Pks => write!(f, "pks"),
            Unit::Kgs => write!(f, "kgs"),
            Unit::Custom => write!(f, "custom"),
            Unit::Other(raw) => write!(f, "{}", raw),
        }
    }
}
