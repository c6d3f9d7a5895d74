// ==========================================
// EventFab Element Import - Row Normalizer
// ==========================================
// Responsibility: raw header-keyed row -> canonical field record.
// Trims text, uppercases the included flag, maps header aliases.
// This stage never fails; it only shapes data for the validators.
// ==========================================

use crate::domain::element::RawRow;
use std::collections::HashMap;

// ==========================================
// NormalizedRow - canonical field record
// ==========================================
// Numeric fields stay as trimmed raw text so the validators own
// the is-numeric decision (a normalizer that coerced would have to
// fail, and this stage must not).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    pub element_id: String,
    pub element_type: String,
    pub element_name: String,
    pub category: String,
    pub width: String,
    pub length: String,
    pub height: String,
    pub particular_description: String,
    pub unit: String,
    pub quantity: String,
    pub included: String, // uppercase-trimmed; "" when absent
    pub notes: String,
}

impl NormalizedRow {
    /// This row declares a new element.
    pub fn has_element_id(&self) -> bool {
        !self.element_id.is_empty()
    }

    /// This row carries a particular line.
    pub fn has_particular(&self) -> bool {
        !self.particular_description.is_empty()
    }
}

// ==========================================
// RowNormalizer
// ==========================================
pub struct RowNormalizer;

impl RowNormalizer {
    pub fn new() -> Self {
        RowNormalizer
    }

    /// Shape one raw row into the canonical record.
    pub fn normalize(&self, row: &RawRow) -> NormalizedRow {
        NormalizedRow {
            element_id: self.get_text(&row.cells, "element_id"),
            element_type: self.get_text(&row.cells, "element_type"),
            element_name: self.get_text(&row.cells, "element_name"),
            category: self.get_text(&row.cells, "category"),
            width: self.get_text(&row.cells, "width_m"),
            length: self.get_text(&row.cells, "length_m"),
            height: self.get_text(&row.cells, "height_m"),
            particular_description: self.get_text(&row.cells, "particular_description"),
            unit: self.get_text(&row.cells, "unit"),
            quantity: self.get_text(&row.cells, "quantity"),
            included: self.get_text(&row.cells, "included").to_uppercase(),
            notes: self.get_text(&row.cells, "notes"),
        }
    }

    /// Extract a trimmed cell value, resolving header aliases.
    /// Missing column -> empty string.
    fn get_text(&self, cells: &HashMap<String, String>, key: &str) -> String {
        // Alias lists per canonical key; sheets authored by hand use
        // the human-readable spellings from the template.
        let aliases: Vec<&str> = match key {
            "element_id" => vec!["element_id", "Element ID", "Element Id"],
            "element_type" => vec!["element_type", "Element Type"],
            "element_name" => vec!["element_name", "Element Name"],
            "category" => vec!["category", "Category"],
            "width_m" => vec!["width_m", "Width (m)", "Width"],
            "length_m" => vec!["length_m", "Length (m)", "Length"],
            "height_m" => vec!["height_m", "Height (m)", "Height"],
            "particular_description" => vec![
                "particular_description",
                "Particular Description",
                "Particular / Material",
            ],
            "unit" => vec!["unit", "Unit"],
            "quantity" => vec!["quantity", "Quantity", "Qty"],
            "included" => vec!["included", "Included", "Included (YES/NO)"],
            "notes" => vec!["notes", "Notes", "Remarks"],
            _ => vec![key],
        };

        for alias in &aliases {
            if let Some(value) = cells.get(*alias) {
                return value.trim().to_string();
            }
        }

        // Last resort: case-insensitive header match.
        for alias in &aliases {
            let lowered = alias.to_lowercase();
            if let Some((_, value)) = cells
                .iter()
                .find(|(header, _)| header.trim().to_lowercase() == lowered)
            {
                return value.trim().to_string();
            }
        }

        String::new()
    }
}

impl Default for RowNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
