// ==========================================
// EventFab Element Import - Header Validator
// ==========================================
// Responsibility: validate a row that declares a new element.
// Accumulates every finding for the row; never short-circuits,
// so the uploader sees all problems in one pass.
// ==========================================

use crate::domain::element::RowValidation;
use crate::domain::types::{ElementCategory, ElementType};
use crate::importer::row_normalizer::NormalizedRow;

// ==========================================
// HeaderValidator
// ==========================================
pub struct HeaderValidator {
    // Workshop-specific types registered in configuration; these
    // widen the known set and suppress the custom-type warning.
    extra_types: Vec<String>,
}

impl HeaderValidator {
    pub fn new() -> Self {
        Self {
            extra_types: Vec::new(),
        }
    }

    pub fn with_extra_types(extra_types: &[String]) -> Self {
        Self {
            extra_types: extra_types.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Validate an element-header row. Valid iff no required-field or
    /// category error fired; unknown types and non-numeric dimensions
    /// only warn.
    pub fn validate(&self, row: &NormalizedRow) -> RowValidation {
        let mut validation = RowValidation::default();

        let required = [
            (&row.element_id, "Element ID"),
            (&row.element_type, "Element Type"),
            (&row.element_name, "Element Name"),
            (&row.category, "Category"),
        ];
        for (value, label) in required {
            if value.is_empty() {
                validation.error(format!("Missing required field: {}", label));
            }
        }

        if !row.category.is_empty() && ElementCategory::parse(&row.category).is_none() {
            validation.error(format!(
                "Invalid category: '{}'. Must be one of: {}",
                row.category,
                ElementCategory::allowed_values()
            ));
        }

        if !row.element_type.is_empty() && !self.is_known_type(&row.element_type) {
            validation.warning(format!(
                "Unknown element type: '{}'. Will be treated as custom type.",
                row.element_type
            ));
        }

        for (value, label) in [
            (&row.width, "Width"),
            (&row.length, "Length"),
            (&row.height, "Height"),
        ] {
            if !value.is_empty() && value.parse::<f64>().is_err() {
                validation.warning(format!("{} is not numeric. Will be set to 0.", label));
            }
        }

        validation
    }

    fn is_known_type(&self, raw: &str) -> bool {
        ElementType::parse(raw).is_recognized()
            || self.extra_types.contains(&raw.trim().to_lowercase())
    }
}

impl Default for HeaderValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_row(id: &str, element_type: &str, name: &str, category: &str) -> NormalizedRow {
        NormalizedRow {
            element_id: id.to_string(),
            element_type: element_type.to_string(),
            element_name: name.to_string(),
            category: category.to_string(),
            ..NormalizedRow::default()
        }
    }

    #[test]
    fn test_valid_header() {
        let validator = HeaderValidator::new();
        let validation = validator.validate(&header_row("E001", "stage", "Main Stage", "production"));
        assert!(validation.is_valid());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let validator = HeaderValidator::new();
        let validation = validator.validate(&header_row("E001", "", "", "production"));
        assert!(!validation.is_valid());
        assert_eq!(validation.errors.len(), 2);
        assert!(validation
            .errors
            .contains(&"Missing required field: Element Type".to_string()));
        assert!(validation
            .errors
            .contains(&"Missing required field: Element Name".to_string()));
    }

    #[test]
    fn test_all_fields_missing_accumulates_all_errors() {
        let validator = HeaderValidator::new();
        let validation = validator.validate(&header_row("", "", "", ""));
        assert_eq!(validation.errors.len(), 4);
    }

    #[test]
    fn test_invalid_category() {
        let validator = HeaderValidator::new();
        let validation = validator.validate(&header_row("E001", "stage", "Main Stage", "purchase"));
        assert!(!validation.is_valid());
        assert_eq!(
            validation.errors,
            vec!["Invalid category: 'purchase'. Must be one of: production, hire, outsourced"]
        );
    }

    #[test]
    fn test_category_case_insensitive() {
        let validator = HeaderValidator::new();
        let validation = validator.validate(&header_row("E001", "stage", "Main Stage", "HIRE"));
        assert!(validation.is_valid());
    }

    #[test]
    fn test_unknown_type_warns_only() {
        let validator = HeaderValidator::new();
        let validation = validator.validate(&header_row("E001", "gazebo", "Garden Gazebo", "hire"));
        assert!(validation.is_valid());
        assert_eq!(
            validation.warnings,
            vec!["Unknown element type: 'gazebo'. Will be treated as custom type."]
        );
    }

    #[test]
    fn test_extra_types_suppress_warning() {
        let validator = HeaderValidator::with_extra_types(&["Gazebo".to_string()]);
        let validation = validator.validate(&header_row("E001", "gazebo", "Garden Gazebo", "hire"));
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_non_numeric_dimension_warns() {
        let validator = HeaderValidator::new();
        let mut row = header_row("E001", "stage", "Main Stage", "production");
        row.width = "wide".to_string();
        row.height = "0.6".to_string();
        let validation = validator.validate(&row);
        assert!(validation.is_valid());
        assert_eq!(
            validation.warnings,
            vec!["Width is not numeric. Will be set to 0."]
        );
    }
}
