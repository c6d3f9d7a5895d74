// ==========================================
// EventFab Element Import - Particular Validator
// ==========================================
// Responsibility: validate a row treated as a material line of the
// active element. Accumulates every finding; never short-circuits.
// ==========================================

use crate::domain::element::RowValidation;
use crate::domain::types::Unit;
use crate::importer::row_normalizer::NormalizedRow;

// ==========================================
// ParticularValidator
// ==========================================
pub struct ParticularValidator {
    // Workshop-specific units registered in configuration; these
    // widen the known set and suppress the custom-unit warning.
    extra_units: Vec<String>,
}

impl ParticularValidator {
    pub fn new() -> Self {
        Self {
            extra_units: Vec::new(),
        }
    }

    pub fn with_extra_units(extra_units: &[String]) -> Self {
        Self {
            extra_units: extra_units.iter().map(|u| u.to_lowercase()).collect(),
        }
    }

    /// Validate a particular line. Valid iff no error fired; the
    /// included flag and unknown units only warn.
    pub fn validate(&self, row: &NormalizedRow) -> RowValidation {
        let mut validation = RowValidation::default();

        // Safety check; callers only route rows with a description here.
        if row.particular_description.is_empty() {
            validation.error("Particular description is required");
        }

        if row.unit.is_empty() {
            validation.error("Unit is required for particular");
        }

        match row.quantity.parse::<f64>() {
            Ok(quantity) if quantity > 0.0 => {}
            _ => validation.error("Quantity must be a number greater than 0"),
        }

        if !matches!(row.included.as_str(), "YES" | "NO" | "") {
            validation
                .warning("Invalid 'Included' value. Must be YES or NO. Defaulting to YES.");
        }

        if !row.unit.is_empty() && !self.is_known_unit(&row.unit) {
            validation.warning(format!(
                "Unknown unit: '{}'. Will be accepted as custom unit.",
                row.unit
            ));
        }

        validation
    }

    fn is_known_unit(&self, raw: &str) -> bool {
        Unit::parse(raw).is_recognized() || self.extra_units.contains(&raw.trim().to_lowercase())
    }
}

impl Default for ParticularValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particular_row(description: &str, unit: &str, quantity: &str, included: &str) -> NormalizedRow {
        NormalizedRow {
            particular_description: description.to_string(),
            unit: unit.to_string(),
            quantity: quantity.to_string(),
            included: included.to_string(),
            ..NormalizedRow::default()
        }
    }

    #[test]
    fn test_valid_particular() {
        let validator = ParticularValidator::new();
        let validation = validator.validate(&particular_row("Stage Boards", "Pcs", "8", "YES"));
        assert!(validation.is_valid());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_missing_description_and_unit() {
        let validator = ParticularValidator::new();
        let validation = validator.validate(&particular_row("", "", "8", ""));
        assert!(!validation.is_valid());
        assert!(validation
            .errors
            .contains(&"Particular description is required".to_string()));
        assert!(validation
            .errors
            .contains(&"Unit is required for particular".to_string()));
    }

    #[test]
    fn test_quantity_boundaries() {
        let validator = ParticularValidator::new();
        for bad in ["0", "-5", "abc", ""] {
            let validation = validator.validate(&particular_row("Boards", "pcs", bad, ""));
            assert!(
                validation
                    .errors
                    .contains(&"Quantity must be a number greater than 0".to_string()),
                "quantity {:?} should be rejected",
                bad
            );
        }
        for good in ["0.01", "1000000"] {
            let validation = validator.validate(&particular_row("Boards", "pcs", good, ""));
            assert!(validation.is_valid(), "quantity {:?} should be accepted", good);
        }
    }

    #[test]
    fn test_included_values() {
        let validator = ParticularValidator::new();
        for ok in ["YES", "NO", ""] {
            let validation = validator.validate(&particular_row("Boards", "pcs", "1", ok));
            assert!(validation.warnings.is_empty(), "included {:?} is allowed", ok);
        }

        let validation = validator.validate(&particular_row("Boards", "pcs", "1", "MAYBE"));
        assert!(validation.is_valid()); // warning only
        assert_eq!(
            validation.warnings,
            vec!["Invalid 'Included' value. Must be YES or NO. Defaulting to YES."]
        );
    }

    #[test]
    fn test_unknown_unit_warns_only() {
        let validator = ParticularValidator::new();
        let validation = validator.validate(&particular_row("Rope", "bundles", "2", ""));
        assert!(validation.is_valid());
        assert_eq!(
            validation.warnings,
            vec!["Unknown unit: 'bundles'. Will be accepted as custom unit."]
        );
    }

    #[test]
    fn test_extra_units_suppress_warning() {
        let validator = ParticularValidator::with_extra_units(&["Bundles".to_string()]);
        let validation = validator.validate(&particular_row("Rope", "bundles", "2", ""));
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_error_accumulation_no_short_circuit() {
        let validator = ParticularValidator::new();
        let validation = validator.validate(&particular_row("Rope", "", "abc", "MAYBE"));
        assert_eq!(validation.errors.len(), 2);
        assert_eq!(validation.warnings.len(), 1);
    }
}
