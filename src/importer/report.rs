// ==========================================
// EventFab Element Import - Import Report Builder
// ==========================================
// Responsibility: aggregate parsed elements, errors and warnings
// into the final ImportReport. Pure aggregation, no validation.
// Errors/warnings keep the order they were appended in.
// ==========================================

use crate::domain::element::{Element, ImportReport, ImportStats, RowIssue, RowValidation};

// ==========================================
// ReportAccumulator
// ==========================================
// Threaded through the sheet parser's fold; finish() seals it
// into the immutable ImportReport.
#[derive(Debug, Default)]
pub struct ReportAccumulator {
    pub elements: Vec<Element>,
    pub errors: Vec<RowIssue>,
    pub warnings: Vec<RowIssue>,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn error(&mut self, row: usize, message: impl Into<String>) {
        self.errors.push(RowIssue::new(row, message));
    }

    pub fn warning(&mut self, row: usize, message: impl Into<String>) {
        self.warnings.push(RowIssue::new(row, message));
    }

    /// Record every finding of one row validation against its row number.
    pub fn record_validation(&mut self, row: usize, validation: &RowValidation) {
        for message in &validation.errors {
            self.error(row, message.clone());
        }
        for message in &validation.warnings {
            self.warning(row, message.clone());
        }
    }

    /// Seal the accumulator into the final report with derived stats.
    pub fn finish(self) -> ImportReport {
        let stats = ImportStats {
            total_elements: self.elements.len(),
            total_materials: self.elements.iter().map(|e| e.particulars.len()).sum(),
            total_errors: self.errors.len(),
            total_warnings: self.warnings.len(),
        };

        ImportReport {
            elements: self.elements,
            errors: self.errors,
            warnings: self.warnings,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::element::{Dimensions, Particular};

    fn element_with_particulars(id: &str, count: usize) -> Element {
        Element {
            id: id.to_string(),
            element_type: "stage".to_string(),
            name: "Test".to_string(),
            category: "production".to_string(),
            dimensions: Dimensions::default(),
            particulars: (0..count)
                .map(|i| Particular {
                    description: format!("Material {}", i),
                    unit: "pcs".to_string(),
                    quantity: 1.0,
                    included: true,
                    notes: None,
                    source_row: 2 + i,
                })
                .collect(),
            source_row: 2,
        }
    }

    #[test]
    fn test_stats_derived() {
        let mut acc = ReportAccumulator::new();
        acc.push_element(element_with_particulars("E001", 3));
        acc.push_element(element_with_particulars("E002", 1));
        acc.error(5, "boom");
        acc.warning(6, "careful");
        acc.warning(7, "careful again");

        let report = acc.finish();
        assert_eq!(report.stats.total_elements, 2);
        assert_eq!(report.stats.total_materials, 4);
        assert_eq!(report.stats.total_errors, 1);
        assert_eq!(report.stats.total_warnings, 2);
    }

    #[test]
    fn test_issue_order_preserved() {
        let mut acc = ReportAccumulator::new();
        acc.error(9, "later row first");
        acc.error(3, "earlier row second");

        let report = acc.finish();
        assert_eq!(report.errors[0].row, 9);
        assert_eq!(report.errors[1].row, 3);
    }
}
