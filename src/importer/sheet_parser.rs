// ==========================================
// EventFab Element Import - Continuation-State Parser
// ==========================================
// Responsibility: walk worksheet rows in order and group them by
// the element-header / continuation-row convention.
//
// A row that supplies an element id starts a new element; rows that
// only carry a particular extend the active one; rows with neither
// are separators. The active element is flushed when the next header
// appears or input ends, through one shared finalize path.
//
// The walk is a fold threading (state, accumulator) explicitly, so
// parsing holds no hidden mutable fields and two passes over the
// same rows produce identical reports.
// ==========================================

use crate::domain::element::{Dimensions, Element, ImportReport, Particular, RawRow};
use crate::importer::header_validator::HeaderValidator;
use crate::importer::particular_validator::ParticularValidator;
use crate::importer::report::ReportAccumulator;
use crate::importer::row_normalizer::{NormalizedRow, RowNormalizer};
use tracing::debug;

// ==========================================
// ParserState - the two-state machine
// ==========================================
enum ParserState {
    NoActiveElement,
    ActiveElement(Element),
}

// ==========================================
// SheetParser
// ==========================================
pub struct SheetParser {
    normalizer: RowNormalizer,
    header_validator: HeaderValidator,
    particular_validator: ParticularValidator,
}

impl SheetParser {
    pub fn new() -> Self {
        Self {
            normalizer: RowNormalizer::new(),
            header_validator: HeaderValidator::new(),
            particular_validator: ParticularValidator::new(),
        }
    }

    /// Parser whose known-type/known-unit catalogs are widened with
    /// workshop-specific entries from configuration.
    pub fn with_catalogs(extra_types: &[String], extra_units: &[String]) -> Self {
        Self {
            normalizer: RowNormalizer::new(),
            header_validator: HeaderValidator::with_extra_types(extra_types),
            particular_validator: ParticularValidator::with_extra_units(extra_units),
        }
    }

    /// Parse one worksheet's data rows (worksheet row 1 is the column
    /// header and must not be passed in). Never fails: malformed rows
    /// land in the report as errors/warnings, the walk continues.
    pub fn parse(&self, rows: &[RawRow]) -> ImportReport {
        let (state, accumulator) = rows.iter().fold(
            (ParserState::NoActiveElement, ReportAccumulator::new()),
            |(state, accumulator), row| self.step(state, accumulator, row),
        );

        // End-of-input flush shares the finalize rule with the
        // flush-on-new-header path.
        let accumulator = Self::flush(state, accumulator);
        let report = accumulator.finish();

        debug!(
            elements = report.stats.total_elements,
            materials = report.stats.total_materials,
            errors = report.stats.total_errors,
            warnings = report.stats.total_warnings,
            "worksheet parse finished"
        );

        report
    }

    /// One transition of the state machine.
    fn step(
        &self,
        state: ParserState,
        mut accumulator: ReportAccumulator,
        row: &RawRow,
    ) -> (ParserState, ReportAccumulator) {
        let normalized = self.normalizer.normalize(row);
        let mut state = state;

        if normalized.has_element_id() {
            // Flush the previous element before validating this header,
            // so a bad header never corrupts an already-valid element.
            state = match state {
                ParserState::ActiveElement(element) => {
                    accumulator = Self::finalize_element(element, accumulator);
                    ParserState::NoActiveElement
                }
                ParserState::NoActiveElement => ParserState::NoActiveElement,
            };

            let validation = self.header_validator.validate(&normalized);
            accumulator.record_validation(row.row_number, &validation);

            if validation.is_valid() {
                state = ParserState::ActiveElement(Self::new_element(&normalized, row.row_number));
            }
            // Invalid header starts nothing; a particular on this same
            // row falls into the no-active-element branch below.
        }

        if normalized.has_particular() {
            match &mut state {
                ParserState::NoActiveElement => {
                    accumulator.error(
                        row.row_number,
                        "Particular found without element header. Fill element columns first.",
                    );
                }
                ParserState::ActiveElement(element) => {
                    let validation = self.particular_validator.validate(&normalized);
                    accumulator.record_validation(row.row_number, &validation);

                    if validation.is_valid() {
                        element
                            .particulars
                            .push(Self::new_particular(&normalized, row.row_number));
                    }
                }
            }
        }

        // Rows with neither an element id nor a particular are
        // separator rows and pass through silently.
        (state, accumulator)
    }

    /// Finalize rule: an element with no particulars is dropped with an
    /// error against its header row; otherwise it joins the result.
    fn finalize_element(element: Element, mut accumulator: ReportAccumulator) -> ReportAccumulator {
        if element.particulars.is_empty() {
            accumulator.error(
                element.source_row,
                format!("Element '{}' has no particulars/materials", element.id),
            );
        } else {
            accumulator.push_element(element);
        }
        accumulator
    }

    fn flush(state: ParserState, accumulator: ReportAccumulator) -> ReportAccumulator {
        match state {
            ParserState::ActiveElement(element) => Self::finalize_element(element, accumulator),
            ParserState::NoActiveElement => accumulator,
        }
    }

    fn new_element(normalized: &NormalizedRow, row_number: usize) -> Element {
        Element {
            id: normalized.element_id.clone(),
            element_type: normalized.element_type.clone(),
            name: normalized.element_name.clone(),
            category: normalized.category.clone(),
            dimensions: Dimensions {
                width: parse_dimension(&normalized.width),
                length: parse_dimension(&normalized.length),
                height: parse_dimension(&normalized.height),
            },
            particulars: Vec::new(),
            source_row: row_number,
        }
    }

    fn new_particular(normalized: &NormalizedRow, row_number: usize) -> Particular {
        Particular {
            description: normalized.particular_description.clone(),
            unit: normalized.unit.clone(),
            // The validator already required a positive number.
            quantity: normalized.quantity.parse::<f64>().unwrap_or(0.0),
            // false only for an explicit NO; blank or garbage defaults
            // to true, mirroring the warning-only included policy.
            included: normalized.included != "NO",
            notes: if normalized.notes.is_empty() {
                None
            } else {
                Some(normalized.notes.clone())
            },
            source_row: row_number,
        }
    }
}

impl Default for SheetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Dimension cells coerce to float; non-numeric (already warned by the
/// header validator) falls back to 0.
fn parse_dimension(raw: &str) -> f64 {
    raw.parse::<f64>().unwrap_or(0.0)
}
