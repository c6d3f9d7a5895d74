// ==========================================
// EventFab Element Import - Template & Export
// ==========================================
// Responsibility: write the blank import template, and render
// elements back into the same continuation-row worksheet layout
// (element columns only on each element's first particular row).
// ==========================================

use crate::domain::element::Element;
use crate::importer::error::{ImportError, ImportResult};
use csv::Writer;
use std::path::Path;

/// Canonical column headers, in template order.
pub const TEMPLATE_HEADERS: [&str; 12] = [
    "element_id",
    "element_type",
    "element_name",
    "category",
    "width_m",
    "length_m",
    "height_m",
    "particular_description",
    "unit",
    "quantity",
    "included",
    "notes",
];

// ==========================================
// Template writer
// ==========================================
pub struct ImportTemplate;

impl ImportTemplate {
    /// Write a starter CSV template with sample rows demonstrating the
    /// header + continuation convention.
    pub fn write(path: &Path) -> ImportResult<()> {
        let mut writer = Writer::from_path(path)?;

        writer.write_record(TEMPLATE_HEADERS)?;

        // One element with two materials: the second row leaves the
        // element columns blank to continue E001.
        writer.write_record([
            "E001",
            "stage",
            "Main Stage",
            "production",
            "6",
            "8",
            "0.6",
            "Stage Boards",
            "pcs",
            "8",
            "YES",
            "",
        ])?;
        writer.write_record([
            "", "", "", "", "", "", "", "Stage Legs", "pcs", "16", "YES", "",
        ])?;
        writer.write_record([
            "E002",
            "backdrop",
            "Backdrop 1",
            "hire",
            "3",
            "4",
            "0",
            "Backdrop Fabric",
            "mtrs",
            "12",
            "YES",
            "white",
        ])?;

        writer.flush().map_err(ImportError::from)?;
        Ok(())
    }
}

// ==========================================
// Element exporter
// ==========================================

/// Render elements into the continuation-row CSV layout. The output
/// re-imports cleanly through the CSV parser.
pub fn export_elements_csv(path: &Path, elements: &[Element]) -> ImportResult<()> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record(TEMPLATE_HEADERS)?;

    for element in elements {
        let mut first = true;
        for particular in &element.particulars {
            let (id, element_type, name, category, width, length, height) = if first {
                (
                    element.id.clone(),
                    element.element_type.clone(),
                    element.name.clone(),
                    element.category.clone(),
                    format_number(element.dimensions.width),
                    format_number(element.dimensions.length),
                    format_number(element.dimensions.height),
                )
            } else {
                Default::default()
            };
            first = false;

            writer.write_record([
                id,
                element_type,
                name,
                category,
                width,
                length,
                height,
                particular.description.clone(),
                particular.unit.clone(),
                format_number(particular.quantity),
                if particular.included { "YES" } else { "NO" }.to_string(),
                particular.notes.clone().unwrap_or_default(),
            ])?;
        }
    }

    writer.flush().map_err(ImportError::from)?;
    Ok(())
}

/// Whole numbers print without a decimal point so re-imported cells
/// match what a spreadsheet author would type.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
