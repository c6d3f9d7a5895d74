// ==========================================
// EventFab Element Import - Element Domain Model
// ==========================================
// Entities produced by the worksheet import pipeline:
// raw rows, finalized elements/particulars, report & batch records.
// ==========================================

use crate::domain::types::ElementCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawRow - one worksheet row as read from file
// ==========================================
// Ephemeral: exists only during a single parse pass.
// row_number is the 1-based worksheet row; row 1 is the
// column-header row, so data rows start at 2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    pub row_number: usize,
    pub cells: HashMap<String, String>, // column header -> cell text
}

impl RawRow {
    pub fn new(row_number: usize, cells: HashMap<String, String>) -> Self {
        Self { row_number, cells }
    }

    /// A row with no non-blank cell at all (separator row).
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

// ==========================================
// Dimensions - physical size of an element (metres)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Dimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

// ==========================================
// Element - one deliverable item
// ==========================================
// Built from a header row, extended by continuation rows.
// Invariant: a retained Element has at least one Particular;
// the finalize rule in the sheet parser drops empty ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    // ===== Identity =====
    pub id: String,           // short code from the sheet (e.g. "E001")
    pub element_type: String, // type as given, case preserved
    pub name: String,

    // ===== Classification =====
    pub category: String, // as given; guaranteed parseable for retained elements

    // ===== Physical =====
    pub dimensions: Dimensions,

    // ===== Materials =====
    pub particulars: Vec<Particular>,

    // ===== Provenance =====
    pub source_row: usize, // worksheet row of the header row
}

impl Element {
    /// Category of a retained element. Header validation guarantees the
    /// raw value parses, so this only returns None for hand-built values.
    pub fn category_kind(&self) -> Option<ElementCategory> {
        ElementCategory::parse(&self.category)
    }

    pub fn particular_count(&self) -> usize {
        self.particulars.len()
    }
}

// ==========================================
// Particular - one material line-item of an element
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particular {
    pub description: String,
    pub unit: String, // as given, case preserved
    pub quantity: f64,
    pub included: bool,        // false only for an explicit NO
    pub notes: Option<String>, // blank normalized to None
    pub source_row: usize,
}

// ==========================================
// RowValidation - outcome of validating one row
// ==========================================
// Messages only; the sheet parser attaches the row number when
// it folds them into the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RowValidation {
    /// Valid iff no error fired; warnings do not invalidate.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

// ==========================================
// RowIssue - one error or warning keyed by source row
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row: usize,
    pub message: String,
}

impl RowIssue {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

// ==========================================
// ImportStats - derived counts
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImportStats {
    pub total_elements: usize,
    pub total_materials: usize, // sum of particulars across elements
    pub total_errors: usize,
    pub total_warnings: usize,
}

// ==========================================
// ImportReport - result of one parse pass
// ==========================================
// Immutable after the parse completes. Errors and warnings keep
// parse order; callers render them to the uploader before committing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub elements: Vec<Element>,
    pub errors: Vec<RowIssue>,
    pub warnings: Vec<RowIssue>,
    pub stats: ImportStats,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// ==========================================
// ImportBatch - one committed import
// ==========================================
// Written alongside the persisted elements; keeps the full
// report as JSON for later inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String, // UUID
    pub project_id: Option<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub total_rows: i32, // data rows seen in the worksheet
    pub element_count: i32,
    pub particular_count: i32,
    pub error_count: i32,
    pub warning_count: i32,
    pub imported_at: Option<DateTime<Utc>>,
    pub imported_by: Option<String>,
    pub elapsed_ms: Option<i32>,
    pub report_json: Option<String>,
}

// ==========================================
// ImportOutcome - return value of a committed import
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch: ImportBatch,
    pub report: ImportReport,
    pub persisted_elements: usize,
    pub elapsed_time: std::time::Duration,
}
