// ==========================================
// EventFab Element Import - Domain Layer
// ==========================================
// Responsibility: entities and value types of the import pipeline.
// No data access, no parsing logic.
// ==========================================

pub mod element;
pub mod types;

// Re-export core types
pub use element::{
    Dimensions, Element, ImportBatch, ImportOutcome, ImportReport, ImportStats, Particular,
    RawRow, RowIssue, RowValidation,
};
pub use types::{ElementCategory, ElementType, Unit};
