// ==========================================
// EventFab Element Import - Core Library
// ==========================================
// Element & material worksheet import for the EventFab
// management system: parse, validate, report, persist.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - external worksheet data
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection setup / unified PRAGMAs)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Re-export core types
// ==========================================

// Domain types
pub use domain::types::{ElementCategory, ElementType, Unit};

// Domain entities
pub use domain::{
    Dimensions, Element, ImportBatch, ImportOutcome, ImportReport, ImportStats, Particular,
    RawRow, RowIssue,
};

// Importer
pub use importer::{
    CsvParser, ElementImporter, ElementImporterImpl, ExcelParser, FileParser, ImportError,
    ImportTemplate, SheetParser, UniversalFileParser,
};

// Configuration
pub use config::{ConfigManager, ImportConfigReader};

// Repositories
pub use repository::{ElementImportRepository, ElementImportRepositoryImpl};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "EventFab Element Import";

// Database schema version
pub const DB_VERSION: &str = "v1";
