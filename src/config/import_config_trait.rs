// ==========================================
// EventFab Element Import - Import Config Trait
// ==========================================
// Responsibility: the configuration-read interface the importer
// needs (no implementation, no writes, no business logic).
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// Implementor: ConfigManager (reads the config_kv table)
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    // ===== Validation catalogs =====

    /// Workshop-specific element types registered beyond the built-in
    /// catalog. These suppress the unknown-type warning; they never
    /// relax the required-field or category rules.
    ///
    /// # Default
    /// - empty
    async fn get_custom_element_types(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// Workshop-specific units registered beyond the built-in catalog.
    ///
    /// # Default
    /// - empty
    async fn get_custom_units(&self) -> Result<Vec<String>, Box<dyn Error>>;

    // ===== Import limits =====

    /// Maximum data rows accepted per worksheet; larger files are
    /// rejected before parsing.
    ///
    /// # Default
    /// - 5000
    async fn get_max_import_rows(&self) -> Result<usize, Box<dyn Error>>;

    // ===== Housekeeping =====

    /// Days to keep batch records before they are eligible for purge.
    ///
    /// # Default
    /// - 90
    async fn get_batch_retention_days(&self) -> Result<i64, Box<dyn Error>>;

    /// Label recorded as the importing actor on batch records.
    ///
    /// # Default
    /// - "system"
    async fn get_imported_by(&self) -> Result<String, Box<dyn Error>>;
}
