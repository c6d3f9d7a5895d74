// ==========================================
// EventFab Element Import - Import Repository Trait
// ==========================================
// Responsibility: define the import data-access interface.
// Constraint: repositories do CRUD only, no business rules.
// ==========================================

use crate::domain::element::{Element, ImportBatch};
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ElementImportRepository Trait
// ==========================================
// Implementor: ElementImportRepositoryImpl (rusqlite)
#[async_trait]
pub trait ElementImportRepository: Send + Sync {
    /// Persist one import: the batch record plus every element and its
    /// particulars, scoped to a project, in a single transaction.
    ///
    /// # Parameters
    /// - batch: batch metadata (stats, timing, report snapshot)
    /// - elements: finalized elements from the parse
    /// - project_id: owning project
    ///
    /// # Returns
    /// - Ok(usize): number of elements persisted
    /// - Err: database error (whole transaction rolled back)
    async fn persist_import(
        &self,
        batch: &ImportBatch,
        elements: &[Element],
        project_id: &str,
    ) -> Result<usize, Box<dyn Error>>;

    /// Fetch a batch record by id.
    async fn get_batch(&self, batch_id: &str) -> Result<Option<ImportBatch>, Box<dyn Error>>;

    /// Most recent batches, newest first.
    ///
    /// # Parameters
    /// - limit: maximum number of batches returned
    async fn list_recent_batches(&self, limit: usize) -> Result<Vec<ImportBatch>, Box<dyn Error>>;

    /// All elements imported for a project, with their particulars,
    /// in import order.
    async fn get_elements_by_project(
        &self,
        project_id: &str,
    ) -> Result<Vec<Element>, Box<dyn Error>>;

    /// Delete batches (and their elements/particulars, via cascade)
    /// older than the retention window.
    ///
    /// # Returns
    /// - Ok(usize): number of batches deleted
    async fn purge_batches_older_than(&self, days: i64) -> Result<usize, Box<dyn Error>>;
}
