// ==========================================
// EventFab Element Import - Importer Traits
// ==========================================
// Responsibility: define the import interfaces (no implementations).
// ==========================================

use crate::domain::element::{ImportOutcome, ImportReport, RawRow};
use async_trait::async_trait;
use std::error::Error;
use std::path::Path;

// ==========================================
// ElementImporter Trait
// ==========================================
// Main import interface.
// Implementor: ElementImporterImpl
#[async_trait]
pub trait ElementImporter: Send + Sync {
    /// Parse a worksheet file and build the import report without
    /// touching the database.
    ///
    /// # Parameters
    /// - file_path: worksheet path (.xlsx/.xls/.csv)
    ///
    /// # Returns
    /// - Ok(ImportReport): elements, errors, warnings, stats — what the
    ///   caller renders to the uploader before committing
    /// - Err: file read/parse error, row-cap exceeded
    async fn preview_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> Result<ImportReport, Box<dyn Error>>;

    /// Parse a worksheet file and persist the finalized elements,
    /// scoped to a project, in a single transaction.
    ///
    /// # Parameters
    /// - file_path: worksheet path (.xlsx/.xls/.csv)
    /// - project_id: target project the elements belong to
    ///
    /// # Returns
    /// - Ok(ImportOutcome): batch record, report, persisted count, timing
    /// - Err: file or database error (nothing persisted on error)
    ///
    /// # Import flow
    /// 1. File read & parse into raw rows
    /// 2. Row-cap check against configuration
    /// 3. Continuation-state parse into the report
    /// 4. Transactional persist (batch + elements + particulars)
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        project_id: &str,
    ) -> Result<ImportOutcome, Box<dyn Error>>;

    /// Import several worksheet files concurrently.
    ///
    /// Each file is an independent import: one failing file does not
    /// affect the others.
    ///
    /// # Parameters
    /// - file_paths: worksheet paths
    /// - project_id: target project shared by all files
    ///
    /// # Returns
    /// - Ok(Vec<..>): per-file outcome or error message
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
        project_id: &str,
    ) -> Result<Vec<Result<ImportOutcome, String>>, Box<dyn Error>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// Worksheet decoding interface (stage 0).
// Implementors: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// Decode a worksheet into raw rows keyed by column header.
    ///
    /// Row 1 of the file is the header row and is consumed here; the
    /// returned rows carry worksheet row numbers starting at 2. Blank
    /// rows are retained so those numbers line up with the source file.
    ///
    /// # Parameters
    /// - file_path: worksheet path
    ///
    /// # Returns
    /// - Ok(Vec<RawRow>): data rows in file order
    /// - Err: file read/format error
    fn parse_to_rows(&self, file_path: &Path) -> Result<Vec<RawRow>, Box<dyn Error>>;
}
