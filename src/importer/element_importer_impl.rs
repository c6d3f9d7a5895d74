// ==========================================
// EventFab Element Import - Element Importer Implementation
// ==========================================
// Responsibility: the full import flow, file to database.
// Flow: decode -> row cap -> continuation parse -> batch -> persist
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::element::{ImportBatch, ImportOutcome, ImportReport, RawRow};
use crate::importer::element_importer_trait::{ElementImporter, FileParser};
use crate::importer::error::ImportError;
use crate::importer::sheet_parser::SheetParser;
use crate::repository::ElementImportRepository;
use chrono::Utc;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// ElementImporterImpl
// ==========================================
pub struct ElementImporterImpl<R, C>
where
    R: ElementImportRepository,
    C: ImportConfigReader,
{
    // Data access
    import_repo: R,

    // Configuration reader
    config: C,

    // Worksheet decoder
    file_parser: Box<dyn FileParser>,
}

impl<R, C> ElementImporterImpl<R, C>
where
    R: ElementImportRepository,
    C: ImportConfigReader,
{
    /// Create a new importer.
    ///
    /// # Parameters
    /// - import_repo: import data repository
    /// - config: configuration reader
    /// - file_parser: worksheet decoder (usually UniversalFileParser)
    pub fn new(import_repo: R, config: C, file_parser: Box<dyn FileParser>) -> Self {
        Self {
            import_repo,
            config,
            file_parser,
        }
    }

    /// Decode the file and run the continuation-state parse.
    async fn parse_file(&self, path: &Path) -> Result<(Vec<RawRow>, ImportReport), Box<dyn Error>> {
        debug!("step 1: decode worksheet");
        let rows = self.file_parser.parse_to_rows(path)?;

        debug!(rows = rows.len(), "step 2: row-cap check");
        let limit = self.config.get_max_import_rows().await?;
        if rows.len() > limit {
            return Err(Box::new(ImportError::TooManyRows {
                limit,
                actual: rows.len(),
            }));
        }

        debug!("step 3: continuation parse");
        let extra_types = self.config.get_custom_element_types().await?;
        let extra_units = self.config.get_custom_units().await?;
        let parser = SheetParser::with_catalogs(&extra_types, &extra_units);
        let report = parser.parse(&rows);

        Ok((rows, report))
    }
}

#[async_trait::async_trait]
impl<R, C> ElementImporter for ElementImporterImpl<R, C>
where
    R: ElementImportRepository + Send + Sync,
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file_path))]
    async fn preview_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> Result<ImportReport, Box<dyn Error>> {
        let path = file_path.as_ref();
        info!(file = %path.display(), "previewing element import");

        let (_rows, report) = self.parse_file(path).await?;

        info!(
            elements = report.stats.total_elements,
            materials = report.stats.total_materials,
            errors = report.stats.total_errors,
            warnings = report.stats.total_warnings,
            "preview finished"
        );

        Ok(report)
    }

    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        project_id: &str,
    ) -> Result<ImportOutcome, Box<dyn Error>> {
        use std::time::Instant;
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        let path = file_path.as_ref();
        info!(batch_id = %batch_id, file = %path.display(), project_id, "starting element import");

        let (rows, report) = self.parse_file(path).await?;

        debug!("step 4: batch record");
        let imported_by = self.config.get_imported_by().await?;
        let elapsed_time = start_time.elapsed();
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            project_id: Some(project_id.to_string()),
            file_name: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.to_string()),
            file_path: Some(path.display().to_string()),
            total_rows: rows.len() as i32,
            element_count: report.stats.total_elements as i32,
            particular_count: report.stats.total_materials as i32,
            error_count: report.stats.total_errors as i32,
            warning_count: report.stats.total_warnings as i32,
            imported_at: Some(Utc::now()),
            imported_by: Some(imported_by),
            elapsed_ms: Some(elapsed_time.as_millis() as i32),
            report_json: Some(serde_json::to_string(&report)?),
        };

        debug!("step 5: transactional persist");
        let persisted_elements = self
            .import_repo
            .persist_import(&batch, &report.elements, project_id)
            .await?;

        debug!("step 6: retention housekeeping");
        let retention_days = self.config.get_batch_retention_days().await?;
        let purged = self
            .import_repo
            .purge_batches_older_than(retention_days)
            .await?;
        if purged > 0 {
            info!(purged, retention_days, "stale import batches purged");
        }

        info!(
            batch_id = %batch_id,
            persisted = persisted_elements,
            errors = report.stats.total_errors,
            warnings = report.stats.total_warnings,
            elapsed_ms = elapsed_time.as_millis(),
            "element import finished"
        );

        Ok(ImportOutcome {
            batch,
            report,
            persisted_elements,
            elapsed_time: start_time.elapsed(),
        })
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
        project_id: &str,
    ) -> Result<Vec<Result<ImportOutcome, String>>, Box<dyn Error>> {
        use futures::future::join_all;

        info!(count = file_paths.len(), "starting batch import");

        // One task per file; each import is independent and a failing
        // file leaves the others untouched.
        let import_tasks = file_paths.into_iter().map(|path| {
            let path_str = path.as_ref().display().to_string();
            async move {
                match self.import_from_file(path, project_id).await {
                    Ok(outcome) => {
                        info!(
                            file = %path_str,
                            elements = outcome.persisted_elements,
                            "file imported"
                        );
                        Ok(outcome)
                    }
                    Err(e) => {
                        error!(file = %path_str, error = %e, "file import failed");
                        Err(format!("import of {} failed: {}", path_str, e))
                    }
                }
            }
        });

        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            succeeded = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "batch import finished"
        );

        Ok(results)
    }
}
