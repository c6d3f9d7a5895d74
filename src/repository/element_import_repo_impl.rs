// ==========================================
// EventFab Element Import - Import Repository Implementation
// ==========================================
// Responsibility: import data access over rusqlite.
// Constraint: repositories do CRUD only, no business rules.
// One import = one transaction (batch + elements + particulars).
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::element::{Dimensions, Element, ImportBatch, Particular};
use crate::repository::element_import_repo::ElementImportRepository;
use crate::repository::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, Transaction};
use std::error::Error;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// ElementImportRepositoryImpl
// ==========================================
pub struct ElementImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ElementImportRepositoryImpl {
    /// Open (and initialize, if fresh) the database at db_path.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection. The unified PRAGMAs are re-applied
    /// (idempotent) so behavior matches connections we opened ourselves.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn insert_batch_tx(tx: &Transaction, batch: &ImportBatch) -> Result<(), Box<dyn Error>> {
        tx.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, project_id, file_name, file_path,
                total_rows, element_count, particular_count,
                error_count, warning_count,
                imported_at, imported_by, elapsed_ms, report_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                batch.batch_id,
                batch.project_id,
                batch.file_name,
                batch.file_path,
                batch.total_rows,
                batch.element_count,
                batch.particular_count,
                batch.error_count,
                batch.warning_count,
                batch.imported_at,
                batch.imported_by,
                batch.elapsed_ms,
                batch.report_json,
            ],
        )?;
        Ok(())
    }

    fn insert_elements_tx(
        tx: &Transaction,
        batch_id: &str,
        project_id: &str,
        elements: &[Element],
    ) -> Result<usize, Box<dyn Error>> {
        let mut element_stmt = tx.prepare(
            r#"
            INSERT INTO element (
                element_key, batch_id, project_id, code, element_type,
                name, category, width_m, length_m, height_m,
                source_row, seq_no
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )?;
        let mut particular_stmt = tx.prepare(
            r#"
            INSERT INTO particular (
                particular_key, element_key, description, unit,
                quantity, included, notes, source_row, seq_no
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )?;

        let mut count = 0;
        for (element_seq, element) in elements.iter().enumerate() {
            let element_key = Uuid::new_v4().to_string();
            element_stmt.execute(params![
                element_key,
                batch_id,
                project_id,
                element.id,
                element.element_type,
                element.name,
                element.category,
                element.dimensions.width,
                element.dimensions.length,
                element.dimensions.height,
                element.source_row as i64,
                element_seq as i64,
            ])?;

            for (particular_seq, particular) in element.particulars.iter().enumerate() {
                particular_stmt.execute(params![
                    Uuid::new_v4().to_string(),
                    element_key,
                    particular.description,
                    particular.unit,
                    particular.quantity,
                    particular.included,
                    particular.notes,
                    particular.source_row as i64,
                    particular_seq as i64,
                ])?;
            }

            count += 1;
        }

        Ok(count)
    }

    fn row_to_batch(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImportBatch> {
        Ok(ImportBatch {
            batch_id: row.get(0)?,
            project_id: row.get(1)?,
            file_name: row.get(2)?,
            file_path: row.get(3)?,
            total_rows: row.get(4)?,
            element_count: row.get(5)?,
            particular_count: row.get(6)?,
            error_count: row.get(7)?,
            warning_count: row.get(8)?,
            imported_at: row.get(9)?,
            imported_by: row.get(10)?,
            elapsed_ms: row.get(11)?,
            report_json: row.get(12)?,
        })
    }

    const BATCH_COLUMNS: &'static str = "batch_id, project_id, file_name, file_path, \
         total_rows, element_count, particular_count, error_count, warning_count, \
         imported_at, imported_by, elapsed_ms, report_json";
}

#[async_trait]
impl ElementImportRepository for ElementImportRepositoryImpl {
    async fn persist_import(
        &self,
        batch: &ImportBatch,
        elements: &[Element],
        project_id: &str,
    ) -> Result<usize, Box<dyn Error>> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let tx = conn.transaction()?;
        Self::insert_batch_tx(&tx, batch)?;
        let count = Self::insert_elements_tx(&tx, &batch.batch_id, project_id, elements)?;
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(count)
    }

    async fn get_batch(&self, batch_id: &str) -> Result<Option<ImportBatch>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let sql = format!(
            "SELECT {} FROM import_batch WHERE batch_id = ?1",
            Self::BATCH_COLUMNS
        );
        let result = conn.query_row(&sql, params![batch_id], Self::row_to_batch);

        match result {
            Ok(batch) => Ok(Some(batch)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(RepositoryError::from(e))),
        }
    }

    async fn list_recent_batches(&self, limit: usize) -> Result<Vec<ImportBatch>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let sql = format!(
            "SELECT {} FROM import_batch ORDER BY imported_at DESC LIMIT ?1",
            Self::BATCH_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let batches = stmt
            .query_map(params![limit as i64], Self::row_to_batch)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(batches)
    }

    async fn get_elements_by_project(
        &self,
        project_id: &str,
    ) -> Result<Vec<Element>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut element_stmt = conn.prepare(
            r#"
            SELECT element_key, code, element_type, name, category,
                   width_m, length_m, height_m, source_row
            FROM element
            WHERE project_id = ?1
            ORDER BY rowid
            "#,
        )?;

        let keyed_elements = element_stmt
            .query_map(params![project_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    Element {
                        id: row.get(1)?,
                        element_type: row.get(2)?,
                        name: row.get(3)?,
                        category: row.get(4)?,
                        dimensions: Dimensions {
                            width: row.get(5)?,
                            length: row.get(6)?,
                            height: row.get(7)?,
                        },
                        particulars: Vec::new(),
                        source_row: row.get::<_, i64>(8)? as usize,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut particular_stmt = conn.prepare(
            r#"
            SELECT description, unit, quantity, included, notes, source_row
            FROM particular
            WHERE element_key = ?1
            ORDER BY seq_no
            "#,
        )?;

        let mut elements = Vec::with_capacity(keyed_elements.len());
        for (element_key, mut element) in keyed_elements {
            element.particulars = particular_stmt
                .query_map(params![element_key], |row| {
                    Ok(Particular {
                        description: row.get(0)?,
                        unit: row.get(1)?,
                        quantity: row.get(2)?,
                        included: row.get(3)?,
                        notes: row.get(4)?,
                        source_row: row.get::<_, i64>(5)? as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            elements.push(element);
        }

        Ok(elements)
    }

    async fn purge_batches_older_than(&self, days: i64) -> Result<usize, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let cutoff: DateTime<Utc> = Utc::now() - Duration::days(days);
        let deleted = conn.execute(
            "DELETE FROM import_batch WHERE imported_at IS NOT NULL AND imported_at < ?1",
            params![cutoff],
        )?;

        Ok(deleted)
    }
}
