// ==========================================
// EventFab Element Import - Config Manager
// ==========================================
// Responsibility: configuration load/query/override.
// Storage: config_kv table (key-value, global scope)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::importer::error::ImportError;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    pub const CUSTOM_ELEMENT_TYPES: &str = "import/custom_element_types";
    pub const CUSTOM_UNITS: &str = "import/custom_units";
    pub const MAX_IMPORT_ROWS: &str = "import/max_import_rows";
    pub const BATCH_RETENTION_DAYS: &str = "import/batch_retention_days";
    pub const IMPORTED_BY: &str = "import/imported_by";
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Open (and initialize, if fresh) the database at db_path.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection; the unified PRAGMAs are re-applied
    /// (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let guard = conn
                .lock()
                .map_err(|e| format!("lock acquisition failed: {}", e))?;
            configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// Read a config value from config_kv (scope_id='global').
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("lock acquisition failed: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Upsert a global config value (used by seeding and tests).
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("lock acquisition failed: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        Ok(())
    }

    /// List-valued keys are stored as JSON arrays of strings.
    fn get_string_list(&self, key: &str) -> Result<Vec<String>, Box<dyn Error>> {
        match self.get_config_value(key)? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str::<Vec<String>>(&raw).map_err(|e| {
                    Box::new(ImportError::ConfigValueError {
                        key: key.to_string(),
                        value: raw,
                        message: e.to_string(),
                    }) as Box<dyn Error>
                })
            }
        }
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_custom_element_types(&self) -> Result<Vec<String>, Box<dyn Error>> {
        self.get_string_list(config_keys::CUSTOM_ELEMENT_TYPES)
    }

    async fn get_custom_units(&self) -> Result<Vec<String>, Box<dyn Error>> {
        self.get_string_list(config_keys::CUSTOM_UNITS)
    }

    async fn get_max_import_rows(&self) -> Result<usize, Box<dyn Error>> {
        let raw = self.get_config_or_default(config_keys::MAX_IMPORT_ROWS, "5000")?;
        raw.parse::<usize>().map_err(|e| {
            Box::new(ImportError::ConfigValueError {
                key: config_keys::MAX_IMPORT_ROWS.to_string(),
                value: raw,
                message: e.to_string(),
            }) as Box<dyn Error>
        })
    }

    async fn get_batch_retention_days(&self) -> Result<i64, Box<dyn Error>> {
        let raw = self.get_config_or_default(config_keys::BATCH_RETENTION_DAYS, "90")?;
        raw.parse::<i64>().map_err(|e| {
            Box::new(ImportError::ConfigValueError {
                key: config_keys::BATCH_RETENTION_DAYS.to_string(),
                value: raw,
                message: e.to_string(),
            }) as Box<dyn Error>
        })
    }

    async fn get_imported_by(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::IMPORTED_BY, "system")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_manager() -> (NamedTempFile, ConfigManager) {
        let file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(file.path().to_str().unwrap()).unwrap();
        (file, manager)
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let (_file, manager) = temp_manager();

        assert!(manager.get_custom_element_types().await.unwrap().is_empty());
        assert!(manager.get_custom_units().await.unwrap().is_empty());
        assert_eq!(manager.get_max_import_rows().await.unwrap(), 5000);
        assert_eq!(manager.get_batch_retention_days().await.unwrap(), 90);
        assert_eq!(manager.get_imported_by().await.unwrap(), "system");
    }

    #[tokio::test]
    async fn test_set_and_read_back() {
        let (_file, manager) = temp_manager();

        manager
            .set_global_config_value(config_keys::CUSTOM_UNITS, r#"["bundles","rolls"]"#)
            .unwrap();
        manager
            .set_global_config_value(config_keys::MAX_IMPORT_ROWS, "200")
            .unwrap();

        assert_eq!(
            manager.get_custom_units().await.unwrap(),
            vec!["bundles".to_string(), "rolls".to_string()]
        );
        assert_eq!(manager.get_max_import_rows().await.unwrap(), 200);
    }

    #[tokio::test]
    async fn test_malformed_list_value_errors() {
        let (_file, manager) = temp_manager();

        manager
            .set_global_config_value(config_keys::CUSTOM_UNITS, "not-json")
            .unwrap();

        assert!(manager.get_custom_units().await.is_err());
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let (_file, manager) = temp_manager();

        manager
            .set_global_config_value(config_keys::IMPORTED_BY, "stores-clerk")
            .unwrap();
        manager
            .set_global_config_value(config_keys::IMPORTED_BY, "workshop-lead")
            .unwrap();

        assert_eq!(manager.get_imported_by().await.unwrap(), "workshop-lead");
    }
}
