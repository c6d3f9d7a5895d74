// ==========================================
// Test helpers
// ==========================================
// Responsibility: temp database setup, mock config, worksheet fixtures.
// ==========================================

#![allow(dead_code)]

use eventfab_import::config::ImportConfigReader;
use eventfab_import::db;
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// Create a temp database file with the import schema applied.
///
/// Returns the NamedTempFile (keep it alive) and the path.
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    db::configure_sqlite_connection(&conn)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Write CSV contents into a temp file with a .csv suffix so the
/// universal parser picks the right decoder.
pub fn create_test_csv(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = Builder::new().suffix(".csv").tempfile()?;
    write!(file, "{}", contents)?;
    Ok(file)
}

// ==========================================
// MockConfigReader - configuration stub for tests
// ==========================================
pub struct MockConfigReader {
    pub max_rows: usize,
    pub custom_types: Vec<String>,
    pub custom_units: Vec<String>,
}

impl Default for MockConfigReader {
    fn default() -> Self {
        Self {
            max_rows: 5000,
            custom_types: Vec::new(),
            custom_units: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl ImportConfigReader for MockConfigReader {
    async fn get_custom_element_types(&self) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(self.custom_types.clone())
    }

    async fn get_custom_units(&self) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(self.custom_units.clone())
    }

    async fn get_max_import_rows(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.max_rows)
    }

    async fn get_batch_retention_days(&self) -> Result<i64, Box<dyn Error>> {
        Ok(90)
    }

    async fn get_imported_by(&self) -> Result<String, Box<dyn Error>> {
        Ok("test-runner".to_string())
    }
}
