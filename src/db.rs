// ==========================================
// EventFab Element Import - SQLite Connection Setup
// ==========================================
// Goals:
// - one place for Connection::open PRAGMA behavior, so every module
//   gets foreign keys and busy_timeout instead of a random subset
// - embedded schema initialization for fresh databases
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema version the code expects.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Apply the unified PRAGMA set to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must
/// be applied to every connection, not once per database.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the import schema on a fresh database (idempotent).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_scope (
            scope_id TEXT PRIMARY KEY,
            scope_type TEXT NOT NULL,
            scope_key TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(scope_type, scope_key)
        );

        INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
        VALUES ('global', 'GLOBAL', 'global');

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS import_batch (
            batch_id TEXT PRIMARY KEY,
            project_id TEXT,
            file_name TEXT,
            file_path TEXT,
            total_rows INTEGER NOT NULL DEFAULT 0,
            element_count INTEGER NOT NULL DEFAULT 0,
            particular_count INTEGER NOT NULL DEFAULT 0,
            error_count INTEGER NOT NULL DEFAULT 0,
            warning_count INTEGER NOT NULL DEFAULT 0,
            imported_at TEXT,
            imported_by TEXT,
            elapsed_ms INTEGER,
            report_json TEXT
        );

        CREATE TABLE IF NOT EXISTS element (
            element_key TEXT PRIMARY KEY,
            batch_id TEXT NOT NULL REFERENCES import_batch(batch_id) ON DELETE CASCADE,
            project_id TEXT NOT NULL,
            code TEXT NOT NULL,
            element_type TEXT NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            width_m REAL NOT NULL DEFAULT 0,
            length_m REAL NOT NULL DEFAULT 0,
            height_m REAL NOT NULL DEFAULT 0,
            source_row INTEGER NOT NULL,
            seq_no INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_element_project ON element(project_id);
        CREATE INDEX IF NOT EXISTS idx_element_batch ON element(batch_id);

        CREATE TABLE IF NOT EXISTS particular (
            particular_key TEXT PRIMARY KEY,
            element_key TEXT NOT NULL REFERENCES element(element_key) ON DELETE CASCADE,
            description TEXT NOT NULL,
            unit TEXT NOT NULL,
            quantity REAL NOT NULL,
            included INTEGER NOT NULL DEFAULT 1,
            notes TEXT,
            source_row INTEGER NOT NULL,
            seq_no INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_particular_element ON particular(element_key);

        INSERT OR IGNORE INTO schema_version (version) VALUES (1);
        "#,
    )
}

/// Read the schema version (None when the table doesn't exist yet).
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })?;
    Ok(v)
}
