//! Ledger of applied migrations.
//!
//! One row per successfully applied migration, written in the same atomic
//! batch as the migration's own statements and never updated or deleted
//! afterwards.

use crate::error::{MigrateError, MigrateResult};
use chrono::NaiveDateTime;
use serde::Serialize;
use tm_core::sql_utils::{quote_ident, quote_qualified, split_qualified_name};
use tm_core::Version;
use tm_db::{Database, Row, Statement};

/// Ledger table used when none is configured.
pub const DEFAULT_LEDGER_TABLE: &str = "schema_migrations";

/// Format DuckDB uses when casting a TIMESTAMP to VARCHAR.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A migration recorded as applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub version: Version,
    pub name: String,
    /// Checksum recorded at apply time; `None` for rows written without one.
    pub checksum: Option<String>,
    pub applied_at: NaiveDateTime,
}

/// Access to the ledger table.
pub struct Ledger<'a> {
    db: &'a dyn Database,
    table: String,
}

impl<'a> Ledger<'a> {
    /// Ledger stored in [`DEFAULT_LEDGER_TABLE`].
    pub fn new(db: &'a dyn Database) -> Self {
        Self::with_table(db, DEFAULT_LEDGER_TABLE)
    }

    /// Ledger stored in `table`, optionally schema-qualified.
    pub fn with_table(db: &'a dyn Database, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
        }
    }

    /// Unquoted table name as configured.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the ledger table (and its schema) if absent.
    ///
    /// Idempotent; the runner calls it on every invocation.
    pub async fn initialize(&self) -> MigrateResult<()> {
        let mut ddl = Vec::with_capacity(2);
        if let (Some(schema), _) = split_qualified_name(&self.table) {
            ddl.push(Statement::new(format!(
                "CREATE SCHEMA IF NOT EXISTS {}",
                quote_ident(schema)
            )));
        }
        ddl.push(Statement::new(format!(
            "CREATE TABLE IF NOT EXISTS {} (
                 version    INTEGER PRIMARY KEY,
                 name       TEXT NOT NULL,
                 applied_at TIMESTAMP DEFAULT now(),
                 checksum   TEXT
             )",
            self.quoted_table()
        )));

        self.db
            .batch(&ddl)
            .await
            .map_err(|source| MigrateError::Configuration {
                table: self.table.clone(),
                source,
            })?;
        Ok(())
    }

    /// All recorded entries ordered by version.
    pub async fn applied(&self) -> MigrateResult<Vec<LedgerEntry>> {
        let stmt = Statement::new(format!(
            "SELECT version, name, checksum, CAST(applied_at AS VARCHAR) FROM {} ORDER BY version",
            self.quoted_table()
        ));
        let rows = self.db.all(&stmt).await.map_err(|e| self.read_error(e))?;
        rows.iter().map(|row| self.decode_entry(row)).collect()
    }

    /// Whether `version` has a ledger entry.
    pub async fn is_applied(&self, version: Version) -> MigrateResult<bool> {
        let stmt = Statement::new(format!(
            "SELECT 1 FROM {} WHERE version = ?",
            self.quoted_table()
        ))
        .bind(version);
        let row = self.db.first(&stmt).await.map_err(|e| self.read_error(e))?;
        Ok(row.is_some())
    }

    /// Insert statement recording `version` as applied.
    ///
    /// Returned rather than executed so the caller can place it in the same
    /// atomic batch as the migration's statements.
    pub fn record(&self, version: Version, name: &str, checksum: &str) -> Statement {
        Statement::new(format!(
            "INSERT INTO {} (version, name, checksum) VALUES (?, ?, ?)",
            self.quoted_table()
        ))
        .bind(version)
        .bind(name)
        .bind(checksum)
    }

    fn quoted_table(&self) -> String {
        quote_qualified(&self.table)
    }

    fn read_error(&self, source: tm_db::DbError) -> MigrateError {
        MigrateError::Ledger {
            table: self.table.clone(),
            source,
        }
    }

    fn decode_entry(&self, row: &Row) -> MigrateResult<LedgerEntry> {
        let raw_version = row.get_i64(0).map_err(|e| self.read_error(e))?;
        let version =
            Version::try_from(raw_version).map_err(|_| MigrateError::CorruptLedgerEntry {
                version: raw_version,
                message: "version out of range".to_string(),
            })?;

        let name = row.get_str(1).map_err(|e| self.read_error(e))?.to_string();
        let checksum = row
            .get_opt_str(2)
            .map_err(|e| self.read_error(e))?
            .map(str::to_string);

        let raw_applied_at = row
            .get_opt_str(3)
            .map_err(|e| self.read_error(e))?
            .ok_or_else(|| MigrateError::CorruptLedgerEntry {
                version: raw_version,
                message: "applied_at is null".to_string(),
            })?;
        let applied_at = NaiveDateTime::parse_from_str(raw_applied_at, TIMESTAMP_FORMAT)
            .map_err(|e| MigrateError::CorruptLedgerEntry {
                version: raw_version,
                message: format!("invalid applied_at '{raw_applied_at}': {e}"),
            })?;

        Ok(LedgerEntry {
            version,
            name,
            checksum,
            applied_at,
        })
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
