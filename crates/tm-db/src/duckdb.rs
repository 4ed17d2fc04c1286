//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::statement::{Row, Statement, Value};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
///
/// A single connection guarded by a mutex; statements from concurrent
/// callers are serialized.
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute a single statement synchronously
    fn run_sync(&self, stmt: &Statement) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(stmt.sql(), params_from_iter(to_duckdb_params(stmt.params())))
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, stmt.sql())))
    }

    /// Execute a query synchronously and collect its rows
    fn all_sync(&self, stmt: &Statement) -> DbResult<Vec<Row>> {
        let conn = self.lock()?;
        let mut prepared = conn
            .prepare(stmt.sql())
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, stmt.sql())))?;

        let rows = prepared
            .query_map(
                params_from_iter(to_duckdb_params(stmt.params())),
                |row| {
                    let col_count = row.as_ref().column_count();
                    Ok(Row::new(
                        (0..col_count).map(|i| read_value(row, i)).collect(),
                    ))
                },
            )
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, stmt.sql())))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::ExecutionError(format!("row error: {e}")))?;
        Ok(rows)
    }

    /// Execute statements inside one `BEGIN` / `COMMIT` transaction, rolling
    /// back on the first failure.
    fn batch_sync(&self, stmts: &[Statement]) -> DbResult<Vec<usize>> {
        let conn = self.lock()?;
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let mut affected = Vec::with_capacity(stmts.len());
        for (index, stmt) in stmts.iter().enumerate() {
            match conn.execute(stmt.sql(), params_from_iter(to_duckdb_params(stmt.params()))) {
                Ok(n) => affected.push(n),
                Err(e) => {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(DbError::BatchFailed {
                        index,
                        message: e.to_string(),
                    });
                }
            }
        }

        if let Err(commit_err) = conn.execute_batch("COMMIT") {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(DbError::TransactionError(format!(
                "COMMIT failed: {commit_err}"
            )));
        }
        Ok(affected)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn run(&self, stmt: &Statement) -> DbResult<usize> {
        self.run_sync(stmt)
    }

    async fn all(&self, stmt: &Statement) -> DbResult<Vec<Row>> {
        self.all_sync(stmt)
    }

    async fn batch(&self, stmts: &[Statement]) -> DbResult<Vec<usize>> {
        log::debug!("Executing atomic batch of {} statements", stmts.len());
        self.batch_sync(stmts)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

fn to_duckdb_params(params: &[Value]) -> Vec<duckdb::types::Value> {
    params
        .iter()
        .map(|value| match value {
            Value::Null => duckdb::types::Value::Null,
            Value::Integer(v) => duckdb::types::Value::BigInt(*v),
            Value::Real(v) => duckdb::types::Value::Double(*v),
            Value::Text(v) => duckdb::types::Value::Text(v.clone()),
            Value::Bool(v) => duckdb::types::Value::Boolean(*v),
        })
        .collect()
}

/// Read a column value, trying the DuckDB types the engine stores.
///
/// DuckDB returns a type error when a column is read as the wrong Rust
/// type, so we try i64 -> String -> f64 -> bool and fall back to null.
fn read_value(row: &duckdb::Row<'_>, idx: usize) -> Value {
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return Value::Integer(n);
    }
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return Value::Text(s);
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return Value::Real(f);
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return Value::Bool(b);
    }
    Value::Null
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
