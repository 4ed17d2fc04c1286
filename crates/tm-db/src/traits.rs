//! Database trait definition

use crate::error::DbResult;
use crate::statement::{Row, Statement};
use async_trait::async_trait;

/// Storage backend the migration engine runs against
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a statement that returns no rows, returning affected rows
    async fn run(&self, stmt: &Statement) -> DbResult<usize>;

    /// Execute a query and collect every row
    async fn all(&self, stmt: &Statement) -> DbResult<Vec<Row>>;

    /// Execute a query and return its first row, if any
    async fn first(&self, stmt: &Statement) -> DbResult<Option<Row>> {
        Ok(self.all(stmt).await?.into_iter().next())
    }

    /// Execute `stmts` as one atomic unit, returning affected rows per
    /// statement.
    ///
    /// On failure the error names the failing statement and none of the
    /// batch's effects are visible afterwards.
    async fn batch(&self, stmts: &[Statement]) -> DbResult<Vec<usize>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
