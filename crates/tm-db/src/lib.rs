//! tm-db - Storage backend layer for Tidemark
//!
//! This crate provides the `Database` trait the migration engine runs
//! against (prepared statements, single-statement execution, and atomic
//! batches) and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod statement;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use statement::{Row, Statement, Value};
pub use traits::Database;
