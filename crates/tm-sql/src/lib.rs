//! tm-sql - SQL layer for Tidemark
//!
//! This crate splits migration scripts into individually executable
//! statements using the sqlparser-rs tokenizer, so semicolons inside string
//! literals, comments, and routine bodies never cut a statement in half.

pub mod dialect;
pub mod error;
pub mod splitter;

pub use dialect::SqlDialect;
pub use error::{SqlError, SqlResult};
pub use splitter::{split_statements, StatementSplitter};
