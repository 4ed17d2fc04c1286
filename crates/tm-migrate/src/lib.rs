//! Schema migration engine for Tidemark.
//!
//! Tracks applied migration versions in a ledger table, applies pending
//! migrations in ascending version order (each in one atomic batch together
//! with its ledger row), and reports checksum drift for migrations whose SQL
//! changed after they were applied.

pub mod drift;
pub mod error;
pub mod ledger;
pub mod runner;
pub mod status;

pub use drift::DriftWarning;
pub use error::{FailureCause, MigrateError, MigrateResult};
pub use ledger::{Ledger, LedgerEntry, DEFAULT_LEDGER_TABLE};
pub use runner::{MigrationReport, MigrationRunner, RunnerState};
pub use status::{MigrationStatus, PendingMigration};
