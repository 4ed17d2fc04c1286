//! Error types for the migration engine.

use thiserror::Error;
use tm_core::Version;
use tm_db::DbError;
use tm_sql::SqlError;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The ledger table could not be created (MG001).
    #[error("[MG001] Failed to initialize ledger table '{table}': {source}")]
    Configuration {
        table: String,
        #[source]
        source: DbError,
    },

    /// Reading the ledger failed after initialization (MG002).
    #[error("[MG002] Failed to read ledger table '{table}': {source}")]
    Ledger {
        table: String,
        #[source]
        source: DbError,
    },

    /// A stored ledger row could not be interpreted (MG003).
    #[error("[MG003] Corrupt ledger entry for version {version}: {message}")]
    CorruptLedgerEntry { version: i64, message: String },

    /// A migration's SQL holds no executable statement (MG004).
    #[error("[MG004] Migration v{version:03} ({name}) contains no executable statements")]
    EmptyMigration { version: Version, name: String },

    /// A migration could not be applied; nothing from it was committed (MG005).
    #[error("[MG005] Migration v{version:03} ({name}) failed: {cause}")]
    MigrationFailed {
        version: Version,
        name: String,
        #[source]
        cause: FailureCause,
    },
}

/// Underlying reason a migration failed to apply.
#[derive(Error, Debug)]
pub enum FailureCause {
    /// The SQL could not be split into statements.
    #[error(transparent)]
    Split(#[from] SqlError),

    /// The backend rejected a statement or the ledger insert.
    #[error(transparent)]
    Statement(#[from] DbError),
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
