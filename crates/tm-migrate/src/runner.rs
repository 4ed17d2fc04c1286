//! Migration runner.
//!
//! Applies pending migrations from a [`MigrationSet`] in ascending version
//! order. Each migration's statements and its ledger row run as one atomic
//! batch; the run stops at the first failure so a later migration never runs
//! on top of a schema its predecessor did not produce.
//!
//! There is no locking across processes. Two runners racing on the same
//! ledger can both see a version as pending; the ledger's primary key makes
//! the slower one fail with [`MigrateError::MigrationFailed`]. Run migrations
//! from a single writer (one deploy step, or under an advisory lock held by
//! the caller).

use crate::drift::DriftWarning;
use crate::error::{FailureCause, MigrateError, MigrateResult};
use crate::ledger::{Ledger, LedgerEntry};
use crate::status::MigrationStatus;
use serde::Serialize;
use std::collections::HashMap;
use tm_core::{Config, Dialect, MigrationDefinition, MigrationSet, Version};
use tm_db::{Database, Statement};
use tm_sql::{SqlDialect, StatementSplitter};

/// Lifecycle of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunnerState {
    /// The ledger has not been initialized by this runner yet.
    NotInitialized,
    /// The ledger exists; no migration run has finished.
    Initialized,
    /// The last migration run completed.
    Idle,
    /// A migration batch is executing.
    Applying,
    /// The last migration run stopped on an error.
    Failed,
}

/// Outcome of [`MigrationRunner::migrate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Registered migrations.
    pub total: usize,
    /// Ledger entries after the run.
    pub applied: usize,
    /// Migrations applied by this run.
    #[serde(rename = "new")]
    pub newly_applied: usize,
    /// Applied migrations whose SQL changed since they ran.
    pub drift: Vec<DriftWarning>,
}

/// Applies a [`MigrationSet`] to a database and tracks it in the ledger.
pub struct MigrationRunner<'a> {
    migrations: &'a MigrationSet,
    db: &'a dyn Database,
    ledger: Ledger<'a>,
    splitter: StatementSplitter,
    state: RunnerState,
}

impl<'a> MigrationRunner<'a> {
    /// Runner using the default ledger table and the DuckDB dialect.
    pub fn new(migrations: &'a MigrationSet, db: &'a dyn Database) -> Self {
        Self {
            migrations,
            db,
            ledger: Ledger::new(db),
            splitter: StatementSplitter::default(),
            state: RunnerState::NotInitialized,
        }
    }

    /// Store the ledger in `table` (optionally `schema.table`).
    pub fn with_ledger_table(mut self, table: &str) -> Self {
        self.ledger = Ledger::with_table(self.db, table);
        self
    }

    /// Split migration scripts using `dialect`.
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.splitter = StatementSplitter::new(dialect);
        self
    }

    /// Apply the ledger table and dialect from a project config.
    pub fn with_config(self, config: &Config) -> Self {
        self.with_ledger_table(&config.ledger_table)
            .with_dialect(sql_dialect(config.dialect))
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn ledger(&self) -> &Ledger<'a> {
        &self.ledger
    }

    /// Apply every pending migration in ascending version order.
    ///
    /// Drift on already-applied migrations is reported, not fatal. An empty
    /// or failing migration aborts the run; migrations applied before it
    /// stay committed and a later call resumes from the failed version.
    pub async fn migrate(&mut self) -> MigrateResult<MigrationReport> {
        if let Err(e) = self.initialize().await {
            self.state = RunnerState::Failed;
            return Err(e);
        }

        let entries = match self.ledger.applied().await {
            Ok(entries) => entries,
            Err(e) => {
                self.state = RunnerState::Failed;
                return Err(e);
            }
        };
        let applied_before = entries.len();
        let recorded: HashMap<Version, &LedgerEntry> =
            entries.iter().map(|e| (e.version, e)).collect();

        let mut drift = Vec::new();
        let mut newly_applied = 0;

        for migration in self.migrations {
            if let Some(entry) = recorded.get(&migration.version()) {
                if let Some(warning) = DriftWarning::detect(migration, entry) {
                    log::warn!("{warning}");
                    drift.push(warning);
                }
                continue;
            }

            self.state = RunnerState::Applying;
            if let Err(e) = self.apply(migration).await {
                log::error!("{e}");
                self.state = RunnerState::Failed;
                return Err(e);
            }
            newly_applied += 1;
        }

        self.state = RunnerState::Idle;
        log::info!(
            "Migrations complete: {} applied this run, {} of {} registered in ledger",
            newly_applied,
            applied_before + newly_applied,
            self.migrations.len()
        );

        Ok(MigrationReport {
            total: self.migrations.len(),
            applied: applied_before + newly_applied,
            newly_applied,
            drift,
        })
    }

    /// Summarize applied and pending migrations.
    pub async fn status(&mut self) -> MigrateResult<MigrationStatus> {
        self.initialize().await?;
        let entries = self.ledger.applied().await?;
        Ok(MigrationStatus::summarize(self.migrations, entries))
    }

    /// Compare applied migrations against the registry without applying
    /// anything.
    pub async fn verify(&mut self) -> MigrateResult<Vec<DriftWarning>> {
        self.initialize().await?;
        let entries = self.ledger.applied().await?;

        let drift: Vec<DriftWarning> = entries
            .iter()
            .filter_map(|entry| {
                let migration = self.migrations.get(entry.version)?;
                DriftWarning::detect(migration, entry)
            })
            .collect();
        for warning in &drift {
            log::warn!("{warning}");
        }
        Ok(drift)
    }

    /// Whether `version` has been applied.
    pub async fn is_applied(&mut self, version: Version) -> MigrateResult<bool> {
        self.initialize().await?;
        self.ledger.is_applied(version).await
    }

    async fn initialize(&mut self) -> MigrateResult<()> {
        self.ledger.initialize().await?;
        if self.state == RunnerState::NotInitialized {
            self.state = RunnerState::Initialized;
        }
        Ok(())
    }

    async fn apply(&self, migration: &MigrationDefinition) -> MigrateResult<()> {
        let failed = |cause: FailureCause| MigrateError::MigrationFailed {
            version: migration.version(),
            name: migration.name().to_string(),
            cause,
        };

        let statements = self
            .splitter
            .split(migration.up_sql())
            .map_err(|e| failed(e.into()))?;
        if statements.is_empty() {
            return Err(MigrateError::EmptyMigration {
                version: migration.version(),
                name: migration.name().to_string(),
            });
        }

        log::debug!(
            "Applying migration v{:03} ({}): {} statements",
            migration.version(),
            migration.name(),
            statements.len()
        );

        let mut batch: Vec<Statement> = statements.into_iter().map(Statement::new).collect();
        batch.push(
            self.ledger
                .record(migration.version(), migration.name(), migration.checksum()),
        );

        self.db
            .batch(&batch)
            .await
            .map_err(|e| failed(e.into()))?;
        Ok(())
    }
}

fn sql_dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::DuckDb => SqlDialect::DuckDb,
        Dialect::Postgres => SqlDialect::PostgreSql,
        Dialect::Sqlite => SqlDialect::Sqlite,
        Dialect::Generic => SqlDialect::Generic,
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
