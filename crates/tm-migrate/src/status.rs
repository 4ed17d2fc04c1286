//! Applied/pending summaries derived from the registry and the ledger.

use crate::ledger::LedgerEntry;
use serde::Serialize;
use std::collections::BTreeSet;
use tm_core::{MigrationSet, Version};

/// A registered migration that has not been applied.
///
/// Carries no SQL so status payloads stay small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingMigration {
    pub version: Version,
    pub name: String,
}

/// Snapshot of registry and ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub applied_count: usize,
    pub pending_count: usize,
    /// Highest applied version, or 0 if nothing is applied.
    pub latest_applied_version: Version,
    pub applied_entries: Vec<LedgerEntry>,
    pub pending: Vec<PendingMigration>,
    /// Ledger versions with no registered definition.
    pub unknown_versions: Vec<Version>,
}

impl MigrationStatus {
    /// Build a status from the registry and the ledger's entries.
    pub fn summarize(migrations: &MigrationSet, applied_entries: Vec<LedgerEntry>) -> Self {
        let applied: BTreeSet<Version> = applied_entries.iter().map(|e| e.version).collect();

        let pending: Vec<PendingMigration> = migrations
            .iter()
            .filter(|m| !applied.contains(&m.version()))
            .map(|m| PendingMigration {
                version: m.version(),
                name: m.name().to_string(),
            })
            .collect();

        let unknown_versions = applied
            .iter()
            .copied()
            .filter(|v| migrations.get(*v).is_none())
            .collect();

        Self {
            applied_count: applied_entries.len(),
            pending_count: pending.len(),
            latest_applied_version: applied.last().copied().unwrap_or(0),
            applied_entries,
            pending,
            unknown_versions,
        }
    }

    /// Whether every registered migration is applied.
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
