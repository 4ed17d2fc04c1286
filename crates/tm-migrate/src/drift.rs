//! Checksum drift between registered migrations and the ledger.

use crate::ledger::LedgerEntry;
use serde::Serialize;
use std::fmt;
use tm_core::{is_current_checksum, MigrationDefinition, Version};

/// An applied migration whose registered checksum no longer matches the one
/// recorded when it was applied.
///
/// Non-fatal: the runner logs it, reports it, and moves on. The ledger entry
/// is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftWarning {
    pub version: Version,
    pub name: String,
    /// Checksum stored in the ledger, if any.
    pub recorded: Option<String>,
    /// Checksum of the currently registered SQL.
    pub current: String,
    /// The recorded checksum is missing or not a SHA-256 hex digest, so the
    /// mismatch may come from a hash algorithm change rather than an edit.
    pub legacy: bool,
}

impl DriftWarning {
    /// Compare a registered definition against its ledger entry.
    pub fn detect(migration: &MigrationDefinition, entry: &LedgerEntry) -> Option<Self> {
        let recorded = entry.checksum.as_deref();
        if recorded == Some(migration.checksum()) {
            return None;
        }

        Some(Self {
            version: migration.version(),
            name: migration.name().to_string(),
            recorded: entry.checksum.clone(),
            current: migration.checksum().to_string(),
            legacy: !recorded.is_some_and(is_current_checksum),
        })
    }
}

impl fmt::Display for DriftWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "migration v{:03} ({}) changed after it was applied: recorded {}, current {}",
            self.version,
            self.name,
            self.recorded.as_deref().unwrap_or("<none>"),
            self.current
        )?;
        if self.legacy {
            f.write_str(" (recorded checksum uses a legacy format)")?;
        }
        Ok(())
    }
}
