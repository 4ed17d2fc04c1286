//! Migration definitions and the version-ordered [`MigrationSet`].
//!
//! A [`MigrationSet`] is built once through [`MigrationSetBuilder`] and is
//! immutable afterwards. Runners borrow it, so several runners in one process
//! never share hidden registry state.

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Migration version number. Versions start at 1; 0 means "nothing applied".
pub type Version = u32;

/// Highest version the ledger's 32-bit signed `version` column can hold.
pub const MAX_VERSION: Version = i32::MAX as Version;

/// One versioned schema change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDefinition {
    version: Version,
    name: String,
    up_sql: String,
    checksum: String,
}

impl MigrationDefinition {
    /// Create a definition, computing the checksum from `up_sql`.
    pub fn new(version: Version, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = compute_checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            checksum,
        }
    }

    /// Replace the computed checksum with an explicitly supplied one.
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = checksum.into();
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw SQL text, possibly holding several statements.
    pub fn up_sql(&self) -> &str {
        &self.up_sql
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}

/// Immutable collection of migrations in ascending version order.
#[derive(Debug, Clone, Default)]
pub struct MigrationSet {
    migrations: Vec<MigrationDefinition>,
}

impl MigrationSet {
    /// Start building a new set.
    pub fn builder() -> MigrationSetBuilder {
        MigrationSetBuilder::default()
    }

    /// Iterate definitions in ascending version order.
    pub fn iter(&self) -> std::slice::Iter<'_, MigrationDefinition> {
        self.migrations.iter()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Look up a definition by version.
    pub fn get(&self, version: Version) -> Option<&MigrationDefinition> {
        self.migrations
            .binary_search_by_key(&version, MigrationDefinition::version)
            .ok()
            .map(|idx| &self.migrations[idx])
    }

    /// Highest registered version, or 0 for an empty set.
    pub fn latest_version(&self) -> Version {
        self.migrations.last().map_or(0, MigrationDefinition::version)
    }
}

impl<'a> IntoIterator for &'a MigrationSet {
    type Item = &'a MigrationDefinition;
    type IntoIter = std::slice::Iter<'a, MigrationDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Accumulates definitions and rejects version collisions as they arrive.
#[derive(Debug, Default)]
pub struct MigrationSetBuilder {
    migrations: BTreeMap<Version, MigrationDefinition>,
}

impl MigrationSetBuilder {
    /// Register a migration.
    ///
    /// When `checksum` is `None` it is computed from `sql`. Fails with
    /// [`CoreError::DuplicateVersion`] if `version` is already registered and
    /// with [`CoreError::InvalidVersion`] for version 0 or versions above
    /// [`MAX_VERSION`].
    pub fn register(
        &mut self,
        version: Version,
        name: &str,
        sql: &str,
        checksum: Option<&str>,
    ) -> CoreResult<&mut Self> {
        let mut definition = MigrationDefinition::new(version, name, sql);
        if let Some(checksum) = checksum {
            definition = definition.with_checksum(checksum);
        }
        self.add(definition)
    }

    /// Register an already constructed definition.
    pub fn add(&mut self, definition: MigrationDefinition) -> CoreResult<&mut Self> {
        if definition.version == 0 || definition.version > MAX_VERSION {
            return Err(CoreError::InvalidVersion {
                version: definition.version,
                name: definition.name,
            });
        }

        match self.migrations.entry(definition.version) {
            Entry::Occupied(existing) => Err(CoreError::DuplicateVersion {
                version: definition.version,
                existing: existing.get().name.clone(),
                duplicate: definition.name,
            }),
            Entry::Vacant(slot) => {
                slot.insert(definition);
                Ok(self)
            }
        }
    }

    /// Number of definitions registered so far.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Freeze the registered definitions into a [`MigrationSet`].
    pub fn build(self) -> MigrationSet {
        MigrationSet {
            migrations: self.migrations.into_values().collect(),
        }
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
