//! Load a [`MigrationSet`] from a directory of `.sql` files.
//!
//! Accepted file names:
//!
//! - `0003_add_users.sql` (`<version>_<name>.sql`)
//! - `V3__add_users.sql` (`V<version>__<name>.sql`)
//!
//! Underscores in the name part become spaces in the migration name.
//! Files without a `.sql` extension are skipped.

use crate::error::{CoreError, CoreResult};
use crate::migration::{MigrationSet, Version};
use std::path::{Path, PathBuf};

/// Read every migration file in `dir` into an immutable [`MigrationSet`].
pub fn load_migrations(dir: &Path) -> CoreResult<MigrationSet> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    paths.sort();

    let mut builder = MigrationSet::builder();
    for path in &paths {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let Some((version, name)) = parse_file_name(file_name) else {
            return Err(CoreError::InvalidMigrationFileName {
                path: path.display().to_string(),
            });
        };

        let sql = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        log::debug!("Loaded migration v{:03} from {}", version, path.display());
        builder.register(version, &name, &sql, None)?;
    }

    Ok(builder.build())
}

/// Split a migration file name into its version and descriptive name.
pub(crate) fn parse_file_name(file_name: &str) -> Option<(Version, String)> {
    let stem = file_name.strip_suffix(".sql")?;

    let (digits, rest) = match stem.strip_prefix(['V', 'v']) {
        Some(prefixed) => {
            let (digits, rest) = split_leading_digits(prefixed);
            (digits, rest.strip_prefix("__")?)
        }
        None => {
            let (digits, rest) = split_leading_digits(stem);
            (digits, rest.strip_prefix('_')?)
        }
    };

    if digits.is_empty() || rest.is_empty() {
        return None;
    }
    let version = digits.parse::<Version>().ok()?;
    Some((version, rest.replace('_', " ")))
}

fn split_leading_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
