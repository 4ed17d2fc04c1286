//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tm_core::{load_migrations, Config, DbType, MigrationSet};
use tm_db::DuckDbBackend;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs turns it into the process status.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// A loaded project: its root, config, and registered migrations.
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
    pub(crate) migrations: MigrationSet,
}

impl Project {
    /// Open the configured database.
    pub(crate) fn open_database(&self) -> Result<DuckDbBackend> {
        let path = self.config.database_path_absolute(&self.root);
        match self.config.database.db_type {
            DbType::DuckDb => DuckDbBackend::new(&path)
                .with_context(|| format!("Failed to connect to database at {path}")),
        }
    }
}

/// Load config and migrations for the project selected by `global`.
///
/// `--config` overrides the config file; relative paths inside it still
/// resolve against `--project-dir`.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);

    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration file {path}"))?,
        None => Config::load_from_dir(&root).context("Failed to load project configuration")?,
    };

    let migrations_dir = config.migrations_path_absolute(&root);
    let migrations = load_migrations(&migrations_dir).with_context(|| {
        format!("Failed to load migrations from {}", migrations_dir.display())
    })?;
    log::debug!(
        "Loaded {} migrations from {}",
        migrations.len(),
        migrations_dir.display()
    );

    Ok(Project {
        root,
        config,
        migrations,
    })
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Calculate column widths for a table given headers and row data.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Format a left-aligned table: header row, dash separator, then one line
/// per row. Columns are separated by two spaces and trailing padding is
/// trimmed.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let widths = calculate_column_widths(headers, rows);
    let line = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let separator: Vec<&str> = separator.iter().map(String::as_str).collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers));
    lines.push(line(&separator));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(line(&cells));
    }
    lines
}

/// Print a formatted table to stdout.
///
/// ```ignore
/// print_table(
///     &["VERSION", "NAME"],
///     &[vec!["1".into(), "create users".into()]],
/// );
/// // VERSION  NAME
/// // -------  ------------
/// // 1        create users
/// ```
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in format_table(headers, rows) {
        println!("{line}");
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
