//! Status command implementation

use anyhow::{Context, Result};
use tm_migrate::{MigrationRunner, MigrationStatus};

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::{load_project, print_table};

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.open_database()?;

    let mut runner = MigrationRunner::new(&project.migrations, &db).with_config(&project.config);
    let status = runner.status().await.context("Failed to read migration status")?;

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&status)
                .context("Failed to serialize migration status")?;
            println!("{json}");
        }
        OutputFormat::Table => print_status(&status),
    }
    Ok(())
}

fn print_status(status: &MigrationStatus) {
    let rows = status_rows(status);
    if !rows.is_empty() {
        print_table(&["VERSION", "NAME", "STATUS", "APPLIED AT"], &rows);
        println!();
    }
    println!(
        "{} applied, {} pending, latest applied version {}",
        status.applied_count, status.pending_count, status.latest_applied_version
    );
    for version in &status.unknown_versions {
        println!("warning: version {version} is in the ledger but not registered");
    }
}

/// One row per applied entry, then one per pending migration.
fn status_rows(status: &MigrationStatus) -> Vec<Vec<String>> {
    let applied = status.applied_entries.iter().map(|entry| {
        vec![
            entry.version.to_string(),
            entry.name.clone(),
            "applied".to_string(),
            entry.applied_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    });
    let pending = status.pending.iter().map(|p| {
        vec![
            p.version.to_string(),
            p.name.clone(),
            "pending".to_string(),
            "-".to_string(),
        ]
    });
    applied.chain(pending).collect()
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
