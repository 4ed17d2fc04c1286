//! Migrate command implementation

use anyhow::{Context, Result};
use tm_migrate::MigrationRunner;

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the migrate command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.open_database()?;

    let mut runner = MigrationRunner::new(&project.migrations, &db).with_config(&project.config);
    let report = runner.migrate().await.context("Migration run failed")?;

    for warning in &report.drift {
        println!("warning: {warning}");
    }
    println!(
        "Applied {} new migration(s); {} of {} applied",
        report.newly_applied, report.applied, report.total
    );
    Ok(())
}
