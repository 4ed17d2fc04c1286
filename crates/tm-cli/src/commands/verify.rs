//! Verify command implementation

use anyhow::{Context, Result};
use tm_migrate::MigrationRunner;

use crate::cli::{GlobalArgs, VerifyArgs};
use crate::commands::common::{load_project, print_table, ExitCode};

/// Execute the verify command
pub(crate) async fn execute(args: &VerifyArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.open_database()?;

    let mut runner = MigrationRunner::new(&project.migrations, &db).with_config(&project.config);
    let drift = runner.verify().await.context("Failed to verify migrations")?;

    if drift.is_empty() {
        println!("No drift: every applied migration matches its registered SQL");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = drift
        .iter()
        .map(|w| {
            vec![
                w.version.to_string(),
                w.name.clone(),
                w.recorded.clone().unwrap_or_else(|| "-".to_string()),
                w.current.clone(),
                if w.legacy { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print_table(&["VERSION", "NAME", "RECORDED", "CURRENT", "LEGACY"], &rows);
    println!();
    println!("{} applied migration(s) changed since they ran", drift.len());

    if args.strict {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
