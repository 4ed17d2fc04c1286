use super::*;
use tempfile::TempDir;

fn project_dir(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tidemark.yml"), config).unwrap();
    std::fs::create_dir(dir.path().join("migrations")).unwrap();
    std::fs::write(
        dir.path().join("migrations/0001_create_users.sql"),
        "CREATE TABLE users (id INTEGER);",
    )
    .unwrap();
    dir
}

fn global(dir: &Path, config: Option<String>) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: dir.display().to_string(),
        config,
    }
}

#[test]
fn test_load_project_from_dir() {
    let dir = project_dir("database:\n  type: duckdb\n  path: app.duckdb\n");
    let project = load_project(&global(dir.path(), None)).unwrap();

    assert_eq!(project.migrations.len(), 1);
    assert_eq!(project.config.ledger_table, "schema_migrations");
    assert_eq!(
        project.config.database_path_absolute(&project.root),
        dir.path().join("app.duckdb").display().to_string()
    );
}

#[test]
fn test_config_override_keeps_project_root() {
    let dir = project_dir("database:\n  path: ignored.duckdb\n");
    let override_path = dir.path().join("ci.yml");
    std::fs::write(
        &override_path,
        "database:\n  path: \":memory:\"\nledger_table: ops.history\n",
    )
    .unwrap();

    let project = load_project(&global(
        dir.path(),
        Some(override_path.display().to_string()),
    ))
    .unwrap();
    assert_eq!(project.config.ledger_table, "ops.history");
    assert_eq!(project.migrations.len(), 1);
    assert!(project.open_database().is_ok());
}

#[test]
fn test_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_project(&global(dir.path(), None)).err().unwrap();
    assert!(err.to_string().contains("Failed to load project configuration"));
}

#[test]
fn test_missing_migrations_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tidemark.yml"), "migrations_path: sql\n").unwrap();
    let err = load_project(&global(dir.path(), None)).err().unwrap();
    assert!(err.to_string().contains("Failed to load migrations"));
}

#[test]
fn test_format_table_aligns_columns() {
    let lines = format_table(
        &["VERSION", "NAME"],
        &[
            vec!["1".to_string(), "create users".to_string()],
            vec!["12".to_string(), "add index".to_string()],
        ],
    );
    assert_eq!(
        lines,
        vec![
            "VERSION  NAME",
            "-------  ------------",
            "1        create users",
            "12       add index",
        ]
    );
}
