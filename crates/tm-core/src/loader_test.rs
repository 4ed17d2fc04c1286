use super::*;
use crate::checksum::compute_checksum;
use std::fs;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_parse_file_name_numbered() {
    assert_eq!(
        parse_file_name("0003_add_users.sql"),
        Some((3, "add users".to_string()))
    );
}

#[test]
fn test_parse_file_name_flyway_style() {
    assert_eq!(
        parse_file_name("V12__create_orders.sql"),
        Some((12, "create orders".to_string()))
    );
}

#[test]
fn test_parse_file_name_rejects_malformed() {
    assert_eq!(parse_file_name("add_users.sql"), None);
    assert_eq!(parse_file_name("0003.sql"), None);
    assert_eq!(parse_file_name("0003_.sql"), None);
    assert_eq!(parse_file_name("V3_single_underscore.sql"), None);
    assert_eq!(parse_file_name("0003_add_users.txt"), None);
}

#[test]
fn test_load_migrations_sorted_with_checksums() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "0002_add_email.sql", "ALTER TABLE users ADD COLUMN email TEXT;");
    write(dir.path(), "0001_create_users.sql", "CREATE TABLE users (id INTEGER);");
    write(dir.path(), "README.md", "not a migration");

    let set = load_migrations(dir.path()).unwrap();
    assert_eq!(set.len(), 2);

    let first = set.get(1).unwrap();
    assert_eq!(first.name(), "create users");
    assert_eq!(
        first.checksum(),
        compute_checksum("CREATE TABLE users (id INTEGER);")
    );

    let versions: Vec<u32> = set.iter().map(|m| m.version()).collect();
    assert_eq!(versions, vec![1, 2]);
}

#[test]
fn test_load_migrations_duplicate_version() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "0001_create_users.sql", "CREATE TABLE users (id INTEGER);");
    write(dir.path(), "V1__create_orders.sql", "CREATE TABLE orders (id INTEGER);");

    let err = load_migrations(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateVersion { version: 1, .. }));
}

#[test]
fn test_load_migrations_invalid_name() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "create_users.sql", "CREATE TABLE users (id INTEGER);");

    let err = load_migrations(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidMigrationFileName { .. }));
}

#[test]
fn test_load_migrations_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_migrations(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, CoreError::MigrationDirNotFound { .. }));
}

#[test]
fn test_load_migrations_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let set = load_migrations(dir.path()).unwrap();
    assert!(set.is_empty());
}
