use super::*;

#[test]
fn test_register_keeps_ascending_order() {
    let mut builder = MigrationSet::builder();
    builder
        .register(3, "add index", "CREATE INDEX idx ON users(email)", None)
        .unwrap()
        .register(1, "create users", "CREATE TABLE users (id INTEGER)", None)
        .unwrap()
        .register(2, "add email", "ALTER TABLE users ADD COLUMN email TEXT", None)
        .unwrap();
    let set = builder.build();

    let versions: Vec<Version> = set.iter().map(|m| m.version()).collect();
    assert_eq!(versions, vec![1, 2, 3]);
    assert_eq!(set.latest_version(), 3);
}

#[test]
fn test_register_duplicate_version_fails() {
    let mut builder = MigrationSet::builder();
    builder.register(1, "first", "SELECT 1", None).unwrap();

    let err = builder.register(1, "second", "SELECT 2", None).unwrap_err();
    match err {
        CoreError::DuplicateVersion {
            version,
            existing,
            duplicate,
        } => {
            assert_eq!(version, 1);
            assert_eq!(existing, "first");
            assert_eq!(duplicate, "second");
        }
        other => panic!("expected DuplicateVersion, got {other:?}"),
    }
    // The original registration is untouched
    assert_eq!(builder.build().get(1).unwrap().name(), "first");
}

#[test]
fn test_register_version_zero_fails() {
    let mut builder = MigrationSet::builder();
    let err = builder.register(0, "zero", "SELECT 1", None).unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { version: 0, .. }));
    assert!(builder.is_empty());
}

#[test]
fn test_register_version_above_ledger_range_fails() {
    let mut builder = MigrationSet::builder();
    let err = builder
        .register(3_000_000_000, "big", "CREATE TABLE big (id INTEGER)", None)
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidVersion {
            version: 3_000_000_000,
            ..
        }
    ));
    assert!(err.to_string().contains("2147483647"));
    assert!(builder
        .register(MAX_VERSION + 1, "just over", "SELECT 1", None)
        .is_err());
    assert!(builder.is_empty());

    builder
        .register(MAX_VERSION, "largest", "SELECT 1", None)
        .unwrap();
    assert_eq!(builder.build().latest_version(), MAX_VERSION);
}

#[test]
fn test_checksum_computed_when_omitted() {
    let mut builder = MigrationSet::builder();
    builder
        .register(1, "create users", "CREATE TABLE users (id INTEGER)", None)
        .unwrap();
    let set = builder.build();
    assert_eq!(
        set.get(1).unwrap().checksum(),
        compute_checksum("CREATE TABLE users (id INTEGER)")
    );
}

#[test]
fn test_explicit_checksum_is_kept() {
    let mut builder = MigrationSet::builder();
    builder
        .register(5, "legacy", "SELECT 1", Some("c1"))
        .unwrap();
    let set = builder.build();
    assert_eq!(set.get(5).unwrap().checksum(), "c1");
}

#[test]
fn test_get_missing_version() {
    let set = MigrationSet::builder().build();
    assert!(set.get(1).is_none());
    assert!(set.is_empty());
    assert_eq!(set.latest_version(), 0);
}
