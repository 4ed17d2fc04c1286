use super::*;
use chrono::NaiveDate;

fn registry(versions: &[Version]) -> MigrationSet {
    let mut builder = MigrationSet::builder();
    for &v in versions {
        builder
            .register(v, &format!("step {v}"), &format!("CREATE TABLE t{v} (id INTEGER)"), None)
            .unwrap();
    }
    builder.build()
}

fn entry(version: Version) -> LedgerEntry {
    LedgerEntry {
        version,
        name: format!("step {version}"),
        checksum: Some("abc".to_string()),
        applied_at: NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    }
}

#[test]
fn test_partial_application() {
    let status = MigrationStatus::summarize(&registry(&[1, 2, 3]), vec![entry(1)]);

    assert_eq!(status.applied_count, 1);
    assert_eq!(status.pending_count, 2);
    assert_eq!(status.latest_applied_version, 1);
    assert_eq!(
        status.pending,
        vec![
            PendingMigration {
                version: 2,
                name: "step 2".to_string()
            },
            PendingMigration {
                version: 3,
                name: "step 3".to_string()
            },
        ]
    );
    assert!(status.unknown_versions.is_empty());
    assert!(!status.is_up_to_date());
}

#[test]
fn test_nothing_applied() {
    let status = MigrationStatus::summarize(&registry(&[1, 2]), Vec::new());
    assert_eq!(status.applied_count, 0);
    assert_eq!(status.pending_count, 2);
    assert_eq!(status.latest_applied_version, 0);
}

#[test]
fn test_all_applied() {
    let status = MigrationStatus::summarize(&registry(&[1, 2]), vec![entry(1), entry(2)]);
    assert!(status.is_up_to_date());
    assert_eq!(status.latest_applied_version, 2);
}

#[test]
fn test_unknown_ledger_versions() {
    let status = MigrationStatus::summarize(&registry(&[1, 3]), vec![entry(1), entry(2)]);
    assert_eq!(status.unknown_versions, vec![2]);
    assert_eq!(status.applied_count, 2);
    assert_eq!(status.pending_count, 1);
    assert_eq!(status.latest_applied_version, 2);
}

#[test]
fn test_pending_payload_has_no_sql() {
    let status = MigrationStatus::summarize(&registry(&[1]), Vec::new());
    let json = serde_json::to_value(&status).unwrap();
    let pending = &json["pending"][0];
    assert_eq!(pending["version"], 1);
    assert_eq!(pending["name"], "step 1");
    assert_eq!(pending.as_object().unwrap().len(), 2);
}
